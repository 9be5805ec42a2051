use serde::Serialize;

use crate::value::Value;

/// Structural shape of a value, as seen by the comparison engine.
///
/// Classification looks only at the variant. A value's own notion of
/// equality is deliberately never consulted: composites are always
/// decomposed member by member, because domain equality in the graphs under
/// comparison is frequently unreliable or intentionally absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Kind {
    /// Absent value.
    Null,
    /// Primitive-like value with well-defined native equality: booleans,
    /// numbers, strings (including dates and enum constants carried as
    /// strings).
    Scalar,
    /// Fixed-size indexable block, compared by element regardless of the
    /// element type.
    Array,
    /// Ordered sequence with insertion-order iteration and no key access.
    Sequence,
    /// Collection without defined order, positional access, or key access.
    Set,
    /// Key-based iteration.
    Map,
    /// Fixed set of named members.
    Composite,
}

impl Kind {
    /// Human-readable kind name for mismatch reporting.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Scalar => "scalar",
            Kind::Array => "array",
            Kind::Sequence => "sequence",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::Composite => "composite",
        }
    }
}

/// Classifies a value into its structural [`Kind`].
pub fn classify(value: &Value) -> Kind {
    match value {
        Value::Null => Kind::Null,
        Value::Bool(_)
        | Value::Integer(_)
        | Value::UnsignedInteger(_)
        | Value::Float(_)
        | Value::String(_) => Kind::Scalar,
        Value::Array(_) => Kind::Array,
        Value::Seq(_) => Kind::Sequence,
        Value::Set(_) => Kind::Set,
        Value::Map(_) => Kind::Map,
        Value::Composite(_) => Kind::Composite,
    }
}

/// Returns `true` when two kinds compare as ordered element containers.
///
/// Sequences and arrays reconcile with each other; no other cross-kind pair
/// does.
pub(super) fn ordered_pair(left: Kind, right: Kind) -> bool {
    matches!(left, Kind::Array | Kind::Sequence) && matches!(right, Kind::Array | Kind::Sequence)
}
