//! Dynamic value model for the comparison engine.
//!
//! Values live in a [`ValueGraph`] arena and refer to each other through
//! [`ValueId`] handles rather than by ownership. Handle identity is what the
//! traversal guard keys on, so shared references and cycles are expressed by
//! reusing a handle in more than one parent.
//!
//! The engine itself never touches the arena directly; it resolves handles
//! through the [`ValueSource`] capability trait. This keeps lazily-computed
//! or access-guarded values representable: a source is free to fail resolution
//! of a handle, and the engine treats that as an introspection error.

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map as JsonMap, Value as JsonValue};

/// Handle to a value stored in a [`ValueGraph`].
///
/// Copyable and cheap; two handles are the same reference iff they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(u32);

impl ValueId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A dynamic value.
///
/// Scalar variants carry their payload inline; container variants carry
/// [`ValueId`] handles into the owning graph.
///
/// The integer/unsigned split preserves numeric fidelity for values above
/// `i64::MAX`; the comparison engine reconciles the two numerically.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer (fits in i64).
    Integer(i64),
    /// Unsigned integer above `i64::MAX`.
    UnsignedInteger(u64),
    /// IEEE 754 double-precision float.
    Float(f64),
    /// UTF-8 string. Dates and domain enums are carried in this variant;
    /// their native equality is string equality.
    String(String),
    /// Fixed-size indexable block. Classified and compared by element,
    /// regardless of element type.
    Array(Vec<ValueId>),
    /// Ordered sequence (list-like, insertion-order iteration).
    Seq(Vec<ValueId>),
    /// Unordered collection. Element order is storage order only and never
    /// meaningful for comparison.
    Set(Vec<ValueId>),
    /// Key-value entries in insertion order. Keys are arbitrary values; the
    /// engine matches them structurally, never by the key's own equality.
    Map(Vec<(ValueId, ValueId)>),
    /// Named members in declaration order.
    Composite(Vec<(String, ValueId)>),
}

impl Value {
    /// Returns `true` for `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::UnsignedInteger(u) => write!(f, "{u}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(_) | Self::Seq(_) | Self::Set(_) => write!(f, "[...]"),
            Self::Map(_) | Self::Composite(_) => write!(f, "{{...}}"),
        }
    }
}

/// Error produced when a handle cannot be resolved to a value.
///
/// Resolution failure is a configuration problem (a dangling handle, or a
/// source that refuses access), never a comparison verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueAccessError {
    /// The handle does not belong to this source.
    Unknown {
        /// The unresolved handle.
        id: ValueId,
    },
    /// The source refused to produce the value (e.g. an access-guarded or
    /// lazily-loaded member that must not be forced).
    Unavailable {
        /// The refused handle.
        id: ValueId,
        /// Source-provided detail.
        detail: String,
    },
    /// A graph edit targeted a value of the wrong variant.
    KindMismatch {
        /// The edited handle.
        id: ValueId,
        /// The variant the edit required.
        expected: &'static str,
    },
}

impl fmt::Display for ValueAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueAccessError::Unknown { id } => write!(f, "unknown value handle {id}"),
            ValueAccessError::Unavailable { id, detail } => {
                write!(f, "value {id} is unavailable: {detail}")
            }
            ValueAccessError::KindMismatch { id, expected } => {
                write!(f, "value {id} is not a {expected}")
            }
        }
    }
}

impl std::error::Error for ValueAccessError {}

/// Capability for resolving value handles.
///
/// The comparison engine depends only on this trait. [`ValueGraph`] is the
/// standard implementation; test doubles wrap one to fail resolution of
/// designated handles, proving the engine never reads a short-circuited
/// branch.
pub trait ValueSource {
    /// Resolves a handle to its value.
    ///
    /// # Errors
    ///
    /// [`ValueAccessError`] if the handle is unknown to this source or the
    /// source declines to produce the value.
    fn value(&self, id: ValueId) -> Result<&Value, ValueAccessError>;
}

/// Arena owning a graph of dynamic values.
#[derive(Debug, Clone, Default)]
pub struct ValueGraph {
    nodes: Vec<Value>,
}

impl ValueGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph holds no values.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stores a value and returns its handle.
    pub fn insert(&mut self, value: Value) -> ValueId {
        let id = ValueId(self.nodes.len() as u32);
        self.nodes.push(value);
        id
    }

    /// Stores `Value::Null`.
    pub fn null(&mut self) -> ValueId {
        self.insert(Value::Null)
    }

    /// Stores a boolean.
    pub fn boolean(&mut self, b: bool) -> ValueId {
        self.insert(Value::Bool(b))
    }

    /// Stores a signed integer.
    pub fn integer(&mut self, i: i64) -> ValueId {
        self.insert(Value::Integer(i))
    }

    /// Stores an unsigned integer, collapsing to `Integer` when it fits.
    pub fn unsigned(&mut self, u: u64) -> ValueId {
        match i64::try_from(u) {
            Ok(i) => self.insert(Value::Integer(i)),
            Err(_) => self.insert(Value::UnsignedInteger(u)),
        }
    }

    /// Stores a float.
    pub fn float(&mut self, v: f64) -> ValueId {
        self.insert(Value::Float(v))
    }

    /// Stores a string.
    pub fn string(&mut self, s: impl Into<String>) -> ValueId {
        self.insert(Value::String(s.into()))
    }

    /// Stores a fixed-size array of the given elements.
    pub fn array(&mut self, elements: Vec<ValueId>) -> ValueId {
        self.insert(Value::Array(elements))
    }

    /// Stores an ordered sequence.
    pub fn seq(&mut self, elements: Vec<ValueId>) -> ValueId {
        self.insert(Value::Seq(elements))
    }

    /// Stores an unordered collection.
    pub fn set(&mut self, elements: Vec<ValueId>) -> ValueId {
        self.insert(Value::Set(elements))
    }

    /// Stores a map with the given entries.
    pub fn map(&mut self, entries: Vec<(ValueId, ValueId)>) -> ValueId {
        self.insert(Value::Map(entries))
    }

    /// Stores a composite with the given named members.
    pub fn composite(&mut self, members: Vec<(String, ValueId)>) -> ValueId {
        self.insert(Value::Composite(members))
    }

    /// Appends a member to an existing composite.
    ///
    /// Cyclic graphs are built by allocating the composite first and tying
    /// back-references with this method.
    ///
    /// # Errors
    ///
    /// [`ValueAccessError`] if `composite` is unknown or not a composite.
    pub fn composite_insert(
        &mut self,
        composite: ValueId,
        name: impl Into<String>,
        member: ValueId,
    ) -> Result<(), ValueAccessError> {
        match self.node_mut(composite)? {
            Value::Composite(members) => {
                members.push((name.into(), member));
                Ok(())
            }
            Value::Null
            | Value::Bool(_)
            | Value::Integer(_)
            | Value::UnsignedInteger(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Array(_)
            | Value::Seq(_)
            | Value::Set(_)
            | Value::Map(_) => Err(ValueAccessError::KindMismatch {
                id: composite,
                expected: "composite",
            }),
        }
    }

    /// Appends an element to an existing sequence.
    ///
    /// # Errors
    ///
    /// [`ValueAccessError`] if `seq` is unknown or not a sequence.
    pub fn seq_push(&mut self, seq: ValueId, element: ValueId) -> Result<(), ValueAccessError> {
        match self.node_mut(seq)? {
            Value::Seq(elements) => {
                elements.push(element);
                Ok(())
            }
            Value::Null
            | Value::Bool(_)
            | Value::Integer(_)
            | Value::UnsignedInteger(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Array(_)
            | Value::Set(_)
            | Value::Map(_)
            | Value::Composite(_) => Err(ValueAccessError::KindMismatch {
                id: seq,
                expected: "sequence",
            }),
        }
    }

    /// Appends an element to an existing unordered collection.
    ///
    /// # Errors
    ///
    /// [`ValueAccessError`] if `set` is unknown or not a set.
    pub fn set_insert(&mut self, set: ValueId, element: ValueId) -> Result<(), ValueAccessError> {
        match self.node_mut(set)? {
            Value::Set(elements) => {
                elements.push(element);
                Ok(())
            }
            Value::Null
            | Value::Bool(_)
            | Value::Integer(_)
            | Value::UnsignedInteger(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Array(_)
            | Value::Seq(_)
            | Value::Map(_)
            | Value::Composite(_) => Err(ValueAccessError::KindMismatch {
                id: set,
                expected: "set",
            }),
        }
    }

    /// Appends an entry to an existing map.
    ///
    /// # Errors
    ///
    /// [`ValueAccessError`] if `map` is unknown or not a map.
    pub fn map_insert(
        &mut self,
        map: ValueId,
        key: ValueId,
        value: ValueId,
    ) -> Result<(), ValueAccessError> {
        match self.node_mut(map)? {
            Value::Map(entries) => {
                entries.push((key, value));
                Ok(())
            }
            Value::Null
            | Value::Bool(_)
            | Value::Integer(_)
            | Value::UnsignedInteger(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Array(_)
            | Value::Seq(_)
            | Value::Set(_)
            | Value::Composite(_) => Err(ValueAccessError::KindMismatch {
                id: map,
                expected: "map",
            }),
        }
    }

    /// Ingests a JSON document, returning the handle of its root.
    ///
    /// JSON objects become composites (named members in key order), JSON
    /// arrays become ordered sequences. Sets, maps with non-string keys, and
    /// fixed-size arrays have no JSON spelling and are built through the
    /// graph API directly.
    pub fn from_json(&mut self, json: &JsonValue) -> ValueId {
        match json {
            JsonValue::Null => self.null(),
            JsonValue::Bool(b) => self.boolean(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    self.integer(i)
                } else if let Some(u) = n.as_u64() {
                    self.insert(Value::UnsignedInteger(u))
                } else {
                    self.float(n.as_f64().unwrap_or(0.0))
                }
            }
            JsonValue::String(s) => self.string(s.clone()),
            JsonValue::Array(elements) => {
                let ids: Vec<ValueId> = elements.iter().map(|e| self.from_json(e)).collect();
                self.seq(ids)
            }
            JsonValue::Object(members) => {
                let ids: Vec<(String, ValueId)> = members
                    .iter()
                    .map(|(name, v)| (name.clone(), self.from_json(v)))
                    .collect();
                self.composite(ids)
            }
        }
    }

    fn node_mut(&mut self, id: ValueId) -> Result<&mut Value, ValueAccessError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(ValueAccessError::Unknown { id })
    }
}

impl ValueSource for ValueGraph {
    fn value(&self, id: ValueId) -> Result<&Value, ValueAccessError> {
        self.nodes
            .get(id.index())
            .ok_or(ValueAccessError::Unknown { id })
    }
}

/// Marker emitted when a snapshot re-enters a value already on its own path.
pub const CYCLE_MARKER: &str = "<circular>";

/// Renders the subgraph rooted at `id` to a [`serde_json::Value`].
///
/// Used for the payloads carried inside difference nodes and for report
/// output. Cycles are cut with [`CYCLE_MARKER`]; non-finite floats render as
/// JSON null. Maps render as objects keyed by [`key_string`], sets as arrays
/// in storage order.
///
/// # Errors
///
/// [`ValueAccessError`] if any reachable handle fails to resolve.
pub fn snapshot<S: ValueSource + ?Sized>(
    source: &S,
    id: ValueId,
) -> Result<JsonValue, ValueAccessError> {
    let mut on_path = HashSet::new();
    snapshot_inner(source, id, &mut on_path)
}

fn snapshot_inner<S: ValueSource + ?Sized>(
    source: &S,
    id: ValueId,
    on_path: &mut HashSet<ValueId>,
) -> Result<JsonValue, ValueAccessError> {
    if !on_path.insert(id) {
        return Ok(JsonValue::String(CYCLE_MARKER.to_owned()));
    }
    let rendered = match source.value(id)? {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::Number((*i).into()),
        Value::UnsignedInteger(u) => JsonValue::Number((*u).into()),
        Value::Float(v) => serde_json::Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Array(elements) | Value::Seq(elements) | Value::Set(elements) => {
            let mut out = Vec::with_capacity(elements.len());
            for &e in elements {
                out.push(snapshot_inner(source, e, on_path)?);
            }
            JsonValue::Array(out)
        }
        Value::Map(entries) => {
            let mut out = JsonMap::new();
            for &(k, v) in entries {
                out.insert(key_string(source, k)?, snapshot_inner(source, v, on_path)?);
            }
            JsonValue::Object(out)
        }
        Value::Composite(members) => {
            let mut out = JsonMap::new();
            for (name, v) in members {
                out.insert(name.clone(), snapshot_inner(source, *v, on_path)?);
            }
            JsonValue::Object(out)
        }
    };
    on_path.remove(&id);
    Ok(rendered)
}

/// Renders a value as a path-segment string.
///
/// Scalars use their display form (a string key `"name"` renders as `name`);
/// containers render as compact JSON of their snapshot so that composite map
/// keys still produce a stable, readable segment.
///
/// # Errors
///
/// [`ValueAccessError`] if any reachable handle fails to resolve.
pub fn key_string<S: ValueSource + ?Sized>(
    source: &S,
    id: ValueId,
) -> Result<String, ValueAccessError> {
    match source.value(id)? {
        v @ (Value::Null
        | Value::Bool(_)
        | Value::Integer(_)
        | Value::UnsignedInteger(_)
        | Value::Float(_)
        | Value::String(_)) => Ok(v.to_string()),
        Value::Array(_) | Value::Seq(_) | Value::Set(_) | Value::Map(_) | Value::Composite(_) => {
            let rendered = snapshot(source, id)?;
            Ok(rendered.to_string())
        }
    }
}
