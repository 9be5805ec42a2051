use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::value::ValueAccessError;

/// Comparison modes, threaded unchanged through every recursive call.
///
/// A mode set is an immutable value for the duration of one top-level
/// comparison. The strict default compares ordered containers positionally
/// and treats every left-hand value as significant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModeSet {
    /// Treat ordered sequences and arrays as unordered multisets, matched by
    /// best-effort pairing. Unordered collections ignore this flag; they are
    /// always matched.
    pub lenient_order: bool,
    /// Treat a default left-hand value (null, numeric zero, `false`, empty
    /// string, empty container) as matching anything on the right. The right
    /// operand is not resolved on such a branch.
    pub ignore_defaults: bool,
}

impl ModeSet {
    /// Strict comparison: positional order, all values significant.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Enables lenient ordering.
    pub fn with_lenient_order(mut self) -> Self {
        self.lenient_order = true;
        self
    }

    /// Enables ignore-defaults matching.
    pub fn with_ignore_defaults(mut self) -> Self {
        self.ignore_defaults = true;
        self
    }
}

/// A node in the difference tree.
///
/// A node exists only where the two sides are not equal under the active
/// [`ModeSet`], or as an intermediate wrapper hosting child differences.
/// Leaves always carry the concretely differing values as snapshots; `None`
/// on one side means the value is absent there entirely (a missing member,
/// map entry, or collection element). Children appear in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    /// Path segment naming this comparison point: a member name, an index,
    /// or a map key in string form. Empty at the root unless the caller
    /// supplied a label.
    pub field: String,
    /// Snapshot of the left value, or `None` if absent on the left.
    pub left: Option<JsonValue>,
    /// Snapshot of the right value, or `None` if absent on the right.
    pub right: Option<JsonValue>,
    /// Child differences in the order they were encountered.
    pub children: Vec<Difference>,
}

impl Difference {
    /// A leaf difference carrying the two diverging values.
    pub fn leaf(field: impl Into<String>, left: Option<JsonValue>, right: Option<JsonValue>) -> Self {
        Self {
            field: field.into(),
            left,
            right,
            children: Vec::new(),
        }
    }

    /// An intermediate node hosting child differences.
    pub fn parent(field: impl Into<String>, children: Vec<Difference>) -> Self {
        Self {
            field: field.into(),
            left: None,
            right: None,
            children,
        }
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// One level of child lookup by path segment.
    ///
    /// Composing lookups is how callers navigate:
    /// `diff.inner("a").and_then(|d| d.inner("b"))`.
    pub fn inner(&self, segment: &str) -> Option<&Difference> {
        self.children.iter().find(|c| c.field == segment)
    }

    /// Number of leaf nodes in this subtree. Used as the match cost by the
    /// pair matcher: fewer leaves means a closer match.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Difference::leaf_count).sum()
        }
    }

    /// All leaves of this subtree with their root-relative field paths, in
    /// traversal order. The walk drives an explicit stack rather than
    /// recursion so arbitrarily deep trees cannot exhaust the call stack.
    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        let mut out = Vec::new();
        // (node, segments-from-root, next child to visit)
        let mut stack: Vec<(&Difference, usize)> = vec![(self, 0)];
        let mut path: Vec<&str> = Vec::new();
        while let Some((node, next)) = stack.pop() {
            if node.is_leaf() {
                let mut segments: Vec<&str> = path.clone();
                if !node.field.is_empty() {
                    segments.push(node.field.as_str());
                }
                out.push(LeafRef {
                    path: segments,
                    node,
                });
                continue;
            }
            if next == 0 && !node.field.is_empty() {
                path.push(node.field.as_str());
            }
            if let Some(child) = node.children.get(next) {
                stack.push((node, next + 1));
                stack.push((child, 0));
            } else if !node.field.is_empty() {
                path.pop();
            }
        }
        out
    }
}

/// A leaf difference paired with its field path from the tree root.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafRef<'a> {
    /// Path segments from the root to the leaf, root label included when set.
    pub path: Vec<&'a str>,
    /// The leaf node.
    pub node: &'a Difference,
}

impl LeafRef<'_> {
    /// The field path joined by `.`.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

/// Read-only navigation cursor that carries the root-to-node segment stack.
///
/// [`Difference::inner`] alone cannot answer "what is the path of this
/// node" because child nodes hold no parent links; the cursor accumulates
/// segments as it descends.
#[derive(Debug, Clone)]
pub struct DiffCursor<'a> {
    node: &'a Difference,
    stack: Vec<&'a str>,
}

impl<'a> DiffCursor<'a> {
    /// Starts a cursor at a tree root.
    pub fn root(node: &'a Difference) -> Self {
        let mut stack = Vec::new();
        if !node.field.is_empty() {
            stack.push(node.field.as_str());
        }
        Self { node, stack }
    }

    /// The node under the cursor.
    pub fn node(&self) -> &'a Difference {
        self.node
    }

    /// Descends one level by path segment.
    pub fn inner(&self, segment: &str) -> Option<DiffCursor<'a>> {
        let child = self.node.inner(segment)?;
        let mut stack = self.stack.clone();
        stack.push(child.field.as_str());
        Some(DiffCursor { node: child, stack })
    }

    /// Path segments from the root to the current node.
    pub fn field_stack(&self) -> &[&'a str] {
        &self.stack
    }

    /// The field stack joined by `.`.
    pub fn field_stack_string(&self) -> String {
        self.stack.join(".")
    }
}

/// Error produced by a comparison run.
///
/// A found difference is a result, never an error; the only failure mode is
/// introspection: a value handle that cannot be resolved. The comparison
/// either completes fully or fails before returning any partial tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// A value handle failed to resolve while the engine was traversing.
    Introspection(ValueAccessError),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Introspection(e) => write!(f, "introspection failed: {e}"),
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::Introspection(e) => Some(e),
        }
    }
}

impl From<ValueAccessError> for CompareError {
    fn from(e: ValueAccessError) -> Self {
        CompareError::Introspection(e)
    }
}
