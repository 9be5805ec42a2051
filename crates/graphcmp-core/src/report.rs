//! Rendering and assertion adapters over a [`Difference`] tree.
//!
//! The engine reports every leaf, not just the first: a composite with three
//! differing members produces three lines.

use std::fmt;

use serde_json::Value as JsonValue;

use crate::diff::{CompareError, Difference, ModeSet, compare_labeled};
use crate::value::{ValueId, ValueSource};

/// Renders one line per leaf difference: field path, left value, right value.
pub fn render(diff: &Difference) -> String {
    let mut out = String::new();
    for leaf in diff.leaves() {
        let path = leaf.path_string();
        let path = if path.is_empty() { "(root)" } else { path.as_str() };
        out.push_str(&format!(
            "{path}: expected {} but found {}\n",
            render_side(&leaf.node.left),
            render_side(&leaf.node.right),
        ));
    }
    out
}

/// Renders the one-line summary: leaf count and the first differing path.
pub fn summary(diff: &Difference) -> String {
    let leaves = diff.leaves();
    let first = leaves
        .first()
        .map(|l| l.path_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "(root)".to_owned());
    format!("{} difference(s), first at {first}", leaves.len())
}

fn render_side(value: &Option<JsonValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<absent>".to_owned(),
    }
}

/// Assertion failure carrying the full rendered report.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphMismatch {
    /// The comparison label, if one was supplied.
    pub label: String,
    /// The difference tree that caused the failure.
    pub difference: Difference,
}

impl fmt::Display for GraphMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            writeln!(f, "graphs differ:")?;
        } else {
            writeln!(f, "graphs differ ({}):", self.label)?;
        }
        write!(f, "{}", render(&self.difference))
    }
}

impl std::error::Error for GraphMismatch {}

/// Outcome of [`assert_graphs_eq`]: either the graphs match, the comparison
/// itself failed, or the graphs differ.
#[derive(Debug)]
pub enum AssertError {
    /// Introspection failed before a verdict was reached.
    Compare(CompareError),
    /// The graphs are not structurally equal.
    Mismatch(Box<GraphMismatch>),
}

impl fmt::Display for AssertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertError::Compare(e) => write!(f, "{e}"),
            AssertError::Mismatch(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for AssertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssertError::Compare(e) => Some(e),
            AssertError::Mismatch(m) => Some(m.as_ref()),
        }
    }
}

/// Compares two graphs and fails with a rendered report when they differ.
///
/// # Errors
///
/// [`AssertError::Mismatch`] when the graphs differ;
/// [`AssertError::Compare`] when a handle fails to resolve.
pub fn assert_graphs_eq<S: ValueSource + ?Sized>(
    source: &S,
    left: ValueId,
    right: ValueId,
    modes: ModeSet,
    label: &str,
) -> Result<(), AssertError> {
    match compare_labeled(source, left, right, modes, label) {
        Ok(None) => Ok(()),
        Ok(Some(difference)) => Err(AssertError::Mismatch(Box::new(GraphMismatch {
            label: label.to_owned(),
            difference,
        }))),
        Err(e) => Err(AssertError::Compare(e)),
    }
}
