#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Structural comparison engine for dynamic value graphs.
//!
//! Builds arbitrary (possibly cyclic, possibly heterogeneous) value graphs
//! in a [`ValueGraph`] arena and compares them under configurable semantics:
//! strict field-by-field equality, order-insensitive collection matching,
//! and ignore-defaults matching. A comparison returns `None` for equal
//! graphs or a [`Difference`] tree naming every divergence by field path.

pub mod diff;
pub mod report;
pub mod value;

pub use diff::{
    CompareError, DiffCursor, Difference, Kind, LeafRef, ModeSet, classify, compare,
    compare_labeled,
};
pub use report::{AssertError, GraphMismatch, assert_graphs_eq, render, summary};
pub use value::{
    CYCLE_MARKER, Value, ValueAccessError, ValueGraph, ValueId, ValueSource, key_string, snapshot,
};

/// Returns the current version of the graphcmp-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
