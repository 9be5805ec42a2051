//! Structural difference engine.
//!
//! Compares two value graphs under a [`ModeSet`] and produces a navigable
//! [`Difference`] tree pinpointing every divergence by field path, or `None`
//! when the graphs are structurally equal.
//!
//! # Scope
//!
//! - Shape classification of both sides before every descent.
//! - Identity-keyed traversal guard: cycles terminate, shared references
//!   reuse previously computed outcomes.
//! - Positional comparison for ordered containers, greedy best-cost pairing
//!   for unordered ones (and for ordered ones under lenient order).
//! - Structural map-key reconciliation: two keys are the same key when this
//!   engine finds them equal, never when their own equality says so.
//! - Ignore-defaults mode with a strict no-evaluation guarantee for the
//!   right operand of a short-circuited branch.

mod classify;
mod engine;
mod guard;
mod matching;
mod types;

#[cfg(test)]
mod tests;

pub use classify::{Kind, classify};
pub use engine::{compare, compare_labeled};
pub use types::{CompareError, DiffCursor, Difference, LeafRef, ModeSet};
