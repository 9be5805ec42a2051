use std::collections::HashMap;

use crate::value::ValueId;

/// Final verdict for a fully compared pair of references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PairOutcome {
    /// The pair compared equal.
    Equal,
    /// The pair compared not equal.
    NotEqual,
}

/// What the engine should do with a pair it is about to descend into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GuardCheck {
    /// Treat as equal without descending: the pair already resolved equal,
    /// or is still on the active recursion path (the optimistic cycle
    /// break — true equality of a cyclic structure is validated by the rest
    /// of the graph).
    AlreadyEqual,
    /// Produce a values-differ leaf without descending.
    AlreadyNotEqual,
    /// Fresh pair, now registered as in progress; descend and finalize with
    /// [`TraversalGuard::leave`].
    Proceed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairState {
    InProgress,
    Done(PairOutcome),
}

/// Identity-keyed registry of reference pairs under comparison.
///
/// Keys are handle pairs, never structural hashes: structural equality is
/// exactly what is being computed, and structurally hashing a possibly
/// cyclic graph is itself unsafe. One registry lives for exactly one
/// top-level comparison; it is never shared across calls.
///
/// Termination: every reference pair is descended into at most once, so a
/// traversal over cyclic or shared-reference graphs always completes.
#[derive(Debug, Default)]
pub(super) struct TraversalGuard {
    seen: HashMap<(ValueId, ValueId), PairState>,
}

impl TraversalGuard {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Checks a pair before descent, registering it as in progress when
    /// unseen. Only container kinds go through the guard; identity is
    /// meaningless for immutable scalars.
    pub(super) fn enter(&mut self, left: ValueId, right: ValueId) -> GuardCheck {
        match self.seen.get(&(left, right)) {
            Some(PairState::InProgress) | Some(PairState::Done(PairOutcome::Equal)) => {
                GuardCheck::AlreadyEqual
            }
            Some(PairState::Done(PairOutcome::NotEqual)) => GuardCheck::AlreadyNotEqual,
            None => {
                self.seen.insert((left, right), PairState::InProgress);
                GuardCheck::Proceed
            }
        }
    }

    /// Finalizes a pair previously entered with [`GuardCheck::Proceed`]. The
    /// outcome is reused when the same identity pair recurs elsewhere in the
    /// graph.
    pub(super) fn leave(&mut self, left: ValueId, right: ValueId, outcome: PairOutcome) {
        self.seen.insert((left, right), PairState::Done(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ValueId {
        // Handles are opaque outside the value module; round-trip through a
        // throwaway graph to mint them.
        let mut g = crate::value::ValueGraph::new();
        let mut last = g.null();
        for _ in 0..n {
            last = g.null();
        }
        last
    }

    #[test]
    fn fresh_pair_proceeds_then_replays_outcome() {
        let (a, b) = (id(0), id(1));
        let mut guard = TraversalGuard::new();
        assert_eq!(guard.enter(a, b), GuardCheck::Proceed);
        guard.leave(a, b, PairOutcome::NotEqual);
        assert_eq!(guard.enter(a, b), GuardCheck::AlreadyNotEqual);
    }

    #[test]
    fn in_progress_pair_reads_as_equal() {
        let (a, b) = (id(0), id(1));
        let mut guard = TraversalGuard::new();
        assert_eq!(guard.enter(a, b), GuardCheck::Proceed);
        // Revisited while still on the recursion path: the cycle break.
        assert_eq!(guard.enter(a, b), GuardCheck::AlreadyEqual);
        guard.leave(a, b, PairOutcome::Equal);
        assert_eq!(guard.enter(a, b), GuardCheck::AlreadyEqual);
    }

    #[test]
    fn pairs_are_directional() {
        let (a, b) = (id(0), id(1));
        let mut guard = TraversalGuard::new();
        assert_eq!(guard.enter(a, b), GuardCheck::Proceed);
        assert_eq!(guard.enter(b, a), GuardCheck::Proceed);
    }
}
