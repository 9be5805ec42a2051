use crate::value::{ValueId, ValueSource};

use super::engine::{Comparator, wrap};
use super::types::{CompareError, Difference};

/// One potential pairing of a left element with a right element.
struct Candidate {
    /// Count of leaf differences in `diff`; 0 is a perfect match.
    cost: usize,
    left_index: usize,
    right_index: usize,
    diff: Option<Difference>,
}

/// Best-effort one-to-one matching of two unordered element lists.
///
/// Size mismatch short-circuits to a leaf with both full collections — a
/// pure size difference is never partially credited. With equal sizes,
/// every left element is compared against every right element (an O(n²)
/// matrix; fixture-sized inputs make this acceptable) and pairs are
/// assigned greedily by lowest cost. Ties prefer the earliest left element,
/// then the earliest right element, so identical inputs always reproduce
/// the identical pairing. The greedy pick is deliberately not a true
/// minimum-cost bipartite assignment; exact-zero costs still make the
/// equal/not-equal verdict exact, and keeping the heuristic keeps reported
/// pairs stable for callers asserting on them.
///
/// Matched pairs with differences become children keyed by a match-order
/// index; the index is a stable key only, not a position in either input.
pub(super) fn match_unordered<S: ValueSource + ?Sized>(
    cmp: &mut Comparator<'_, S>,
    left: ValueId,
    right: ValueId,
    l_el: &[ValueId],
    r_el: &[ValueId],
) -> Result<Option<Difference>, CompareError> {
    if l_el.len() != r_el.len() {
        return cmp.value_leaf(left, right).map(Some);
    }
    let n = l_el.len();
    if n == 0 {
        return Ok(None);
    }

    let mut candidates = Vec::with_capacity(n * n);
    for (left_index, &l) in l_el.iter().enumerate() {
        for (right_index, &r) in r_el.iter().enumerate() {
            let diff = cmp.compare_ids(l, r)?;
            let cost = diff.as_ref().map_or(0, Difference::leaf_count);
            candidates.push(Candidate {
                cost,
                left_index,
                right_index,
                diff,
            });
        }
    }

    // Scanning the sorted matrix and skipping consumed rows/columns is the
    // greedy lowest-cost-first assignment with the documented tie-break.
    candidates.sort_by_key(|c| (c.cost, c.left_index, c.right_index));

    let mut left_used = vec![false; n];
    let mut right_used = vec![false; n];
    let mut children = Vec::new();
    for candidate in candidates {
        if left_used[candidate.left_index] || right_used[candidate.right_index] {
            continue;
        }
        left_used[candidate.left_index] = true;
        right_used[candidate.right_index] = true;
        if let Some(mut d) = candidate.diff {
            d.field = children.len().to_string();
            children.push(d);
        }
    }
    Ok(wrap(children))
}
