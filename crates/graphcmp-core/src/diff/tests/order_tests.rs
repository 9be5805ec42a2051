use serde_json::json;

use crate::diff::{ModeSet, compare};
use crate::value::ValueGraph;

use super::{int_seq, str_seq, str_set, string_ids};

/// A pure size mismatch short-circuits: both full sequences, no children.
#[test]
fn size_mismatch_short_circuits() {
    let mut g = ValueGraph::new();
    let l = int_seq(&mut g, &[1, 2, 3]);
    let r = int_seq(&mut g, &[1, 2]);
    let d = compare(&g, l, r, ModeSet::strict())
        .expect("compare")
        .expect("differs");
    assert!(d.is_leaf(), "no per-index children on size mismatch");
    assert_eq!(d.left, Some(json!([1, 2, 3])));
    assert_eq!(d.right, Some(json!([1, 2])));
}

/// Strict ordering compares positionally and keys children by index.
#[test]
fn strict_order_reports_index_leaves() {
    let mut g = ValueGraph::new();
    let l = str_seq(&mut g, &["el1", "el2", "el3"]);
    let r = str_seq(&mut g, &["el3", "el1", "el2"]);
    let d = compare(&g, l, r, ModeSet::strict())
        .expect("compare")
        .expect("rotation differs under strict order");
    let first = d.inner("0").expect("difference at index 0");
    assert_eq!(first.left, Some(json!("el1")));
    assert_eq!(first.right, Some(json!("el3")));
    assert_eq!(d.children.len(), 3, "every rotated index differs");
}

/// The same rotation is equal under lenient order.
#[test]
fn lenient_order_accepts_permutations() {
    let mut g = ValueGraph::new();
    let l = str_seq(&mut g, &["el1", "el2", "el3"]);
    let r = str_seq(&mut g, &["el3", "el1", "el2"]);
    let result = compare(&g, l, r, ModeSet::strict().with_lenient_order()).expect("compare");
    assert!(result.is_none());
}

/// Lenient order still reports the residual pair once zero-cost matches are
/// taken, keyed by match order rather than input position.
#[test]
fn lenient_order_reports_residual_pair() {
    let mut g = ValueGraph::new();
    let l = str_seq(&mut g, &["a", "b", "x"]);
    let r = str_seq(&mut g, &["b", "a", "y"]);
    let d = compare(&g, l, r, ModeSet::strict().with_lenient_order())
        .expect("compare")
        .expect("x vs y remains");
    assert_eq!(d.children.len(), 1);
    let residual = d.inner("0").expect("single residual pair");
    assert_eq!(residual.left, Some(json!("x")));
    assert_eq!(residual.right, Some(json!("y")));
}

/// Unordered collections ignore order even in strict mode.
#[test]
fn sets_are_always_unordered() {
    let mut g = ValueGraph::new();
    let l = str_set(&mut g, &["el1", "el2", "el3"]);
    let r = str_set(&mut g, &["el3", "el1", "el2"]);
    let result = compare(&g, l, r, ModeSet::strict()).expect("compare");
    assert!(result.is_none());
}

/// Sequence against fixed-size array reconciles element-wise.
#[test]
fn sequence_reconciles_with_array() {
    let mut g = ValueGraph::new();
    let l = str_seq(&mut g, &["a", "b"]);
    let ids = string_ids(&mut g, &["a", "b"]);
    let r = g.array(ids);
    let result = compare(&g, l, r, ModeSet::strict()).expect("compare");
    assert!(result.is_none());
}

/// Arrays of numbers with differing widths compare by numeric value.
#[test]
fn numeric_arrays_tolerate_width_differences() {
    let mut g = ValueGraph::new();
    let l_ids = vec![g.integer(1), g.integer(2)];
    let l = g.array(l_ids);
    let r_ids = vec![g.float(1.0), g.float(2.0)];
    let r = g.array(r_ids);
    let result = compare(&g, l, r, ModeSet::strict()).expect("compare");
    assert!(result.is_none());
}

/// A set against a sequence is a hard mismatch, not an element comparison.
#[test]
fn set_vs_sequence_is_hard_mismatch() {
    let mut g = ValueGraph::new();
    let l = str_set(&mut g, &["a"]);
    let r = str_seq(&mut g, &["a"]);
    let d = compare(&g, l, r, ModeSet::strict())
        .expect("compare")
        .expect("differs");
    assert!(d.is_leaf());
}

/// Element differences in strict order leave equal indices out of the tree.
#[test]
fn strict_order_only_reports_differing_indices() {
    let mut g = ValueGraph::new();
    let l = int_seq(&mut g, &[1, 2, 3]);
    let r = int_seq(&mut g, &[1, 9, 3]);
    let d = compare(&g, l, r, ModeSet::strict())
        .expect("compare")
        .expect("differs");
    assert_eq!(d.children.len(), 1);
    let child = d.inner("1").expect("index 1 differs");
    assert_eq!(child.left, Some(json!(2)));
    assert_eq!(child.right, Some(json!(9)));
    assert!(d.inner("0").is_none());
    assert!(d.inner("2").is_none());
}

/// Size mismatch short-circuits for unordered collections too.
#[test]
fn set_size_mismatch_short_circuits() {
    let mut g = ValueGraph::new();
    let l = str_set(&mut g, &["a", "b"]);
    let r = str_set(&mut g, &["a"]);
    let d = compare(&g, l, r, ModeSet::strict())
        .expect("compare")
        .expect("differs");
    assert!(d.is_leaf());
    assert_eq!(d.left, Some(json!(["a", "b"])));
    assert_eq!(d.right, Some(json!(["a"])));
}
