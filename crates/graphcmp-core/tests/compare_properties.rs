//! Property-based algebraic tests for the comparison engine.
//!
//! Verifies reflexivity, verdict symmetry, permutation invariance under
//! lenient order, and determinism over proptest-generated JSON-like graphs.
#![allow(clippy::expect_used)]

use graphcmp_core::{ModeSet, ValueGraph, compare};
use proptest::prelude::*;
use serde_json::Value as JsonValue;

/// Small JSON documents: scalars, arrays, objects, nested a few levels deep.
fn json_doc() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(|i| JsonValue::Number(i.into())),
        "[a-z]{0,8}".prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| JsonValue::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    /// Two independent builds of the same document always compare equal,
    /// strict or lenient.
    #[test]
    fn reflexive_over_independent_copies(doc in json_doc()) {
        let mut g = ValueGraph::new();
        let l = g.from_json(&doc);
        let r = g.from_json(&doc);
        prop_assert!(compare(&g, l, r, ModeSet::strict()).expect("compare").is_none());
        prop_assert!(
            compare(&g, l, r, ModeSet::strict().with_lenient_order())
                .expect("compare")
                .is_none()
        );
    }

    /// Without ignore-defaults the equal/not-equal verdict is symmetric
    /// (the reported values are not; the verdict is).
    #[test]
    fn verdict_is_symmetric(a in json_doc(), b in json_doc()) {
        let mut g = ValueGraph::new();
        let l = g.from_json(&a);
        let r = g.from_json(&b);
        for modes in [ModeSet::strict(), ModeSet::strict().with_lenient_order()] {
            let forward = compare(&g, l, r, modes).expect("compare").is_none();
            let backward = compare(&g, r, l, modes).expect("compare").is_none();
            prop_assert_eq!(forward, backward, "modes {:?}", modes);
        }
    }

    /// Rotating a sequence never changes the verdict under lenient order.
    #[test]
    fn lenient_order_ignores_rotation(
        elements in prop::collection::vec(json_doc(), 0..5),
        rotation in 0usize..5,
    ) {
        let mut g = ValueGraph::new();
        let l_ids: Vec<_> = elements.iter().map(|e| g.from_json(e)).collect();
        let l = g.seq(l_ids);
        let mut rotated = elements.clone();
        if !rotated.is_empty() {
            let len = rotated.len();
            rotated.rotate_left(rotation % len);
        }
        let r_ids: Vec<_> = rotated.iter().map(|e| g.from_json(e)).collect();
        let r = g.seq(r_ids);
        let result = compare(&g, l, r, ModeSet::strict().with_lenient_order())
            .expect("compare");
        prop_assert!(result.is_none());
    }

    /// Identical inputs reproduce the identical difference tree.
    #[test]
    fn comparison_is_deterministic(a in json_doc(), b in json_doc()) {
        let mut g = ValueGraph::new();
        let l = g.from_json(&a);
        let r = g.from_json(&b);
        let first = compare(&g, l, r, ModeSet::strict()).expect("compare");
        let second = compare(&g, l, r, ModeSet::strict()).expect("compare");
        prop_assert_eq!(first, second);
    }

    /// A default left always matches under ignore-defaults, whatever the
    /// right side is.
    #[test]
    fn default_left_matches_anything(right_doc in json_doc()) {
        let mut g = ValueGraph::new();
        let l = g.null();
        let r = g.from_json(&right_doc);
        let result = compare(&g, l, r, ModeSet::strict().with_ignore_defaults())
            .expect("compare");
        prop_assert!(result.is_none());
    }
}
