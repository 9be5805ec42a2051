#![allow(clippy::expect_used)]

mod order_tests;

use crate::value::{ValueGraph, ValueId};

pub(crate) fn composite(g: &mut ValueGraph, members: &[(&str, ValueId)]) -> ValueId {
    let members = members
        .iter()
        .map(|&(name, id)| (name.to_owned(), id))
        .collect();
    g.composite(members)
}

pub(crate) fn string_ids(g: &mut ValueGraph, values: &[&str]) -> Vec<ValueId> {
    values.iter().map(|&s| g.string(s)).collect()
}

pub(crate) fn str_seq(g: &mut ValueGraph, values: &[&str]) -> ValueId {
    let ids = string_ids(g, values);
    g.seq(ids)
}

pub(crate) fn int_seq(g: &mut ValueGraph, values: &[i64]) -> ValueId {
    let ids: Vec<ValueId> = values.iter().map(|&i| g.integer(i)).collect();
    g.seq(ids)
}

pub(crate) fn str_set(g: &mut ValueGraph, values: &[&str]) -> ValueId {
    let ids = string_ids(g, values);
    g.set(ids)
}

/// A two-member composite, the shape used throughout the engine tests.
pub(crate) fn pair_composite(g: &mut ValueGraph, string1: &str, string2: &str) -> ValueId {
    let s1 = g.string(string1);
    let s2 = g.string(string2);
    composite(g, &[("string1", s1), ("string2", s2)])
}
