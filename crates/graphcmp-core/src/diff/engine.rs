use crate::value::{Value, ValueId, ValueSource, key_string, snapshot};

use super::classify::{Kind, classify, ordered_pair};
use super::guard::{GuardCheck, PairOutcome, TraversalGuard};
use super::matching::match_unordered;
use super::types::{CompareError, Difference, ModeSet};

/// Compares two value graphs and returns their difference tree, or `None`
/// when they are structurally equal under `modes`.
///
/// The traversal is depth-first and purely functional over its inputs: the
/// graphs are never mutated, and the only per-call state is a fresh
/// traversal-guard registry, so independent calls may run concurrently.
///
/// # Errors
///
/// [`CompareError`] if a value handle fails to resolve. A comparison either
/// completes fully or fails before producing any partial tree.
pub fn compare<S: ValueSource + ?Sized>(
    source: &S,
    left: ValueId,
    right: ValueId,
    modes: ModeSet,
) -> Result<Option<Difference>, CompareError> {
    let mut cmp = Comparator {
        source,
        modes,
        guard: TraversalGuard::new(),
    };
    cmp.compare_ids(left, right)
}

/// Like [`compare`], with a human-readable label naming the comparison root.
///
/// The label becomes the root node's path segment, so every reported field
/// path is prefixed with it.
///
/// # Errors
///
/// See [`compare`].
pub fn compare_labeled<S: ValueSource + ?Sized>(
    source: &S,
    left: ValueId,
    right: ValueId,
    modes: ModeSet,
    label: &str,
) -> Result<Option<Difference>, CompareError> {
    Ok(compare(source, left, right, modes)?.map(|mut d| {
        d.field = label.to_owned();
        d
    }))
}

/// One top-level comparison in flight: the source, the mode set, and the
/// per-call guard registry.
pub(super) struct Comparator<'a, S: ?Sized> {
    source: &'a S,
    modes: ModeSet,
    guard: TraversalGuard,
}

impl<'a, S: ValueSource + ?Sized> Comparator<'a, S> {
    fn resolve(&self, id: ValueId) -> Result<&'a Value, CompareError> {
        self.source.value(id).map_err(CompareError::from)
    }

    /// The recursive core. Returns `None` for equal, a difference node
    /// otherwise; the returned node's own `field` is empty and is filled in
    /// by the caller that knows the path segment.
    pub(super) fn compare_ids(
        &mut self,
        left: ValueId,
        right: ValueId,
    ) -> Result<Option<Difference>, CompareError> {
        // Same reference on both sides, including the root pair.
        if left == right {
            return Ok(None);
        }

        let lv = self.resolve(left)?;

        // Default on the left matches anything. The right handle must not be
        // resolved on this branch: the right side may be lazily computed or
        // access-guarded, and skipping it is the whole point of the mode.
        if self.modes.ignore_defaults && is_default(lv) {
            return Ok(None);
        }

        let rv = self.resolve(right)?;
        let (lk, rk) = (classify(lv), classify(rv));

        if lk == Kind::Null && rk == Kind::Null {
            return Ok(None);
        }
        if lk == Kind::Scalar && rk == Kind::Scalar {
            return if scalars_equal(lv, rv) {
                Ok(None)
            } else {
                self.value_leaf(left, right).map(Some)
            };
        }

        let compatible = ordered_pair(lk, rk)
            || (lk == rk && matches!(lk, Kind::Set | Kind::Map | Kind::Composite));
        if !compatible {
            // Irreconcilable shapes, one-sided null included: a single leaf
            // with both full values and no field path.
            return self.value_leaf(left, right).map(Some);
        }

        match self.guard.enter(left, right) {
            GuardCheck::AlreadyEqual => Ok(None),
            GuardCheck::AlreadyNotEqual => self.value_leaf(left, right).map(Some),
            GuardCheck::Proceed => {
                let result = self.compare_containers(left, right, lv, rv)?;
                let outcome = if result.is_some() {
                    PairOutcome::NotEqual
                } else {
                    PairOutcome::Equal
                };
                self.guard.leave(left, right, outcome);
                Ok(result)
            }
        }
    }

    /// Kind-specific container dispatch, entered only under the guard.
    fn compare_containers(
        &mut self,
        left: ValueId,
        right: ValueId,
        lv: &'a Value,
        rv: &'a Value,
    ) -> Result<Option<Difference>, CompareError> {
        match (lv, rv) {
            (
                Value::Array(l_el) | Value::Seq(l_el),
                Value::Array(r_el) | Value::Seq(r_el),
            ) => self.compare_ordered(left, right, l_el, r_el),
            (Value::Set(l_el), Value::Set(r_el)) => {
                // Order is never meaningful for this kind; lenient_order
                // only affects containers explicitly marked ordered.
                match_unordered(self, left, right, l_el, r_el)
            }
            (Value::Map(l_entries), Value::Map(r_entries)) => {
                self.compare_maps(left, right, l_entries, r_entries)
            }
            (Value::Composite(l_members), Value::Composite(r_members)) => {
                self.compare_composites(l_members, r_members)
            }
            _ => self.value_leaf(left, right).map(Some),
        }
    }

    fn compare_ordered(
        &mut self,
        left: ValueId,
        right: ValueId,
        l_el: &[ValueId],
        r_el: &[ValueId],
    ) -> Result<Option<Difference>, CompareError> {
        // A size mismatch short-circuits: no partial credit, no per-index
        // children, just the two full collections.
        if l_el.len() != r_el.len() {
            return self.value_leaf(left, right).map(Some);
        }
        if self.modes.lenient_order {
            return match_unordered(self, left, right, l_el, r_el);
        }
        let mut children = Vec::new();
        for (index, (&l, &r)) in l_el.iter().zip(r_el).enumerate() {
            if let Some(mut d) = self.compare_ids(l, r)? {
                d.field = index.to_string();
                children.push(d);
            }
        }
        Ok(wrap(children))
    }

    fn compare_maps(
        &mut self,
        left: ValueId,
        right: ValueId,
        l_entries: &[(ValueId, ValueId)],
        r_entries: &[(ValueId, ValueId)],
    ) -> Result<Option<Difference>, CompareError> {
        if l_entries.len() != r_entries.len() {
            return self.value_leaf(left, right).map(Some);
        }
        let mut used = vec![false; r_entries.len()];
        let mut children = Vec::new();
        for &(l_key, l_val) in l_entries {
            // Keys match when this engine finds them structurally equal,
            // under the same mode set; the keys' own equality is never
            // consulted. First unconsumed structural match wins.
            let mut matched = None;
            for (j, &(r_key, r_val)) in r_entries.iter().enumerate() {
                if used[j] {
                    continue;
                }
                if self.compare_ids(l_key, r_key)?.is_none() {
                    matched = Some((j, r_val));
                    break;
                }
            }
            match matched {
                Some((j, r_val)) => {
                    used[j] = true;
                    if let Some(mut d) = self.compare_ids(l_val, r_val)? {
                        d.field = key_string(self.source, l_key)?;
                        children.push(d);
                    }
                }
                None => children.push(Difference::leaf(
                    key_string(self.source, l_key)?,
                    Some(snapshot(self.source, l_val)?),
                    None,
                )),
            }
        }
        for (j, &(r_key, r_val)) in r_entries.iter().enumerate() {
            if !used[j] {
                children.push(Difference::leaf(
                    key_string(self.source, r_key)?,
                    None,
                    Some(snapshot(self.source, r_val)?),
                ));
            }
        }
        Ok(wrap(children))
    }

    fn compare_composites(
        &mut self,
        l_members: &[(String, ValueId)],
        r_members: &[(String, ValueId)],
    ) -> Result<Option<Difference>, CompareError> {
        let mut children = Vec::new();
        for (name, l_member) in l_members {
            match r_members.iter().find(|(r_name, _)| r_name == name) {
                Some(&(_, r_member)) => {
                    if let Some(mut d) = self.compare_ids(*l_member, r_member)? {
                        d.field = name.clone();
                        children.push(d);
                    }
                }
                None => {
                    // Member absent on the right. A default left member still
                    // matches absence under ignore-defaults.
                    if self.modes.ignore_defaults && is_default(self.resolve(*l_member)?) {
                        continue;
                    }
                    children.push(Difference::leaf(
                        name.clone(),
                        Some(snapshot(self.source, *l_member)?),
                        None,
                    ));
                }
            }
        }
        if !self.modes.ignore_defaults {
            // An absent left member is a default left, so right-only members
            // only count in strict modes.
            for (name, r_member) in r_members {
                if !l_members.iter().any(|(l_name, _)| l_name == name) {
                    children.push(Difference::leaf(
                        name.clone(),
                        None,
                        Some(snapshot(self.source, *r_member)?),
                    ));
                }
            }
        }
        Ok(wrap(children))
    }

    /// A leaf carrying full snapshots of both sides and no field path.
    pub(super) fn value_leaf(
        &self,
        left: ValueId,
        right: ValueId,
    ) -> Result<Difference, CompareError> {
        Ok(Difference::leaf(
            "",
            Some(snapshot(self.source, left)?),
            Some(snapshot(self.source, right)?),
        ))
    }
}

/// Wraps a non-empty child list in an intermediate node.
pub(super) fn wrap(children: Vec<Difference>) -> Option<Difference> {
    if children.is_empty() {
        None
    } else {
        Some(Difference::parent("", children))
    }
}

/// Returns `true` for values the ignore-defaults mode treats as "not set":
/// null, numeric zero, `false`, the empty string, and empty containers.
/// A composite is never a default, however empty its member list.
fn is_default(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Integer(i) => *i == 0,
        Value::UnsignedInteger(u) => *u == 0,
        Value::Float(f) => *f == 0.0,
        Value::String(s) => s.is_empty(),
        Value::Array(e) | Value::Seq(e) | Value::Set(e) => e.is_empty(),
        Value::Map(e) => e.is_empty(),
        Value::Composite(_) => false,
    }
}

/// Native equality for primitive-like values.
///
/// Numbers compare by numeric value across the integer/unsigned/float
/// variants, so differing source precisions still compare equal. Floats
/// against floats compare by bit pattern, which makes NaN equal to itself
/// and keeps comparison reflexive.
#[allow(clippy::float_cmp)]
fn scalars_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::UnsignedInteger(x), Value::UnsignedInteger(y)) => x == y,
        (Value::Integer(x), Value::UnsignedInteger(y)) => *x >= 0 && *x as u64 == *y,
        (Value::UnsignedInteger(x), Value::Integer(y)) => *y >= 0 && *x == *y as u64,
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Float(f), Value::Integer(i)) | (Value::Integer(i), Value::Float(f)) => {
            *f == *i as f64
        }
        (Value::Float(f), Value::UnsignedInteger(u))
        | (Value::UnsignedInteger(u), Value::Float(f)) => *f == *u as f64,
        (Value::String(x), Value::String(y)) => x == y,
        _ => false,
    }
}
