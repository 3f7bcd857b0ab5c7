use std::collections::HashMap;
use std::rc::Rc;

use crate::expression::Expr;

/// A pooled expression together with its creation tag. Tags increase
/// monotonically across the whole search; the scheduler compares them
/// against the current wave window to pick the combination rule.
pub(crate) struct PoolEntry {
    pub seq: usize,
    pub expr: Rc<Expr>,
}

/// The growing set of derived expressions, partitioned by usage bitmask.
/// Entries are appended in creation order and never removed; segments are
/// only appended to between waves, never during one.
#[derive(Default)]
pub(crate) struct ExprPool {
    segments: HashMap<u64, Vec<PoolEntry>>,
}

impl ExprPool {
    pub fn insert(&mut self, seq: usize, expr: Rc<Expr>) {
        self.segments
            .entry(expr.usage())
            .or_default()
            .push(PoolEntry { seq, expr });
    }

    /// All expressions consuming exactly the inputs in `mask`.
    pub fn segment(&self, mask: u64) -> &[PoolEntry] {
        self.segments.get(&mask).map_or(&[], Vec::as_slice)
    }
}

/// Iterator over every non-empty submask of `rest`, i.e. every usage mask
/// disjoint from a given expression's usage.
pub(crate) fn submasks(rest: u64) -> Submasks {
    Submasks { rest, cur: rest }
}

pub(crate) struct Submasks {
    rest: u64,
    cur: u64,
}

impl Iterator for Submasks {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.cur == 0 {
            return None;
        }
        let mask = self.cur;
        self.cur = (mask - 1) & self.rest;
        Some(mask)
    }
}
