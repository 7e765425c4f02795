//! Sparse rune→byte index, amortising the Walker's positional lookups.
//!
//! Every `stride`-th rune index gets a cached byte offset. A mutation at
//! rune `k` invalidates every cached entry at or past `k`; the cache is
//! rebuilt lazily the next time a query walks past the invalidated tail.

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct OffsetCache {
    stride: usize,
    entries: BTreeMap<usize, usize>,
}

impl OffsetCache {
    pub fn new(stride: usize) -> Self {
        Self {
            stride: stride.max(1),
            entries: BTreeMap::new(),
        }
    }

    /// Record that rune `rune_pos` lives at `byte_pos`, if it falls on a
    /// cache stride boundary.
    pub fn record(&mut self, rune_pos: usize, byte_pos: usize) {
        if rune_pos % self.stride == 0 {
            self.entries.insert(rune_pos, byte_pos);
        }
    }

    /// Drop every cached entry at or beyond `rune_pos`; called on every
    /// insert/delete at that position since byte offsets past it shift.
    pub fn invalidate_from(&mut self, rune_pos: usize) {
        let tail: Vec<usize> = self.entries.range(rune_pos..).map(|(&k, _)| k).collect();
        for k in tail {
            self.entries.remove(&k);
        }
    }

    /// The closest cached entry at or before `rune_pos`, for the Walker to
    /// resume a linear scan from instead of starting at rune 0.
    pub fn nearest_at_or_before(&self, rune_pos: usize) -> Option<(usize, usize)> {
        self.entries.range(..=rune_pos).next_back().map(|(&k, &v)| (k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for OffsetCache {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
#[path = "offset_cache_tests.rs"]
mod tests;
