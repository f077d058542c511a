//! Per-node size cache for memoizing negotiation results.
//!
//! Minimum and maximum sizes are the expensive negotiation queries: each one
//! recurses through the whole subtree. During a single layout pass the same
//! node is queried repeatedly with an identical perpendicular hint, so every
//! tree record carries a [`SizeCache`] — two slots per axis and bound (value
//! plus the hint it was computed for), eight integers in total.
//!
//! # Invalidation
//!
//! Caches are flushed, never updated in place: replacing a part or receiving
//! a child-size-changed notification flushes the affected record and every
//! ancestor (their cached sums are stale too). See `LayoutTree::flush_cache`.
//!
//! Hit/miss accounting lives in [`NegotiationStats`] on the owning tree so
//! cache behavior stays observable from tests and diagnostics.

/// Sentinel stored in cache slots that have not been computed.
pub(crate) const UNCOMPUTED: i32 = -1;

/// Eight-slot min/max size cache keyed by the perpendicular hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeCache {
    cached_min_width: i32,
    min_width_hint: i32,
    cached_min_height: i32,
    min_height_hint: i32,
    cached_max_width: i32,
    max_width_hint: i32,
    cached_max_height: i32,
    max_height_hint: i32,
}

impl SizeCache {
    /// Fresh cache with every slot uncomputed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cached_min_width: UNCOMPUTED,
            min_width_hint: UNCOMPUTED,
            cached_min_height: UNCOMPUTED,
            min_height_hint: UNCOMPUTED,
            cached_max_width: UNCOMPUTED,
            max_width_hint: UNCOMPUTED,
            cached_max_height: UNCOMPUTED,
            max_height_hint: UNCOMPUTED,
        }
    }

    /// Cached minimum along the axis, if computed for this hint.
    #[must_use]
    pub fn lookup_min(&self, horizontal: bool, hint: i32) -> Option<i32> {
        let (value, stored_hint) = if horizontal {
            (self.cached_min_width, self.min_width_hint)
        } else {
            (self.cached_min_height, self.min_height_hint)
        };
        (value != UNCOMPUTED && stored_hint == hint).then_some(value)
    }

    /// Store a freshly computed minimum for the given hint.
    pub fn store_min(&mut self, horizontal: bool, hint: i32, value: i32) {
        if horizontal {
            self.cached_min_width = value;
            self.min_width_hint = hint;
        } else {
            self.cached_min_height = value;
            self.min_height_hint = hint;
        }
    }

    /// Cached maximum along the axis, if computed for this hint.
    #[must_use]
    pub fn lookup_max(&self, horizontal: bool, hint: i32) -> Option<i32> {
        let (value, stored_hint) = if horizontal {
            (self.cached_max_width, self.max_width_hint)
        } else {
            (self.cached_max_height, self.max_height_hint)
        };
        (value != UNCOMPUTED && stored_hint == hint).then_some(value)
    }

    /// Store a freshly computed maximum for the given hint.
    pub fn store_max(&mut self, horizontal: bool, hint: i32, value: i32) {
        if horizontal {
            self.cached_max_width = value;
            self.max_width_hint = hint;
        } else {
            self.cached_max_height = value;
            self.max_height_hint = hint;
        }
    }

    /// Reset every slot to the uncomputed sentinel.
    pub fn flush(&mut self) {
        *self = Self::new();
    }
}

impl Default for SizeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Hit/miss counters for the size-negotiation caches of one tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NegotiationStats {
    /// Cache lookups answered without recomputation.
    pub hits: u64,
    /// Cache lookups that forced a recursive recomputation.
    pub misses: u64,
}

impl NegotiationStats {
    /// Hit rate as a fraction (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset both counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
