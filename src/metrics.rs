//! Optional, relaxed-ordering counters for `Ring` and `IdPool`.
//!
//! Mirrors the teacher's `Metrics`/`MetricsSnapshot` pair and its
//! `config.enable_metrics` gate: counters only move when the owning
//! `Ring`/`IdPool` was constructed with metrics enabled, and reading them
//! is always a plain relaxed load (there is no ordering to establish,
//! these are purely observational).

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for a single [`crate::Ring`].
#[derive(Debug, Default)]
pub(crate) struct RingMetrics {
    enqueue_ok: AtomicU64,
    enqueue_full: AtomicU64,
    dequeue_ok: AtomicU64,
    dequeue_empty: AtomicU64,
}

impl RingMetrics {
    pub(crate) fn record_enqueue(&self, ok: bool) {
        if ok {
            self.enqueue_ok.fetch_add(1, Ordering::Relaxed);
        } else {
            self.enqueue_full.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_dequeue(&self, ok: bool) {
        if ok {
            self.dequeue_ok.fetch_add(1, Ordering::Relaxed);
        } else {
            self.dequeue_empty.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> RingMetricsSnapshot {
        RingMetricsSnapshot {
            enqueue_ok: self.enqueue_ok.load(Ordering::Relaxed),
            enqueue_full: self.enqueue_full.load(Ordering::Relaxed),
            dequeue_ok: self.dequeue_ok.load(Ordering::Relaxed),
            dequeue_empty: self.dequeue_empty.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of a [`crate::Ring`]'s counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RingMetricsSnapshot {
    /// Number of `try_enqueue` calls that succeeded.
    pub enqueue_ok: u64,
    /// Number of `try_enqueue` calls that found the ring full.
    pub enqueue_full: u64,
    /// Number of `try_dequeue` calls that succeeded.
    pub dequeue_ok: u64,
    /// Number of `try_dequeue` calls that found the ring empty.
    pub dequeue_empty: u64,
}

/// Live counters for a single [`crate::IdPool`].
#[derive(Debug, Default)]
pub(crate) struct PoolMetrics {
    alloc_fast_hit: AtomicU64,
    alloc_refill_hit: AtomicU64,
    alloc_steal_hit: AtomicU64,
    alloc_exhausted: AtomicU64,
    free_fast: AtomicU64,
    free_overflow: AtomicU64,
}

impl PoolMetrics {
    pub(crate) fn record_fast_hit(&self) {
        self.alloc_fast_hit.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_refill_hit(&self) {
        self.alloc_refill_hit.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_steal_hit(&self) {
        self.alloc_steal_hit.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_exhausted(&self) {
        self.alloc_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_free(&self, overflowed: bool) {
        if overflowed {
            self.free_overflow.fetch_add(1, Ordering::Relaxed);
        } else {
            self.free_fast.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> PoolMetricsSnapshot {
        PoolMetricsSnapshot {
            alloc_fast_hit: self.alloc_fast_hit.load(Ordering::Relaxed),
            alloc_refill_hit: self.alloc_refill_hit.load(Ordering::Relaxed),
            alloc_steal_hit: self.alloc_steal_hit.load(Ordering::Relaxed),
            alloc_exhausted: self.alloc_exhausted.load(Ordering::Relaxed),
            free_fast: self.free_fast.load(Ordering::Relaxed),
            free_overflow: self.free_overflow.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of an [`crate::IdPool`]'s counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolMetricsSnapshot {
    /// Allocations served directly from the calling thread's cache.
    pub alloc_fast_hit: u64,
    /// Allocations served after a refill from `free_ids`/the bump counter.
    pub alloc_refill_hit: u64,
    /// Allocations served by stealing from another thread's cache.
    pub alloc_steal_hit: u64,
    /// Allocations that found every source exhausted.
    pub alloc_exhausted: u64,
    /// Frees that fit directly into the calling thread's cache.
    pub free_fast: u64,
    /// Frees that overflowed into the shared `free_ids` list.
    pub free_overflow: u64,
}
