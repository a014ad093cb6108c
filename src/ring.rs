//! Bounded lock-free MPMC ring buffer of `u32` payloads.
//!
//! # Memory ordering
//!
//! **Enqueue (producer):**
//! 1. Acquire-load the target slot's `seq`.
//! 2. Relaxed CAS on `head` once the slot is confirmed empty for this
//!    epoch.
//! 3. Plain write of the payload (exclusive access granted by the CAS
//!    win).
//! 4. Release-store the slot's new `seq`, publishing the payload.
//!
//! **Dequeue (consumer):** symmetric, against `tail`.
//!
//! `head`/`tail` themselves only need relaxed ordering: the slot's `seq`
//! is the actual synchronization point (an acquire load pairs with the
//! release store the counterparty performs on the same `seq`), so nothing
//! is gained by making the index CAS itself acquire/release.

use crate::error::RingError;
use crate::invariants::debug_assert_bounded_count;
use crate::metrics::{RingMetrics, RingMetricsSnapshot};
use crate::slot::{try_dequeue, try_enqueue, Slot};
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicU32, Ordering};

/// A bounded lock-free multi-producer multi-consumer queue of `u32`.
///
/// `head` and `tail` are each wrapped in [`CachePadded`] so that the two
/// indices — one written by producers, one by consumers — never share a
/// cache line.
pub struct Ring {
    nodes: Box<[Slot]>,
    mask: u32,
    head: CachePadded<AtomicU32>,
    tail: CachePadded<AtomicU32>,
    metrics: Option<RingMetrics>,
}

impl Ring {
    /// Minimum allowed capacity (spec §4.1: `capacity >= 4`).
    pub const MIN_CAPACITY: u32 = 4;

    /// Creates a ring of the given capacity.
    ///
    /// `capacity` must be a power of two, at least [`Ring::MIN_CAPACITY`].
    /// The backing storage is allocated exactly once, here, and never
    /// resized or reallocated for the lifetime of the `Ring` — the Rust
    /// rendering of spec §3's "storage is caller-owned; Ring never
    /// allocates" (ownership belongs to whoever holds this `Ring` value).
    pub fn new(capacity: u32) -> Result<Self, RingError> {
        Self::with_metrics(capacity, false)
    }

    /// As [`Ring::new`], additionally enabling the optional counters
    /// returned by [`Ring::metrics`].
    pub fn with_metrics(capacity: u32, enable_metrics: bool) -> Result<Self, RingError> {
        if capacity < Self::MIN_CAPACITY {
            return Err(RingError::TooSmall(capacity));
        }
        if !capacity.is_power_of_two() {
            return Err(RingError::NotPowerOfTwo(capacity));
        }

        let nodes: Box<[Slot]> = (0..capacity).map(Slot::new).collect();

        Ok(Self {
            nodes,
            mask: capacity - 1,
            head: CachePadded::new(AtomicU32::new(0)),
            tail: CachePadded::new(AtomicU32::new(0)),
            metrics: enable_metrics.then(RingMetrics::default),
        })
    }

    /// Returns the ring's fixed capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of items currently in the ring.
    ///
    /// This is a snapshot: under concurrent access it may be stale the
    /// instant it is returned.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        head.wrapping_sub(tail) as usize
    }

    /// Returns true if the ring currently holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the ring currently holds `capacity` items.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Attempts to enqueue `data`. Returns `false` iff the ring was full
    /// at some linearization point during the call.
    pub fn try_enqueue(&self, data: u32) -> bool {
        let ok = try_enqueue(&self.nodes, self.mask, &self.head, data);
        if let Some(m) = &self.metrics {
            m.record_enqueue(ok);
        }
        if ok {
            debug_assert_bounded_count!(
                self.head.load(Ordering::Relaxed),
                self.tail.load(Ordering::Relaxed),
                self.capacity()
            );
        }
        ok
    }

    /// Attempts to dequeue an item. Returns `None` iff the ring was empty
    /// at some linearization point during the call.
    pub fn try_dequeue(&self) -> Option<u32> {
        let result = try_dequeue(&self.nodes, self.mask, &self.tail);
        if let Some(m) = &self.metrics {
            m.record_dequeue(result.is_some());
        }
        if result.is_some() {
            debug_assert_bounded_count!(
                self.head.load(Ordering::Relaxed),
                self.tail.load(Ordering::Relaxed),
                self.capacity()
            );
        }
        result
    }

    /// Returns a snapshot of this ring's counters, or all-zero if metrics
    /// were not enabled at construction.
    #[must_use]
    pub fn metrics(&self) -> RingMetricsSnapshot {
        self.metrics.as_ref().map_or_else(RingMetricsSnapshot::default, RingMetrics::snapshot)
    }
}
