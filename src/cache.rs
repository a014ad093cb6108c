//! Per-thread cache ring used by [`crate::IdPool`]'s fast path.
//!
//! Structurally this is a small fixed-capacity [`Ring`](crate::ring::Ring)
//! with the slot array stored inline rather than boxed, the same relation
//! the teacher's `StackRing<T, N>` bears to its heap-backed `Ring<T>`:
//! same CAS core (here literally the same functions, from `slot.rs`),
//! different storage. Inlining keeps a thread's cache colocated in one
//! allocation with no extra indirection on the hot path.

use crate::invariants::debug_assert_bounded_count;
use crate::slot::{try_dequeue, try_enqueue, Slot};
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicU32, Ordering};

/// Capacity of each per-thread [`Cache`], taken from OVS's
/// `seq_pool`/`SEQPOOL_C_SIZE` (see `SPEC_FULL.md`).
pub(crate) const CACHE_CAP: u32 = 32;

/// A small lock-free MPMC ring, sized [`CACHE_CAP`], stealable by any
/// thread but intended to be produced/consumed mostly by its owner.
pub(crate) struct Cache {
    nodes: [Slot; CACHE_CAP as usize],
    head: CachePadded<AtomicU32>,
    tail: CachePadded<AtomicU32>,
}

impl Cache {
    const MASK: u32 = CACHE_CAP - 1;

    pub(crate) fn new() -> Self {
        Self {
            nodes: std::array::from_fn(|i| Slot::new(i as u32)),
            head: CachePadded::new(AtomicU32::new(0)),
            tail: CachePadded::new(AtomicU32::new(0)),
        }
    }

    pub(crate) fn try_enqueue(&self, id: u32) -> bool {
        let ok = try_enqueue(&self.nodes, Self::MASK, &self.head, id);
        if ok {
            debug_assert_bounded_count!(
                self.head.load(Ordering::Relaxed),
                self.tail.load(Ordering::Relaxed),
                CACHE_CAP
            );
        }
        ok
    }

    pub(crate) fn try_dequeue(&self) -> Option<u32> {
        let result = try_dequeue(&self.nodes, Self::MASK, &self.tail);
        if result.is_some() {
            debug_assert_bounded_count!(
                self.head.load(Ordering::Relaxed),
                self.tail.load(Ordering::Relaxed),
                CACHE_CAP
            );
        }
        result
    }

    pub(crate) fn len(&self) -> u32 {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        head.wrapping_sub(tail)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pops every currently available ID into `buf`, in FIFO order.
    ///
    /// Used by [`crate::idpool::IdPool::free`]'s overflow path to empty a
    /// full cache before splicing its contents (plus the newly freed id)
    /// into the pool's shared `free_ids`.
    pub(crate) fn drain_into(&self, buf: &mut Vec<u32>) {
        while let Some(id) = self.try_dequeue() {
            buf.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_to_cap_and_drains() {
        let cache = Cache::new();
        for i in 0..CACHE_CAP {
            assert!(cache.try_enqueue(i));
        }
        assert!(!cache.try_enqueue(999));
        for i in 0..CACHE_CAP {
            assert_eq!(cache.try_dequeue(), Some(i));
        }
        assert_eq!(cache.try_dequeue(), None);
    }

    #[test]
    fn len_tracks_occupancy() {
        let cache = Cache::new();
        assert!(cache.is_empty());
        cache.try_enqueue(1);
        cache.try_enqueue(2);
        assert_eq!(cache.len(), 2);
        cache.try_dequeue();
        assert_eq!(cache.len(), 1);
    }
}
