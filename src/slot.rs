//! The Vyukov bounded MPMC slot and its CAS-based enqueue/dequeue core.
//!
//! Shared between [`crate::Ring`] (boxed-slice storage) and
//! [`crate::cache::Cache`] (inline-array storage): both are "a fixed array
//! of `Slot` plus a head/tail pair", differing only in where the array
//! lives. Factoring the CAS loop out once avoids maintaining two copies of
//! the same acquire/release dance, the way `invariants.rs` macros are
//! shared by the teacher's `Ring<T>` and `StackRing<T, N>`.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU32, Ordering};

/// A single ring slot: a sequence number and a 32-bit payload.
///
/// `seq` encodes both occupancy and epoch (see module docs on `Ring`);
/// `data` is read/written without further synchronization because the
/// acquire/release pair on `seq` already establishes a happens-before
/// edge around it.
pub(crate) struct Slot {
    seq: AtomicU32,
    data: UnsafeCell<u32>,
}

// SAFETY: `data` is only read or written by the thread that currently owns
// the slot's epoch (established by winning the head/tail CAS), so handing
// a `Slot` to another thread is sound as long as `u32` itself is `Send`.
unsafe impl Send for Slot {}
unsafe impl Sync for Slot {}

impl Slot {
    /// Creates a slot at its initial (empty) epoch `seq == index`.
    pub(crate) fn new(index: u32) -> Self {
        Self {
            seq: AtomicU32::new(index),
            data: UnsafeCell::new(0),
        }
    }

    /// Exposes the raw epoch counter so tests can pre-seed a ring near a
    /// wraparound boundary without duplicating the CAS loop.
    #[cfg(test)]
    pub(crate) fn seq(&self) -> &AtomicU32 {
        &self.seq
    }
}

/// Attempt to enqueue `data` into `nodes[head & mask]`, advancing `head`.
///
/// Implements spec.md §4.1's enqueue algorithm exactly: acquire-load the
/// slot's `seq`, compare against the producer position, CAS `head`
/// forward on a match, plain-write the payload, then release-store the
/// new `seq` to publish it to a dequeuer.
pub(crate) fn try_enqueue(nodes: &[Slot], mask: u32, head: &AtomicU32, data: u32) -> bool {
    let mut pos = head.load(Ordering::Relaxed);
    loop {
        let slot = &nodes[(pos & mask) as usize];
        let seq = slot.seq.load(Ordering::Acquire);
        let diff = seq.wrapping_sub(pos) as i32;

        if diff == 0 {
            match head.compare_exchange_weak(pos, pos.wrapping_add(1), Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => {
                    // SAFETY: winning this CAS gives exclusive ownership of
                    // this slot's epoch until the release store below.
                    unsafe {
                        *slot.data.get() = data;
                    }
                    slot.seq.store(pos.wrapping_add(1), Ordering::Release);
                    return true;
                }
                Err(actual) => pos = actual,
            }
        } else if diff < 0 {
            return false;
        } else {
            pos = head.load(Ordering::Relaxed);
        }
    }
}

/// Attempt to dequeue from `nodes[tail & mask]`, advancing `tail`.
///
/// Symmetric with [`try_enqueue`]: compares against `pos + 1` (the
/// "full, ready for consumer" epoch), CASes `tail` forward on a match,
/// reads the payload, then releases the slot for the next producer epoch
/// (`pos + capacity`).
pub(crate) fn try_dequeue(nodes: &[Slot], mask: u32, tail: &AtomicU32) -> Option<u32> {
    let mut pos = tail.load(Ordering::Relaxed);
    loop {
        let slot = &nodes[(pos & mask) as usize];
        let seq = slot.seq.load(Ordering::Acquire);
        let diff = seq.wrapping_sub(pos.wrapping_add(1)) as i32;

        if diff == 0 {
            match tail.compare_exchange_weak(pos, pos.wrapping_add(1), Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => {
                    // SAFETY: winning this CAS gives exclusive ownership of
                    // this slot's payload for this epoch.
                    let data = unsafe { *slot.data.get() };
                    slot.seq.store(pos.wrapping_add(mask).wrapping_add(1), Ordering::Release);
                    return Some(data);
                }
                Err(actual) => pos = actual,
            }
        } else if diff < 0 {
            return None;
        } else {
            pos = tail.load(Ordering::Relaxed);
        }
    }
}
