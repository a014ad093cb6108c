//! Loom-based concurrency tests for the Ring CAS loop.
//!
//! Run with: `cargo test --features loom --release --test loom_tests`
//!
//! `loom` swaps in its own atomic/thread primitives to exhaustively explore
//! interleavings, so it cannot run against `std::sync::atomic` directly —
//! the algorithm is mirrored here against `loom::sync::atomic` with a small
//! capacity to keep the explored state space tractable.

#![cfg(feature = "loom")]

use loom::cell::UnsafeCell;
use loom::sync::atomic::{AtomicU32, Ordering};
use loom::sync::Arc;
use loom::thread;

const CAPACITY: u32 = 4;
const MASK: u32 = CAPACITY - 1;

struct LoomSlot {
    seq: AtomicU32,
    data: UnsafeCell<u32>,
}

struct LoomRing {
    nodes: Vec<LoomSlot>,
    head: AtomicU32,
    tail: AtomicU32,
}

unsafe impl Send for LoomRing {}
unsafe impl Sync for LoomRing {}

impl LoomRing {
    fn new() -> Self {
        Self {
            nodes: (0..CAPACITY)
                .map(|i| LoomSlot {
                    seq: AtomicU32::new(i),
                    data: UnsafeCell::new(0),
                })
                .collect(),
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
        }
    }

    fn try_enqueue(&self, data: u32) -> bool {
        let mut pos = self.head.load(Ordering::Relaxed);
        loop {
            let slot = &self.nodes[(pos & MASK) as usize];
            let seq = slot.seq.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos) as i32;

            if diff == 0 {
                match self.head.compare_exchange_weak(pos, pos.wrapping_add(1), Ordering::Relaxed, Ordering::Relaxed) {
                    Ok(_) => {
                        slot.data.with_mut(|p| unsafe { *p = data });
                        slot.seq.store(pos.wrapping_add(1), Ordering::Release);
                        return true;
                    }
                    Err(actual) => pos = actual,
                }
            } else if diff < 0 {
                return false;
            } else {
                pos = self.head.load(Ordering::Relaxed);
            }
        }
    }

    fn try_dequeue(&self) -> Option<u32> {
        let mut pos = self.tail.load(Ordering::Relaxed);
        loop {
            let slot = &self.nodes[(pos & MASK) as usize];
            let seq = slot.seq.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos.wrapping_add(1)) as i32;

            if diff == 0 {
                match self.tail.compare_exchange_weak(pos, pos.wrapping_add(1), Ordering::Relaxed, Ordering::Relaxed) {
                    Ok(_) => {
                        let data = slot.data.with(|p| unsafe { *p });
                        slot.seq.store(pos.wrapping_add(MASK).wrapping_add(1), Ordering::Release);
                        return Some(data);
                    }
                    Err(actual) => pos = actual,
                }
            } else if diff < 0 {
                return None;
            } else {
                pos = self.tail.load(Ordering::Relaxed);
            }
        }
    }
}

/// Two producers racing to fill a ring never corrupt a slot: every
/// successfully dequeued payload was really enqueued, exactly once.
#[test]
fn loom_two_producers_no_corruption() {
    loom::model(|| {
        let ring = Arc::new(LoomRing::new());
        let r1 = Arc::clone(&ring);
        let r2 = Arc::clone(&ring);

        let p1 = thread::spawn(move || r1.try_enqueue(1));
        let p2 = thread::spawn(move || r2.try_enqueue(2));

        let ok1 = p1.join().unwrap();
        let ok2 = p2.join().unwrap();
        assert!(ok1 && ok2, "ring of capacity 4 must accept two concurrent pushes");

        let mut seen = Vec::new();
        while let Some(v) = ring.try_dequeue() {
            seen.push(v);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2]);
    });
}

/// A producer and a consumer racing on an empty ring: the consumer only
/// ever observes a value that was actually published.
#[test]
fn loom_producer_consumer_pairing() {
    loom::model(|| {
        let ring = Arc::new(LoomRing::new());
        let producer_ring = Arc::clone(&ring);

        let producer = thread::spawn(move || {
            producer_ring.try_enqueue(7);
        });

        let mut observed = None;
        for _ in 0..4 {
            if let Some(v) = ring.try_dequeue() {
                observed = Some(v);
                break;
            }
            loom::thread::yield_now();
        }

        producer.join().unwrap();

        if let Some(v) = observed {
            assert_eq!(v, 7);
        }
    });
}

/// Two threads racing to steal the single item in a ring never both
/// succeed.
#[test]
fn loom_concurrent_steal_is_exclusive() {
    loom::model(|| {
        let ring = Arc::new(LoomRing::new());
        assert!(ring.try_enqueue(99));

        let r1 = Arc::clone(&ring);
        let r2 = Arc::clone(&ring);

        let t1 = thread::spawn(move || r1.try_dequeue());
        let t2 = thread::spawn(move || r2.try_dequeue());

        let got1 = t1.join().unwrap();
        let got2 = t2.join().unwrap();

        let successes = [got1, got2].into_iter().filter(Option::is_some).count();
        assert_eq!(successes, 1, "exactly one stealer should win the single item");
        assert_eq!(got1.or(got2), Some(99));
    });
}
