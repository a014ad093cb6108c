//! Hierarchical dense `u32` ID allocator layered on [`crate::ring`]'s CAS
//! core.
//!
//! Grounded on OVS's `lib/seq-pool.c` (`seq_pool_create`/`seq_pool_new_id`/
//! `seq_pool_free_id`) for the allocation/free sequencing, but with the
//! per-cache mutex and its `try_lock`-to-avoid-deadlock mitigation dropped:
//! stealing here goes through [`crate::cache::Cache`]'s lock-free
//! `try_dequeue`, which cannot deadlock against a concurrent stealer the
//! way two threads racing for each other's mutex can.

use crate::cache::Cache;
use crate::config::IdPoolConfig;
use crate::error::PoolError;
use crate::invariants::debug_assert_no_double_free;
use crate::metrics::{PoolMetrics, PoolMetricsSnapshot};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Bump pointer and overflow free-list, guarded by a single mutex.
struct PoolState {
    next_id: u32,
    free_ids: VecDeque<u32>,
}

/// A dense `u32` ID allocator/recycler.
///
/// IDs are drawn from the half-open range `[base, base + n_ids)`. Each
/// caller-chosen `uid` selects one of `nb_user` per-thread [`Cache`]
/// rings (`uid % nb_user`); most allocation/free traffic never touches
/// the shared lock.
pub struct IdPool {
    base: u32,
    n_ids: u32,
    nb_user: u32,
    state: Mutex<PoolState>,
    caches: Box<[Cache]>,
    metrics: Option<PoolMetrics>,
    #[cfg(debug_assertions)]
    held: Mutex<std::collections::HashSet<u32>>,
}

impl IdPool {
    /// Creates a pool handing out IDs from `[config.base, config.base +
    /// config.n_ids)` across `config.nb_user` per-thread caches.
    pub fn create(config: IdPoolConfig) -> Result<Self, PoolError> {
        if config.nb_user == 0 {
            return Err(PoolError::ZeroUsers);
        }
        if config.base.checked_add(config.n_ids).is_none() {
            return Err(PoolError::RangeOverflow {
                base: config.base,
                n_ids: config.n_ids,
            });
        }

        let caches = (0..config.nb_user).map(|_| Cache::new()).collect();

        Ok(Self {
            base: config.base,
            n_ids: config.n_ids,
            nb_user: config.nb_user,
            state: Mutex::new(PoolState {
                next_id: config.base,
                free_ids: VecDeque::new(),
            }),
            caches,
            metrics: config.enable_metrics.then(PoolMetrics::default),
            #[cfg(debug_assertions)]
            held: Mutex::new(std::collections::HashSet::new()),
        })
    }

    /// Returns the half-open ID range this pool draws from.
    #[must_use]
    pub fn range(&self) -> std::ops::Range<u32> {
        self.base..self.base.wrapping_add(self.n_ids)
    }

    fn cache_index(&self, uid: u32) -> usize {
        (uid % self.nb_user) as usize
    }

    /// Allocates an ID on behalf of `uid`.
    ///
    /// Tries, in order: the calling cache's fast path, a locked refill
    /// from `free_ids` and the bump counter followed by a retry, then a
    /// lock-free steal from every other cache. Returns `None` only if
    /// all three were exhausted at the instants they were observed (spec
    /// §4.2: this may spuriously fail while a concurrent refill is in
    /// flight elsewhere — documented, not a bug).
    pub fn alloc(&self, uid: u32) -> Option<u32> {
        let idx = self.cache_index(uid);
        let cache = &self.caches[idx];

        if let Some(id) = cache.try_dequeue() {
            self.record_fast_hit();
            self.track_alloc(id);
            return Some(id);
        }

        {
            let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            while let Some(&id) = state.free_ids.front() {
                if cache.try_enqueue(id) {
                    state.free_ids.pop_front();
                } else {
                    break;
                }
            }
            while state.next_id < self.base.wrapping_add(self.n_ids) {
                if cache.try_enqueue(state.next_id) {
                    state.next_id += 1;
                } else {
                    break;
                }
            }
        }

        if let Some(id) = cache.try_dequeue() {
            self.record_refill_hit();
            self.track_alloc(id);
            return Some(id);
        }

        let nb_user = self.caches.len();
        for step in 1..nb_user {
            let other = (idx + step) % nb_user;
            if let Some(id) = self.caches[other].try_dequeue() {
                self.record_steal_hit();
                self.track_alloc(id);
                return Some(id);
            }
        }

        self.record_exhausted();
        None
    }

    /// Returns `id` to the pool on behalf of `uid`.
    ///
    /// IDs outside `[base, base + n_ids)` are silently ignored, matching
    /// spec §4.2's defense against stale/foreign IDs. Double-freeing an
    /// in-range ID is a caller bug; in debug builds it trips
    /// [`debug_assert_no_double_free`].
    pub fn free(&self, uid: u32, id: u32) {
        if !self.range().contains(&id) {
            return;
        }

        self.untrack_free(id);

        let cache = &self.caches[self.cache_index(uid)];
        if cache.try_enqueue(id) {
            self.record_free(false);
            return;
        }

        let mut overflow = Vec::with_capacity(crate::cache::CACHE_CAP as usize + 1);
        cache.drain_into(&mut overflow);
        overflow.push(id);

        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.free_ids.extend(overflow);
        drop(state);
        self.record_free(true);
    }

    /// Returns a snapshot of this pool's counters, or all-zero if
    /// metrics were not enabled at construction.
    #[must_use]
    pub fn metrics(&self) -> PoolMetricsSnapshot {
        self.metrics.as_ref().map_or_else(PoolMetricsSnapshot::default, PoolMetrics::snapshot)
    }

    fn record_fast_hit(&self) {
        if let Some(m) = &self.metrics {
            m.record_fast_hit();
        }
    }

    fn record_refill_hit(&self) {
        if let Some(m) = &self.metrics {
            m.record_refill_hit();
        }
    }

    fn record_steal_hit(&self) {
        if let Some(m) = &self.metrics {
            m.record_steal_hit();
        }
    }

    fn record_exhausted(&self) {
        if let Some(m) = &self.metrics {
            m.record_exhausted();
        }
    }

    fn record_free(&self, overflowed: bool) {
        if let Some(m) = &self.metrics {
            m.record_free(overflowed);
        }
    }

    #[cfg(debug_assertions)]
    fn track_alloc(&self, id: u32) {
        let mut held = self.held.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        held.insert(id);
    }

    #[cfg(not(debug_assertions))]
    fn track_alloc(&self, _id: u32) {}

    #[cfg(debug_assertions)]
    fn untrack_free(&self, id: u32) {
        let mut held = self.held.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let was_held = held.remove(&id);
        debug_assert_no_double_free!(was_held, id);
    }

    #[cfg(not(debug_assertions))]
    fn untrack_free(&self, _id: u32) {}
}

impl Drop for IdPool {
    /// `idpool_destroy`: reclaims `free_ids` and every cache's storage.
    ///
    /// Rust's derived field drop glue would free the same memory on its
    /// own; this impl exists to give that reclamation an explicit,
    /// citable spot rather than leaving it implicit.
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.free_ids.clear();
        drop(state);

        drop(std::mem::take(&mut self.caches));
    }
}
