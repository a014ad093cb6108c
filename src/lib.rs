//! ringpool-rs — a lock-free bounded MPMC ring buffer and a dense `u32`
//! ID pool built on top of it.
//!
//! # Key features
//!
//! - Vyukov-style per-slot sequence numbers: at most one CAS per
//!   `try_enqueue`/`try_dequeue`, no ABA tagging needed.
//! - 128-byte cache-line padding between `head` and `tail`.
//! - `IdPool`: per-thread `Cache` rings absorb allocation/free traffic
//!   with zero locking in steady state; a mutex-guarded bump counter and
//!   free-list back the caches when they empty or overflow; a lock-free
//!   cross-cache steal avoids starvation.
//!
//! # Example
//!
//! ```
//! use ringpool_rs::Ring;
//!
//! let ring = Ring::new(4).unwrap();
//! assert!(ring.try_enqueue(10));
//! assert!(ring.try_enqueue(20));
//! assert_eq!(ring.try_dequeue(), Some(10));
//! assert_eq!(ring.try_dequeue(), Some(20));
//! assert_eq!(ring.try_dequeue(), None);
//! ```
//!
//! ```
//! use ringpool_rs::{IdPool, IdPoolConfig};
//!
//! let pool = IdPool::create(IdPoolConfig::new(2, 100, 3, false)).unwrap();
//! assert_eq!(pool.alloc(0), Some(100));
//! assert_eq!(pool.alloc(0), Some(101));
//! assert_eq!(pool.alloc(1), Some(102));
//! assert_eq!(pool.alloc(0), None);
//! pool.free(0, 101);
//! assert_eq!(pool.alloc(0), Some(101));
//! ```

mod cache;
mod config;
mod error;
mod idpool;
mod invariants;
mod metrics;
mod ring;
mod slot;

pub use config::IdPoolConfig;
pub use error::{PoolError, RingError};
pub use idpool::IdPool;
pub use metrics::{PoolMetricsSnapshot, RingMetricsSnapshot};
pub use ring::Ring;
