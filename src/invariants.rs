//! Debug assertion macros for the invariants documented in `SPEC_FULL.md`.
//!
//! These are only active in debug builds (`#[cfg(debug_assertions)]`), so
//! there is zero overhead in release builds. Used by `Ring`, `Cache`, and
//! `IdPool` alike.

// =============================================================================
// INV-SEQ-01: Bounded Count
// =============================================================================

/// Assert that `0 <= head - tail <= capacity` (signed, modular).
///
/// Used in: `Ring`/`Cache` after a successful enqueue or dequeue CAS.
macro_rules! debug_assert_bounded_count {
    ($head:expr, $tail:expr, $capacity:expr) => {
        debug_assert!(
            {
                let diff = ($head).wrapping_sub($tail) as i32;
                diff >= 0 && i64::from(diff) <= ($capacity) as i64
            },
            "INV-SEQ-01 violated: head {} tail {} capacity {}",
            $head,
            $tail,
            $capacity
        )
    };
}

// =============================================================================
// Double-free shadow check (spec.md §9 open question)
// =============================================================================

/// Assert that an ID being freed was actually outstanding.
///
/// Used in: `IdPool::free`, guarded by the debug-only shadow set of
/// currently-held IDs.
macro_rules! debug_assert_no_double_free {
    ($was_held:expr, $id:expr) => {
        debug_assert!($was_held, "double-free detected for id {}", $id)
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_no_double_free;
