use thiserror::Error;

/// Construction-time failures for [`crate::Ring`].
///
/// These are the only failures a `Ring` can report: once constructed, its
/// `try_enqueue`/`try_dequeue` operations never fail with an error, only a
/// plain `bool`/`Option` for the transient full/empty case (see spec §7 —
/// transient unavailability is never promoted to an error type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// `capacity` was not a power of two.
    #[error("ring capacity {0} must be a power of two")]
    NotPowerOfTwo(u32),
    /// `capacity` was below the minimum of 4 slots.
    #[error("ring capacity {0} must be at least {min}", min = crate::ring::Ring::MIN_CAPACITY)]
    TooSmall(u32),
}

/// Construction-time failures for [`crate::IdPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// `nb_user` was zero; a pool needs at least one cache.
    #[error("nb_user must be at least 1")]
    ZeroUsers,
    /// `base + n_ids` overflowed `u32::MAX`.
    #[error("id range [{base}, {base}+{n_ids}) overflows u32")]
    RangeOverflow {
        /// Lower bound of the requested ID range.
        base: u32,
        /// Width of the requested ID range.
        n_ids: u32,
    },
}
