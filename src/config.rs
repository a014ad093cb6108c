/// Configuration for [`crate::IdPool::create`].
///
/// Mirrors the teacher's `Config::new(ring_bits, max_producers,
/// enable_metrics)`: a `const fn` constructor that asserts its own
/// preconditions, plus an `enable_metrics` toggle threaded through to the
/// hot path.
#[derive(Debug, Clone, Copy)]
pub struct IdPoolConfig {
    /// Number of per-thread caches; `uid` is reduced modulo this.
    pub nb_user: u32,
    /// Lower bound of the ID range handed out by this pool.
    pub base: u32,
    /// Width of the ID range; the pool hands out `[base, base + n_ids)`.
    pub n_ids: u32,
    /// Whether to track allocation/free counters (slight overhead).
    pub enable_metrics: bool,
}

impl IdPoolConfig {
    /// Creates a new configuration.
    ///
    /// This only captures the parameters; range-overflow and
    /// zero-`nb_user` validation happens in [`crate::IdPool::create`],
    /// which needs to report them as a recoverable [`crate::PoolError`]
    /// rather than panic (a malformed ID range is a caller input error,
    /// not a programming bug worth aborting over).
    #[must_use]
    pub const fn new(nb_user: u32, base: u32, n_ids: u32, enable_metrics: bool) -> Self {
        Self {
            nb_user,
            base,
            n_ids,
            enable_metrics,
        }
    }
}
