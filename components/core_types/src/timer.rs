//! Wall-clock interval measurement.
//!
//! Every throughput figure in the harness is derived from two [`Timestamp`]
//! samples; nothing is estimated from iteration counts.

use std::time::Instant;

/// A monotonic, high-resolution point in time.
///
/// # Examples
///
/// ```
/// use core_types::{elapsed_micros, Timestamp};
///
/// let t0 = Timestamp::now();
/// let t1 = Timestamp::now();
/// assert!(elapsed_micros(t0, t1) >= 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(Instant);

impl Timestamp {
    /// Samples the monotonic clock.
    #[inline]
    pub fn now() -> Self {
        Self(Instant::now())
    }

    /// The underlying instant.
    pub fn instant(self) -> Instant {
        self.0
    }
}

/// Returns `t1 - t0` in microseconds.
///
/// Saturates at zero when `t1` precedes `t0`, so the result is never negative
/// and never wraps.
#[inline]
pub fn elapsed_micros(t0: Timestamp, t1: Timestamp) -> f64 {
    t1.0.saturating_duration_since(t0.0).as_secs_f64() * 1_000_000.0
}
