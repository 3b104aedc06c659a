#![forbid(unsafe_code)]

//! Host-driven monotonic clock.

use std::time::Duration;

use web_time::Instant;

/// Monotonic time advanced only by the host.
///
/// Replays and tests feed exact frame deltas; nothing here reads the wall
/// clock after construction.
#[derive(Debug, Clone, Copy)]
pub struct DeterministicClock {
    origin: Instant,
    now: Duration,
}

impl Default for DeterministicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicClock {
    /// Create a clock at `0`, anchored to the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self::anchored(Instant::now())
    }

    /// Create a clock at `0`, anchored to `origin`.
    #[must_use]
    pub const fn anchored(origin: Instant) -> Self {
        Self {
            origin,
            now: Duration::ZERO,
        }
    }

    /// Time elapsed since the origin.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.now
    }

    /// Current instant: origin plus elapsed time.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.origin + self.now
    }

    /// Set elapsed time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Advance by a host-supplied millisecond delta. Negative, NaN, or
    /// infinite deltas are treated as zero. Returns the applied delta.
    pub fn advance_ms(&mut self, dt_ms: f64) -> Duration {
        let dt = if dt_ms.is_finite() && dt_ms > 0.0 {
            Duration::from_secs_f64(dt_ms / 1000.0)
        } else {
            Duration::ZERO
        };
        self.advance(dt);
        dt
    }
}
