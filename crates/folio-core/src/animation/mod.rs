#![forbid(unsafe_code)]

//! Minimal tween toolkit for panel transitions.
//!
//! Every animation here is driven by explicit `tick(delta)` calls from the
//! host's frame loop; nothing reads a clock on its own. That keeps the deck
//! deterministic under test.
//!
//! # Invariants
//!
//! 1. `progress()` is always in `[0.0, 1.0]`.
//! 2. `value()` equals `from` before the first tick and `to` once complete
//!    (for non-overshooting easings).
//! 3. A zero-duration tween completes on its first tick.

mod timeline;

pub use timeline::{PlaybackState, Timeline};

use std::time::Duration;

/// Easing curve: maps linear progress in `[0, 1]` to eased progress.
pub type EasingFn = fn(f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Quartic ease-out: fast start, long settle. Used for entering panels.
#[inline]
pub fn ease_out_quart(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv * inv
}

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Interpolates a single `f32` from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return if self.elapsed.is_zero() { 0.0 } else { 1.0 };
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Jump straight to the end value.
    pub fn finish(&mut self) {
        self.elapsed = self.duration.max(Duration::from_nanos(1));
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        // Zero-duration tweens still need a non-zero elapsed to read as done.
        self.elapsed = self
            .elapsed
            .saturating_add(dt.max(Duration::from_nanos(1)))
            .min(self.duration.max(Duration::from_nanos(1)));
    }

    fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    fn value(&self) -> f32 {
        let eased = (self.easing)(self.progress());
        self.from + (self.to - self.from) * eased
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
