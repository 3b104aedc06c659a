#![forbid(unsafe_code)]

//! Directional crossfade between two panels.
//!
//! A [`Crossfade`] schedules two tweens on one [`Timeline`]:
//!
//! - `incoming` (from t=0): offset by `direction × enter_offset_px`,
//!   transparent, scaled to `enter_scale`, blurred by `enter_blur_px`;
//!   eases to rest.
//! - `outgoing` (from t=`overlap × enter_ms`): fades out while moving to
//!   `−direction × exit_offset_px` and blurring to `exit_blur_px`.
//!
//! The outgoing fade starts late, so the old panel stays partly on screen
//! while the new one arrives.
//!
//! # Invariants
//!
//! - Every [`PanelFrame`] has opacity in `[0, 1]`, scale in
//!   `[enter_scale, 1]`, and non-negative blur.
//! - At completion the incoming frame is [`PanelFrame::REST`] and the
//!   outgoing frame has opacity 0.

use std::time::Duration;

use folio_core::animation::{Animation, Timeline, Tween, ease_in_cubic, ease_out_quart};
use serde::Serialize;

use crate::config::TransitionProfile;
use crate::navigation::Direction;

const INCOMING: &str = "incoming";
const OUTGOING: &str = "outgoing";

/// Phase of the transition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    #[default]
    Idle,
    Transitioning,
}

/// Visual values for one panel in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelFrame {
    pub opacity: f32,
    /// Vertical offset in CSS pixels; positive is down.
    pub translate_y: f32,
    pub scale: f32,
    /// Blur radius in CSS pixels.
    pub blur: f32,
}

impl PanelFrame {
    /// Fully shown, untransformed.
    pub const REST: Self = Self {
        opacity: 1.0,
        translate_y: 0.0,
        scale: 1.0,
        blur: 0.0,
    };

    /// Not shown.
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        blur: 0.0,
    };
}

/// An in-flight crossfade from one panel to another.
#[derive(Debug)]
pub struct Crossfade {
    from: usize,
    to: usize,
    direction: Direction,
    profile: TransitionProfile,
    timeline: Timeline,
    elapsed: Duration,
}

impl Crossfade {
    /// Build and start a crossfade.
    #[must_use]
    pub fn start(from: usize, to: usize, direction: Direction, profile: &TransitionProfile) -> Self {
        let mut timeline = Timeline::new()
            .add(
                INCOMING,
                Duration::ZERO,
                Tween::new(0.0, 1.0, profile.enter_duration()).easing(ease_out_quart),
            )
            .add(
                OUTGOING,
                profile.exit_delay(),
                Tween::new(0.0, 1.0, profile.exit_duration()).easing(ease_in_cubic),
            );
        timeline.play();
        Self {
            from,
            to,
            direction,
            profile: profile.clone(),
            timeline,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    #[must_use]
    pub fn from(&self) -> usize {
        self.from
    }

    #[inline]
    #[must_use]
    pub fn to(&self) -> usize {
        self.to
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advance by `dt`. Returns `true` once complete.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.timeline.tick(dt);
        self.is_complete()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.timeline.is_complete()
    }

    /// Jump to the final frame.
    pub fn finish(&mut self) {
        self.timeline.finish();
    }

    /// Frame for the incoming panel.
    #[must_use]
    pub fn incoming_frame(&self) -> PanelFrame {
        let p = self.timeline.event_value(INCOMING).unwrap_or(1.0);
        let rest = 1.0 - p;
        let profile = &self.profile;
        PanelFrame {
            opacity: p.clamp(0.0, 1.0),
            translate_y: self.direction.sign() * profile.enter_offset_px * rest,
            scale: profile.enter_scale + (1.0 - profile.enter_scale) * p,
            blur: (profile.enter_blur_px * rest).max(0.0),
        }
    }

    /// Frame for the outgoing panel.
    #[must_use]
    pub fn outgoing_frame(&self) -> PanelFrame {
        let q = self.timeline.event_value(OUTGOING).unwrap_or(1.0);
        let profile = &self.profile;
        PanelFrame {
            opacity: (1.0 - q).clamp(0.0, 1.0),
            translate_y: -self.direction.sign() * profile.exit_offset_px * q,
            scale: 1.0,
            blur: (profile.exit_blur_px * q).max(0.0),
        }
    }

    /// Frame for `index`, if it is one of the two animated panels.
    #[must_use]
    pub fn frame_for(&self, index: usize) -> Option<PanelFrame> {
        if index == self.to {
            Some(self.incoming_frame())
        } else if index == self.from {
            Some(self.outgoing_frame())
        } else {
            None
        }
    }

    /// Whether the outgoing tween has begun.
    #[must_use]
    pub fn outgoing_started(&self) -> bool {
        self.timeline.event_started(OUTGOING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> TransitionProfile {
        TransitionProfile::desktop()
    }

    #[test]
    fn forward_incoming_starts_below() {
        let cf = Crossfade::start(0, 1, Direction::Forward, &desktop());
        let f = cf.incoming_frame();
        assert_eq!(f.opacity, 0.0);
        assert_eq!(f.translate_y, desktop().enter_offset_px);
        assert_eq!(f.scale, desktop().enter_scale);
        assert_eq!(f.blur, desktop().enter_blur_px);
        assert_eq!(cf.outgoing_frame(), PanelFrame::REST);
    }

    #[test]
    fn backward_incoming_starts_above() {
        let cf = Crossfade::start(2, 1, Direction::Backward, &desktop());
        assert!(cf.incoming_frame().translate_y < 0.0);
    }

    #[test]
    fn outgoing_moves_against_travel() {
        let mut cf = Crossfade::start(0, 1, Direction::Forward, &desktop());
        cf.advance(Duration::from_millis(400));
        let out = cf.outgoing_frame();
        assert!(out.translate_y < 0.0);
        assert!(out.opacity < 1.0);
        assert!(out.blur > 0.0);
        assert!(out.blur <= desktop().exit_blur_px);
    }

    #[test]
    fn outgoing_waits_for_overlap() {
        let profile = desktop();
        let mut cf = Crossfade::start(0, 1, Direction::Forward, &profile);
        cf.advance(profile.exit_delay() / 2);
        assert!(!cf.outgoing_started());
        assert_eq!(cf.outgoing_frame().opacity, 1.0);
        assert!(cf.incoming_frame().opacity > 0.0);
        cf.advance(profile.exit_delay());
        assert!(cf.outgoing_started());
    }

    #[test]
    fn completes_after_both_tweens() {
        let profile = desktop();
        let mut cf = Crossfade::start(0, 1, Direction::Forward, &profile);
        let total = profile.exit_delay() + profile.exit_duration();
        assert!(!cf.advance(profile.enter_duration() - Duration::from_millis(1)));
        assert!(cf.advance(total));
        assert_eq!(cf.incoming_frame(), PanelFrame::REST);
        assert_eq!(cf.outgoing_frame().opacity, 0.0);
    }

    #[test]
    fn mobile_profile_has_no_blur() {
        let mut cf = Crossfade::start(0, 1, Direction::Forward, &TransitionProfile::mobile());
        assert_eq!(cf.incoming_frame().blur, 0.0);
        cf.advance(Duration::from_millis(200));
        assert_eq!(cf.outgoing_frame().blur, 0.0);
    }

    #[test]
    fn finish_snaps_to_end() {
        let mut cf = Crossfade::start(3, 4, Direction::Forward, &desktop());
        cf.finish();
        assert!(cf.is_complete());
        assert_eq!(cf.frame_for(4), Some(PanelFrame::REST));
        assert_eq!(cf.frame_for(3).map(|f| f.opacity), Some(0.0));
        assert_eq!(cf.frame_for(0), None);
    }
}
