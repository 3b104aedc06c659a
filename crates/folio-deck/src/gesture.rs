#![forbid(unsafe_code)]

//! Gesture routing: wheel and touch input at panel scroll boundaries.
//!
//! [`GestureRouter`] turns raw [`DeckInput`] into a [`GestureDecision`]. It
//! never navigates itself; the deck acts on `Navigate` decisions.
//!
//! # State Machine
//!
//! - **Cooldown**: armed on every boundary hit (navigating or hard stop)
//!   unless a modal is open.
//!   While active, wheel input is swallowed so inertial scrolling cannot
//!   immediately trigger a second hop.
//! - **Touch session**: one per single-finger contact. It fires at most one
//!   navigation, then ignores the rest of the contact.
//!
//! # Invariants
//!
//! 1. Downward/forward input navigates only when the active panel is at its
//!    bottom edge; upward/backward only at its top edge.
//! 2. `Navigate` targets are always in `[0, panel_count)`; past either end
//!    the hit is swallowed (no wraparound).
//! 3. Wheel input is ignored entirely on coarse pointers.
//! 4. A touch session triggers at most once.
//! 5. While a modal is open, boundary hits are swallowed without arming the
//!    cooldown or consuming the touch session.
//!
//! # Failure Modes
//!
//! - Active panel not mounted: no edge can be detected, input passes through.
//! - Multi-touch: no session starts; an existing session is dropped.

use std::time::Duration;

use folio_core::{DeckInput, ScrollMetrics, ScrollPosition};
use tracing::{debug, trace};
use web_time::Instant;

use crate::config::GestureConfig;
use crate::navigation::Direction;

/// What the host should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureDecision {
    /// Not ours; let the browser scroll normally.
    PassThrough,
    /// Swallow the event (`preventDefault`), no navigation.
    Suppress,
    /// Navigate to `target`, landing at `position`.
    Navigate {
        target: usize,
        position: ScrollPosition,
    },
}

/// Deck state the router needs for one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryContext {
    pub active: usize,
    pub panel_count: usize,
    /// Active panel's scroll metrics; `None` when it is not mounted.
    pub metrics: Option<ScrollMetrics>,
    pub transitioning: bool,
    pub coarse_pointer: bool,
    /// A modal owns input; boundary hits must leave no trace.
    pub modal_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchSession {
    start_y: f64,
    triggered: bool,
}

/// Converts wheel and touch input into navigation decisions.
#[derive(Debug, Clone)]
pub struct GestureRouter {
    config: GestureConfig,
    cooldown_until: Option<Instant>,
    touch: Option<TouchSession>,
}

impl GestureRouter {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            cooldown_until: None,
            touch: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Whether the boundary cooldown is active at `now`.
    #[must_use]
    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    /// When the current cooldown ends.
    #[must_use]
    pub fn cooldown_until(&self) -> Option<Instant> {
        self.cooldown_until
    }

    /// Whether a touch contact is being tracked.
    #[must_use]
    pub fn has_touch_session(&self) -> bool {
        self.touch.is_some()
    }

    /// Drop cooldown and touch session.
    pub fn reset(&mut self) {
        self.cooldown_until = None;
        self.touch = None;
    }

    /// Decide what to do with `input`.
    pub fn route(&mut self, input: &DeckInput, ctx: BoundaryContext, now: Instant) -> GestureDecision {
        match *input {
            DeckInput::Wheel { delta_y } => self.on_wheel(delta_y, ctx, now),
            DeckInput::TouchStart { point, touches } => {
                self.touch = (touches == 1).then_some(TouchSession {
                    start_y: point.y,
                    triggered: false,
                });
                GestureDecision::PassThrough
            }
            DeckInput::TouchMove { point, touches } => self.on_touch_move(point.y, touches, ctx, now),
            DeckInput::TouchEnd | DeckInput::TouchCancel => {
                self.touch = None;
                GestureDecision::PassThrough
            }
            DeckInput::Scroll { .. } => GestureDecision::PassThrough,
        }
    }

    fn on_wheel(&mut self, delta_y: f64, ctx: BoundaryContext, now: Instant) -> GestureDecision {
        if ctx.coarse_pointer {
            return GestureDecision::PassThrough;
        }
        if self.in_cooldown(now) || ctx.transitioning {
            trace!(target: "folio.gesture", delta_y, "wheel suppressed");
            return GestureDecision::Suppress;
        }
        if delta_y == 0.0 || delta_y.is_nan() {
            return GestureDecision::PassThrough;
        }
        let direction = if delta_y > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.boundary_hit(direction, ctx, now)
            .unwrap_or(GestureDecision::PassThrough)
    }

    fn on_touch_move(
        &mut self,
        y: f64,
        touches: u8,
        ctx: BoundaryContext,
        now: Instant,
    ) -> GestureDecision {
        if touches != 1 {
            self.touch = None;
            return GestureDecision::PassThrough;
        }
        let Some(session) = self.touch else {
            return GestureDecision::PassThrough;
        };
        if session.triggered || ctx.transitioning || ctx.modal_open || self.in_cooldown(now) {
            return GestureDecision::PassThrough;
        }
        // Finger moving up (y decreasing) pulls the next panel in.
        let dy = session.start_y - y;
        if dy.abs() <= self.config.touch_threshold_px {
            return GestureDecision::PassThrough;
        }
        let direction = if dy > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        match self.boundary_hit(direction, ctx, now) {
            Some(decision) => {
                if let Some(s) = self.touch.as_mut() {
                    s.triggered = true;
                }
                decision
            }
            None => GestureDecision::PassThrough,
        }
    }

    /// `Some` when input in `direction` hits the matching edge.
    fn boundary_hit(
        &mut self,
        direction: Direction,
        ctx: BoundaryContext,
        now: Instant,
    ) -> Option<GestureDecision> {
        let metrics = ctx.metrics?;
        let tolerance = self.config.edge_tolerance_px;
        let at_edge = match direction {
            Direction::Forward => metrics.at_bottom(tolerance),
            Direction::Backward => metrics.at_top(tolerance),
        };
        if !at_edge {
            return None;
        }
        if ctx.modal_open {
            trace!(target: "folio.gesture", active = ctx.active, "boundary hit under modal");
            return Some(GestureDecision::Suppress);
        }

        self.arm_cooldown(now);
        let target = match direction {
            Direction::Forward => ctx.active.checked_add(1).filter(|&t| t < ctx.panel_count),
            Direction::Backward => ctx.active.checked_sub(1),
        };
        let Some(target) = target else {
            debug!(target: "folio.gesture", active = ctx.active, ?direction, "hard stop at deck end");
            return Some(GestureDecision::Suppress);
        };
        debug!(target: "folio.gesture", from = ctx.active, target, ?direction, "boundary navigation");
        Some(GestureDecision::Navigate {
            target,
            position: direction.arrival_position(),
        })
    }

    fn arm_cooldown(&mut self, now: Instant) {
        let window: Duration = self.config.cooldown();
        self.cooldown_until = Some(now + window);
    }
}
