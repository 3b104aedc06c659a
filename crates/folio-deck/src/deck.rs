#![forbid(unsafe_code)]

//! The scroll deck: one full-viewport panel per section, switched with a
//! directional crossfade.
//!
//! [`ScrollDeck`] wires the pieces together:
//!
//! ```text
//!  input ──► GestureRouter ──┐
//!                            ├──► go_to_index ──► Visibility + Focus ──► StatePublisher
//!  nav bar ► PendingNavigation┘        │
//!                                      └──► Crossfade (host drives advance)
//! ```
//!
//! # Invariants
//!
//! 1. `active_index < panel_count()` whenever the deck has panels.
//! 2. At most one transition is in flight; requests made while one runs are
//!    dropped, never queued.
//! 3. The index is committed (fragment + events) before the animation plays.
//! 4. Outside inspection mode, exactly one panel is accessible at all times
//!    and, once idle, exactly one is visible.
//!
//! # Failure Modes
//!
//! - Host reports a panel unmounted mid-request: the visual transition is
//!   skipped but the commit still happens ([`InstantReason::MissingPanel`]).
//! - Zero panels: every request is dropped with [`DropReason::NoPanels`].

use std::time::Duration;

use folio_core::{Capabilities, DeckInput, ScrollPosition, Section, SectionRegistry};
use tracing::{debug, debug_span, info, warn};
use web_time::Instant;

use crate::bridge::PendingNavigation;
use crate::config::DeckConfig;
use crate::focus::FocusManager;
use crate::gesture::{BoundaryContext, GestureDecision, GestureRouter};
use crate::host::DeckHost;
use crate::navigation::{
    Direction, DropReason, InstantReason, NavOutcome, NavigateOptions, ScrollBehavior,
};
use crate::publisher::{DeckEvent, StatePublisher, Subscription};
use crate::transition::{Crossfade, PanelFrame, TransitionPhase};
use crate::visibility::{PanelState, VisibilityController};

/// Host-driven panel deck.
#[derive(Debug)]
pub struct ScrollDeck<H: DeckHost> {
    host: H,
    registry: SectionRegistry,
    config: DeckConfig,
    capabilities: Capabilities,
    visibility: VisibilityController,
    focus: FocusManager,
    publisher: StatePublisher,
    gestures: GestureRouter,
    pending: PendingNavigation,
    phase: TransitionPhase,
    transition: Option<Crossfade>,
    last_direction: Direction,
    modal_open: bool,
    mounted: bool,
}

impl<H: DeckHost> ScrollDeck<H> {
    /// Build an unmounted deck. Call [`mount`](Self::mount) once the host's
    /// panels exist.
    #[must_use]
    pub fn new(host: H, registry: SectionRegistry, config: DeckConfig) -> Self {
        let mut focus = FocusManager::new();
        focus.set_enabled(!config.inspection_mode);
        Self {
            host,
            registry,
            visibility: VisibilityController::new(0, 0, config.inspection_mode),
            focus,
            publisher: StatePublisher::new(),
            gestures: GestureRouter::new(config.gesture.clone()),
            pending: PendingNavigation::new(),
            config,
            capabilities: Capabilities::default(),
            phase: TransitionPhase::Idle,
            transition: None,
            last_direction: Direction::Forward,
            modal_open: false,
            mounted: false,
        }
    }

    /// Builder: initial capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    // --- lifecycle -------------------------------------------------------

    /// Reveal the first panel, reset the fragment to the first section, and
    /// announce the initial state. A navigation requested before mounting
    /// is consumed afterwards and its outcome returned.
    pub fn mount(&mut self) -> Option<NavOutcome> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.phase = TransitionPhase::Idle;
        self.transition = None;
        self.gestures.reset();
        self.focus.reset();

        let count = self.panel_count();
        self.visibility = VisibilityController::new(count, 0, self.config.inspection_mode);
        if count == 0 {
            warn!(target: "folio.deck", sections = self.registry.len(), "mounted without panels");
        } else {
            let scroll_top = self.host.panel_metrics(0).map_or(0.0, |m| m.scroll_top);
            self.publisher.commit(&mut self.host, &self.registry, 0, scroll_top);
            self.publisher.announce_active(&self.registry);
            info!(target: "folio.deck", panels = count, "deck mounted");
        }
        self.flush_pending()
    }

    /// Tear down: snap any transition to its end, clear cooldown, touch
    /// session and pending request, and release every subscriber.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        if self.transition.is_some() {
            self.finalize();
        }
        self.gestures.reset();
        self.pending.clear();
        self.publisher.clear();
        self.focus.reset();
        self.mounted = false;
        info!(target: "folio.deck", "deck unmounted");
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // --- navigation ------------------------------------------------------

    /// Switch to panel `target`.
    ///
    /// Out-of-range targets are clamped. See [`NavOutcome`] for every way a
    /// request can resolve.
    pub fn go_to_index(&mut self, target: usize, options: NavigateOptions) -> NavOutcome {
        let current = self.publisher.active_index();
        let span = debug_span!(target: "folio.deck", "deck.go_to_index", target, current);
        let _guard = span.enter();

        if !self.mounted {
            return Self::dropped(DropReason::Unmounted);
        }
        let count = self.panel_count();
        if count == 0 {
            return Self::dropped(DropReason::NoPanels);
        }
        let clamped = target >= count;
        let target = target.min(count - 1);

        if target == current {
            if !options.reset_target_scroll {
                return NavOutcome::Unchanged { index: current };
            }
            let scroll_top = self.position_panel(current, options.position, options.behavior);
            self.publisher.announce_state(&self.registry, scroll_top);
            debug!(target: "folio.deck", index = current, position = ?options.position, "repositioned");
            return NavOutcome::Repositioned { index: current };
        }
        if self.phase == TransitionPhase::Transitioning {
            return Self::dropped(DropReason::InFlight);
        }
        if self.modal_open {
            return Self::dropped(DropReason::ModalOpen);
        }

        let direction = Direction::between(current, target);
        self.last_direction = direction;
        self.phase = TransitionPhase::Transitioning;

        let outgoing_mounted = self.host.panel_metrics(current).is_some();
        let incoming_mounted = self.host.panel_metrics(target).is_some();

        // Pre-stage the destination before it becomes visible.
        let scroll_top = if options.reset_target_scroll {
            self.position_panel(target, options.position, ScrollBehavior::Instant)
        } else {
            self.host.panel_metrics(target).map_or(0.0, |m| m.scroll_top)
        };

        self.focus.release(&mut self.host, current);
        self.visibility.begin_transition(current, target);
        self.focus.enter(&mut self.host, target);

        self.publisher.commit(&mut self.host, &self.registry, target, scroll_top);
        self.publisher.announce_active(&self.registry);

        let instant = if !(outgoing_mounted && incoming_mounted) {
            warn!(
                target: "folio.transition",
                from = current, to = target, outgoing_mounted, incoming_mounted,
                "panel element missing, skipping animation"
            );
            Some(InstantReason::MissingPanel)
        } else if self.capabilities.prefers_reduced_motion {
            Some(InstantReason::ReducedMotion)
        } else {
            None
        };

        match instant {
            Some(reason) => {
                self.finalize();
                NavOutcome::Completed {
                    from: current,
                    to: target,
                    direction,
                    clamped,
                    reason,
                }
            }
            None => {
                let profile = self.config.transition.profile(self.capabilities.coarse_pointer);
                self.transition = Some(Crossfade::start(current, target, direction, profile));
                debug!(
                    target: "folio.transition",
                    from = current, to = target, ?direction,
                    enter_ms = profile.enter_ms, exit_ms = profile.exit_ms,
                    "crossfade started"
                );
                NavOutcome::Started {
                    from: current,
                    to: target,
                    direction,
                    clamped,
                }
            }
        }
    }

    /// Navigate to a section by id, landing at its top.
    ///
    /// Goes through the pending-navigation bridge, so an unmounted deck
    /// keeps the request for its next mount.
    pub fn navigate_to_section(&mut self, id: &str) -> NavOutcome {
        self.pending.request(id);
        self.flush_pending()
            .unwrap_or(NavOutcome::Dropped(DropReason::Unmounted))
    }

    /// Store a navigation request without acting on it.
    pub fn request_section(&mut self, id: impl Into<String>) {
        self.pending.request(id);
    }

    /// Consume the pending request, if any.
    ///
    /// Returns `None` when nothing is pending or the deck is not mounted.
    /// An unknown id is consumed and reported as
    /// [`DropReason::UnknownSection`].
    pub fn flush_pending(&mut self) -> Option<NavOutcome> {
        if !self.mounted {
            return None;
        }
        let id = self.pending.take()?;
        let Some(index) = self.registry.index_of(&id) else {
            debug!(target: "folio.deck", id = id.as_str(), "unknown section requested");
            return Some(NavOutcome::Dropped(DropReason::UnknownSection));
        };
        Some(self.go_to_index(index, NavigateOptions::top()))
    }

    /// Scroll the active panel back to its top and re-announce state.
    ///
    /// Returns `false` when there is no mounted active panel.
    pub fn scroll_active_to_top(&mut self, behavior: ScrollBehavior) -> bool {
        if !self.mounted || self.panel_count() == 0 {
            return false;
        }
        let active = self.publisher.active_index();
        if self.host.panel_metrics(active).is_none() {
            return false;
        }
        let scroll_top = self.position_panel(active, ScrollPosition::Top, behavior);
        self.publisher.announce_state(&self.registry, scroll_top);
        true
    }

    // --- time and input --------------------------------------------------

    /// Advance the running transition by `dt`.
    ///
    /// Returns whether another frame is needed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        if !transition.advance(dt) {
            return true;
        }
        debug!(
            target: "folio.transition",
            from = transition.from(), to = transition.to(),
            elapsed_ms = transition.elapsed().as_millis() as u64,
            "crossfade complete"
        );
        self.finalize();
        false
    }

    /// Snap the running transition to its end.
    pub fn finish_transition(&mut self) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        transition.finish();
        debug!(
            target: "folio.transition",
            from = transition.from(), to = transition.to(),
            elapsed_ms = transition.elapsed().as_millis() as u64,
            complete = transition.is_complete(),
            "crossfade snapped to end"
        );
        self.finalize();
    }

    /// Route a host input event.
    ///
    /// The returned decision tells the host whether to prevent the event's
    /// default action. `Navigate` decisions have already been acted on.
    pub fn handle_input(&mut self, input: &DeckInput, now: Instant) -> GestureDecision {
        if !self.mounted || self.panel_count() == 0 {
            return GestureDecision::PassThrough;
        }
        if let DeckInput::Scroll { scroll_top } = *input {
            self.publisher.announce_state(&self.registry, scroll_top);
            return GestureDecision::PassThrough;
        }

        let active = self.publisher.active_index();
        let ctx = BoundaryContext {
            active,
            panel_count: self.panel_count(),
            metrics: self.host.panel_metrics(active),
            transitioning: self.phase == TransitionPhase::Transitioning,
            coarse_pointer: !self.capabilities.routes_wheel(),
            modal_open: self.modal_open,
        };
        let decision = self.gestures.route(input, ctx, now);
        if let GestureDecision::Navigate { target, position } = decision {
            let outcome = self.go_to_index(target, NavigateOptions::at(position));
            if outcome.drop_reason().is_some() {
                return GestureDecision::Suppress;
            }
        }
        decision
    }

    // --- settings --------------------------------------------------------

    /// Apply new capabilities. Pointer changes affect the next wheel event;
    /// motion changes affect the next transition.
    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        if capabilities != self.capabilities {
            debug!(
                target: "folio.deck",
                reduced_motion = capabilities.prefers_reduced_motion,
                coarse_pointer = capabilities.coarse_pointer,
                "capabilities changed"
            );
        }
        self.capabilities = capabilities;
    }

    /// Block (or unblock) panel switches while a modal is open.
    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
    }

    /// Toggle inspection mode: every panel visible and accessible, focus
    /// management off.
    pub fn set_inspection_mode(&mut self, enabled: bool) {
        self.config.inspection_mode = enabled;
        self.visibility.set_inspection_mode(enabled);
        self.focus.set_enabled(!enabled);
    }

    /// Register a state listener. Dropping the guard unsubscribes.
    pub fn subscribe(&mut self, callback: impl Fn(&DeckEvent) + 'static) -> Subscription {
        self.publisher.subscribe(callback)
    }

    // --- queries ---------------------------------------------------------

    /// Panels bound to sections: `min(sections, host panels)`.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.registry.len().min(self.host.panel_count())
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.publisher.active_index()
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&Section> {
        self.registry.get(self.active_index())
    }

    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.phase == TransitionPhase::Transitioning
    }

    #[must_use]
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    #[must_use]
    pub fn inspection_mode(&self) -> bool {
        self.config.inspection_mode
    }

    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Effective state of panel `index`.
    #[must_use]
    pub fn panel_state(&self, index: usize) -> Option<PanelState> {
        self.visibility.state(index)
    }

    #[must_use]
    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    /// Visual frame of panel `index` at the current point in time.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<PanelFrame> {
        if let Some(frame) = self.transition.as_ref().and_then(|t| t.frame_for(index)) {
            return Some(frame);
        }
        let state = self.visibility.state(index)?;
        Some(if state.is_visible() {
            PanelFrame::REST
        } else {
            PanelFrame::HIDDEN
        })
    }

    #[must_use]
    pub fn transition(&self) -> Option<&Crossfade> {
        self.transition.as_ref()
    }

    #[must_use]
    pub fn gestures(&self) -> &GestureRouter {
        &self.gestures
    }

    #[must_use]
    pub fn pending(&self) -> &PendingNavigation {
        &self.pending
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the deck, returning its host.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    // --- internals -------------------------------------------------------

    fn finalize(&mut self) {
        self.transition = None;
        self.visibility.settle(self.publisher.active_index());
        self.phase = TransitionPhase::Idle;
    }

    /// Move panel `index` to `position`; returns the applied offset.
    fn position_panel(
        &mut self,
        index: usize,
        position: ScrollPosition,
        behavior: ScrollBehavior,
    ) -> f64 {
        match self.host.panel_metrics(index) {
            Some(metrics) => {
                let offset = metrics.offset_for(position);
                self.host.set_panel_scroll(index, offset, behavior);
                offset
            }
            None => 0.0,
        }
    }

    fn dropped(reason: DropReason) -> NavOutcome {
        debug!(target: "folio.deck", reason = reason.as_str(), "navigation dropped");
        NavOutcome::Dropped(reason)
    }
}
