#![forbid(unsafe_code)]

//! Keyboard focus hand-off between panels.
//!
//! Hiding a subtree that still contains the focused element leaves focus
//! stranded inside content that assistive technology can no longer reach
//! (browsers also warn about `aria-hidden` on a focused ancestor). The
//! [`FocusManager`] prevents this in two steps:
//!
//! 1. [`release`](FocusManager::release): before the outgoing panel loses
//!    accessibility, move focus from inside it to the deck root.
//! 2. [`enter`](FocusManager::enter): once the incoming panel is exposed,
//!    focus its first tab-reachable element, or the panel container itself.
//!
//! # Failure Modes
//!
//! - Unmounted panel: `enter` returns `None` and focus stays where it is.
//! - Inspection mode: the manager is disabled and never moves focus.

use tracing::debug;

use crate::host::FocusSurface;

/// Where the manager last placed focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The deck root container.
    DeckRoot,
    /// The first focusable element of a panel.
    FirstFocusable(usize),
    /// A panel container.
    Panel(usize),
}

/// Moves focus out of outgoing panels and into incoming ones.
#[derive(Debug, Clone)]
pub struct FocusManager {
    enabled: bool,
    last: Option<FocusTarget>,
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            last: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Last target focus was moved to.
    #[must_use]
    pub fn last_target(&self) -> Option<FocusTarget> {
        self.last
    }

    /// If focus is inside `outgoing`, park it on the deck root.
    ///
    /// Returns `true` when focus was moved.
    pub fn release(&mut self, host: &mut impl FocusSurface, outgoing: usize) -> bool {
        if !self.enabled || host.focused_panel() != Some(outgoing) {
            return false;
        }
        host.focus_deck_root();
        self.last = Some(FocusTarget::DeckRoot);
        debug!(target: "folio.focus", outgoing, "released focus to deck root");
        true
    }

    /// Focus into `incoming`: first focusable element, else the container.
    pub fn enter(&mut self, host: &mut impl FocusSurface, incoming: usize) -> Option<FocusTarget> {
        if !self.enabled {
            return None;
        }
        let target = if host.focus_first_focusable(incoming) {
            FocusTarget::FirstFocusable(incoming)
        } else if host.focus_panel(incoming) {
            FocusTarget::Panel(incoming)
        } else {
            debug!(target: "folio.focus", incoming, "incoming panel not focusable");
            return None;
        };
        self.last = Some(target);
        Some(target)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
