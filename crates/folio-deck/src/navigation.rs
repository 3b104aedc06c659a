#![forbid(unsafe_code)]

//! Navigation requests and their outcomes.
//!
//! Navigation never fails loudly. Every way a request can be turned down is
//! a [`DropReason`], returned to the caller and traced, never raised.

use folio_core::ScrollPosition;
use serde::{Deserialize, Serialize};

/// Direction of travel through the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards higher indices (content enters from below).
    #[default]
    Forward,
    /// Towards lower indices (content enters from above).
    Backward,
}

impl Direction {
    /// Direction from `from` to `to`. Equal indices count as forward.
    #[must_use]
    pub const fn between(from: usize, to: usize) -> Self {
        if to < from {
            Self::Backward
        } else {
            Self::Forward
        }
    }

    /// `+1.0` forward, `-1.0` backward.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Where a gesture-driven arrival should land: forward arrivals start
    /// at the top, backward arrivals at the bottom.
    #[must_use]
    pub const fn arrival_position(self) -> ScrollPosition {
        match self {
            Self::Forward => ScrollPosition::Top,
            Self::Backward => ScrollPosition::Bottom,
        }
    }
}

/// How a scroll offset change is applied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// Options for [`crate::ScrollDeck::go_to_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    /// Reposition the destination panel's scroll offset.
    pub reset_target_scroll: bool,
    /// Where to reposition it.
    pub position: ScrollPosition,
    /// How the host applies the reposition for same-panel requests.
    /// Cross-panel pre-staging is always instant.
    pub behavior: ScrollBehavior,
}

impl NavigateOptions {
    /// Land at the top of the destination, as external jumps do.
    #[must_use]
    pub const fn top() -> Self {
        Self {
            reset_target_scroll: true,
            position: ScrollPosition::Top,
            behavior: ScrollBehavior::Instant,
        }
    }

    /// Land at `position`, as gesture-driven navigation does.
    #[must_use]
    pub const fn at(position: ScrollPosition) -> Self {
        Self {
            reset_target_scroll: true,
            position,
            behavior: ScrollBehavior::Instant,
        }
    }

    #[must_use]
    pub const fn with_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = behavior;
        self
    }
}

/// Why a request had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The deck has no panels bound to sections.
    NoPanels,
    /// A transition is already in flight.
    InFlight,
    /// A blocking modal is open.
    ModalOpen,
    /// The requested section id is not registered.
    UnknownSection,
    /// The deck is not mounted.
    Unmounted,
}

impl DropReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoPanels => "no_panels",
            Self::InFlight => "in_flight",
            Self::ModalOpen => "modal_open",
            Self::UnknownSection => "unknown_section",
            Self::Unmounted => "unmounted",
        }
    }
}

/// Why a transition completed without animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstantReason {
    /// The user prefers reduced motion.
    ReducedMotion,
    /// One of the two panel elements is not mounted.
    MissingPanel,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Index committed; the crossfade is running.
    Started {
        from: usize,
        to: usize,
        direction: Direction,
        clamped: bool,
    },
    /// Index committed and the swap already finished.
    Completed {
        from: usize,
        to: usize,
        direction: Direction,
        clamped: bool,
        reason: InstantReason,
    },
    /// Same panel; its scroll offset was reset and state re-announced.
    Repositioned { index: usize },
    /// Same panel; nothing to do.
    Unchanged { index: usize },
    /// The request was dropped.
    Dropped(DropReason),
}

impl NavOutcome {
    /// Whether the active index changed.
    #[must_use]
    pub const fn changed_index(&self) -> bool {
        matches!(self, Self::Started { .. } | Self::Completed { .. })
    }

    /// Index the deck is (or will be) showing, if the request was accepted.
    #[must_use]
    pub const fn target(&self) -> Option<usize> {
        match *self {
            Self::Started { to, .. } | Self::Completed { to, .. } => Some(to),
            Self::Repositioned { index } | Self::Unchanged { index } => Some(index),
            Self::Dropped(_) => None,
        }
    }

    #[must_use]
    pub const fn drop_reason(&self) -> Option<DropReason> {
        match *self {
            Self::Dropped(reason) => Some(reason),
            _ => None,
        }
    }
}
