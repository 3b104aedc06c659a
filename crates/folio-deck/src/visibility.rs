#![forbid(unsafe_code)]

//! Declarative per-panel visibility and accessibility state.
//!
//! The controller never touches the DOM. It records, per panel, a
//! [`PanelRenderState`], a set of [`PanelFlags`], and a [`ZLayer`]; the
//! rendering layer maps those to concrete styles and attributes
//! (`visibility`, `pointer-events`, `aria-hidden`, `inert`, `z-index`).
//!
//! # Invariants
//!
//! 1. Outside a transition exactly one panel is `VISIBLE | INTERACTIVE |
//!    ACCESSIBLE`; all others have no flags.
//! 2. During a transition the outgoing and incoming panels are both visible
//!    and interactive, and only the incoming panel is accessible.
//! 3. In inspection mode [`VisibilityController::state`] reports every panel
//!    with all flags set. The recorded flags are untouched, so leaving
//!    inspection mode restores the production contract.

use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// What a panel currently exposes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PanelFlags: u8 {
        /// Rendered (`visibility: visible`).
        const VISIBLE = 0b0001;
        /// Receives pointer events.
        const INTERACTIVE = 0b0010;
        /// In the accessibility tree and tab order (no `aria-hidden`/`inert`).
        const ACCESSIBLE = 0b0100;

        const SHOWN = Self::VISIBLE.bits() | Self::INTERACTIVE.bits();
        const ALL = Self::SHOWN.bits() | Self::ACCESSIBLE.bits();
    }
}

/// Role a panel plays in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelRenderState {
    /// The settled, current panel.
    Active,
    /// Animating in.
    Entering,
    /// Animating out.
    Exiting,
    /// Not shown.
    #[default]
    Hidden,
}

impl PanelRenderState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Entering => "entering",
            Self::Exiting => "exiting",
            Self::Hidden => "hidden",
        }
    }
}

/// Stacking order of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZLayer {
    #[default]
    Back = 0,
    Middle = 1,
    Front = 2,
}

/// Everything the rendering layer needs to style one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    pub render: PanelRenderState,
    pub flags: PanelFlags,
    pub layer: ZLayer,
}

impl PanelState {
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(PanelFlags::VISIBLE)
    }

    #[inline]
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.flags.contains(PanelFlags::INTERACTIVE)
    }

    #[inline]
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.flags.contains(PanelFlags::ACCESSIBLE)
    }
}

/// Per-panel visibility, interactivity, accessibility, and stacking.
#[derive(Debug, Clone)]
pub struct VisibilityController {
    panels: Vec<PanelState>,
    inspection_mode: bool,
}

impl VisibilityController {
    /// `count` panels with `active` shown.
    #[must_use]
    pub fn new(count: usize, active: usize, inspection_mode: bool) -> Self {
        let mut controller = Self {
            panels: vec![PanelState::default(); count],
            inspection_mode,
        };
        controller.settle(active);
        controller
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn inspection_mode(&self) -> bool {
        self.inspection_mode
    }

    pub fn set_inspection_mode(&mut self, enabled: bool) {
        self.inspection_mode = enabled;
    }

    /// Show or hide a panel. Hidden panels also stop intercepting pointers.
    pub fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(panel) = self.panels.get_mut(index) {
            panel.flags.set(PanelFlags::SHOWN, visible);
        }
    }

    /// Expose a panel to assistive technology and tab order, or exclude it.
    pub fn set_accessible(&mut self, index: usize, active: bool) {
        if let Some(panel) = self.panels.get_mut(index) {
            panel.flags.set(PanelFlags::ACCESSIBLE, active);
        }
    }

    pub fn set_render(&mut self, index: usize, render: PanelRenderState) {
        if let Some(panel) = self.panels.get_mut(index) {
            panel.render = render;
        }
    }

    pub fn set_layer(&mut self, index: usize, layer: ZLayer) {
        if let Some(panel) = self.panels.get_mut(index) {
            panel.layer = layer;
        }
    }

    /// Stage a crossfade: both panels shown, only `to` accessible.
    pub fn begin_transition(&mut self, from: usize, to: usize) {
        self.set_visible(to, true);
        self.set_accessible(to, true);
        self.set_render(to, PanelRenderState::Entering);
        self.set_layer(to, ZLayer::Front);

        self.set_accessible(from, false);
        self.set_render(from, PanelRenderState::Exiting);
        self.set_layer(from, ZLayer::Middle);
    }

    /// Settle on `active`: it alone is shown and accessible.
    pub fn settle(&mut self, active: usize) {
        for (index, panel) in self.panels.iter_mut().enumerate() {
            *panel = if index == active {
                PanelState {
                    render: PanelRenderState::Active,
                    flags: PanelFlags::ALL,
                    layer: ZLayer::Front,
                }
            } else {
                PanelState {
                    render: PanelRenderState::Hidden,
                    flags: PanelFlags::empty(),
                    layer: ZLayer::Back,
                }
            };
        }
    }

    /// Effective state of a panel, with the inspection override applied.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<PanelState> {
        let mut state = *self.panels.get(index)?;
        if self.inspection_mode {
            state.flags = PanelFlags::ALL;
        }
        Some(state)
    }

    /// Recorded state, ignoring the inspection override.
    #[must_use]
    pub fn recorded(&self, index: usize) -> Option<PanelState> {
        self.panels.get(index).copied()
    }

    pub fn states(&self) -> impl Iterator<Item = PanelState> + '_ {
        (0..self.panels.len()).filter_map(|i| self.state(i))
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.states().filter(PanelState::is_visible).count()
    }

    #[must_use]
    pub fn accessible_count(&self) -> usize {
        self.states().filter(PanelState::is_accessible).count()
    }
}
