#![forbid(unsafe_code)]

//! Render state to CSS.
//!
//! Maps a panel's [`PanelState`] and current [`PanelFrame`] to the inline
//! style and attributes the page applies. The deck never touches styles
//! directly; this is the only place that knows about CSS.

use folio_deck::{PanelFrame, PanelRenderState, PanelState, ZLayer};
use serde::Serialize;

/// Inline style plus accessibility attributes for one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelStyle {
    pub opacity: f32,
    /// `transform` value, `none` at rest.
    pub transform: String,
    /// `filter` value, `none` when unblurred.
    pub filter: String,
    pub visibility: &'static str,
    pub pointer_events: &'static str,
    pub z_index: u8,
    /// `will-change` hint while animating.
    pub will_change: &'static str,
    pub aria_hidden: bool,
    pub inert: bool,
}

impl PanelStyle {
    #[must_use]
    pub fn resolve(state: PanelState, frame: PanelFrame) -> Self {
        let animating = matches!(
            state.render,
            PanelRenderState::Entering | PanelRenderState::Exiting
        );
        Self {
            opacity: if state.is_visible() { frame.opacity } else { 0.0 },
            transform: transform(frame),
            filter: if frame.blur > 0.0 {
                format!("blur({}px)", css_number(frame.blur))
            } else {
                "none".to_owned()
            },
            visibility: if state.is_visible() { "visible" } else { "hidden" },
            pointer_events: if state.is_interactive() { "auto" } else { "none" },
            z_index: z_index(state.layer),
            will_change: if animating {
                "opacity, transform, filter"
            } else {
                "auto"
            },
            aria_hidden: !state.is_accessible(),
            inert: !state.is_accessible(),
        }
    }

    /// Inline `style` attribute value.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "opacity: {}; transform: {}; filter: {}; visibility: {}; pointer-events: {}; z-index: {}; will-change: {};",
            css_number(self.opacity),
            self.transform,
            self.filter,
            self.visibility,
            self.pointer_events,
            self.z_index,
            self.will_change,
        )
    }
}

fn z_index(layer: ZLayer) -> u8 {
    match layer {
        ZLayer::Back => 0,
        ZLayer::Middle => 1,
        ZLayer::Front => 2,
    }
}

fn transform(frame: PanelFrame) -> String {
    let still = frame.translate_y.abs() < 0.005 && (frame.scale - 1.0).abs() < 0.0005;
    if still {
        return "none".to_owned();
    }
    format!(
        "translate3d(0, {}px, 0) scale({})",
        css_number(frame.translate_y),
        css_number(frame.scale)
    )
}

/// Up to three decimals, trailing zeros trimmed, never `-0`.
fn css_number(value: f32) -> String {
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_owned();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_deck::PanelFlags;

    fn active() -> PanelState {
        PanelState {
            render: PanelRenderState::Active,
            flags: PanelFlags::ALL,
            layer: ZLayer::Front,
        }
    }

    #[test]
    fn active_panel_at_rest() {
        let style = PanelStyle::resolve(active(), PanelFrame::REST);
        assert_eq!(
            style.to_css(),
            "opacity: 1; transform: none; filter: none; visibility: visible; pointer-events: auto; z-index: 2; will-change: auto;"
        );
        assert!(!style.aria_hidden);
        assert!(!style.inert);
    }

    #[test]
    fn hidden_panel() {
        let style = PanelStyle::resolve(PanelState::default(), PanelFrame::HIDDEN);
        assert_eq!(style.visibility, "hidden");
        assert_eq!(style.pointer_events, "none");
        assert_eq!(style.z_index, 0);
        assert!(style.aria_hidden && style.inert);
    }

    #[test]
    fn entering_panel_transform() {
        let state = PanelState {
            render: PanelRenderState::Entering,
            ..active()
        };
        let frame = PanelFrame {
            opacity: 0.25,
            translate_y: 60.0,
            scale: 0.97,
            blur: 7.5,
        };
        let style = PanelStyle::resolve(state, frame);
        assert_eq!(style.transform, "translate3d(0, 60px, 0) scale(0.97)");
        assert_eq!(style.filter, "blur(7.5px)");
        assert_eq!(style.will_change, "opacity, transform, filter");
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(css_number(1.0), "1");
        assert_eq!(css_number(-0.0001), "0");
        assert_eq!(css_number(-12.5), "-12.5");
        assert_eq!(css_number(0.123_456), "0.123");
    }
}
