#![forbid(unsafe_code)]

//! Scroll-container geometry for one panel.
//!
//! Edge detection uses a small tolerance because browsers report fractional
//! `scrollTop` values on zoomed or high-DPI displays, so "at the bottom" can
//! land a fraction of a pixel short of `scroll_height - client_height`.

use serde::{Deserialize, Serialize};

/// Default edge tolerance in CSS pixels.
pub const EDGE_TOLERANCE: f64 = 1.0;

/// Where a panel's scroll offset should land when it is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPosition {
    /// Offset 0.
    #[default]
    Top,
    /// The maximum scrollable offset.
    Bottom,
}

/// Snapshot of a panel's scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub const fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// A panel whose content fits without scrolling.
    #[must_use]
    pub const fn fitted(height: f64) -> Self {
        Self::new(0.0, height, height)
    }

    /// Largest valid `scroll_top`. Never negative.
    #[inline]
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Whether the container is at its top edge.
    #[inline]
    #[must_use]
    pub fn at_top(&self, tolerance: f64) -> bool {
        self.scroll_top <= tolerance
    }

    /// Whether the container is at its bottom edge.
    #[inline]
    #[must_use]
    pub fn at_bottom(&self, tolerance: f64) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - tolerance
    }

    /// Offset for a [`ScrollPosition`].
    #[must_use]
    pub fn offset_for(&self, position: ScrollPosition) -> f64 {
        match position {
            ScrollPosition::Top => 0.0,
            ScrollPosition::Bottom => self.max_offset(),
        }
    }

    /// Copy with a new offset, clamped into `[0, max_offset]`.
    #[must_use]
    pub fn scrolled_to(mut self, offset: f64) -> Self {
        self.scroll_top = offset.clamp(0.0, self.max_offset());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_panel_is_at_both_edges() {
        let m = ScrollMetrics::fitted(800.0);
        assert!(m.at_top(EDGE_TOLERANCE));
        assert!(m.at_bottom(EDGE_TOLERANCE));
        assert_eq!(m.max_offset(), 0.0);
    }

    #[test]
    fn tall_panel_edges() {
        let m = ScrollMetrics::new(0.0, 2000.0, 800.0);
        assert!(m.at_top(EDGE_TOLERANCE));
        assert!(!m.at_bottom(EDGE_TOLERANCE));

        let m = m.scrolled_to(600.0);
        assert!(!m.at_top(EDGE_TOLERANCE));
        assert!(!m.at_bottom(EDGE_TOLERANCE));

        let m = m.scrolled_to(1199.5);
        assert!(m.at_bottom(EDGE_TOLERANCE));
    }

    #[test]
    fn offset_for_positions() {
        let m = ScrollMetrics::new(300.0, 2000.0, 800.0);
        assert_eq!(m.offset_for(ScrollPosition::Top), 0.0);
        assert_eq!(m.offset_for(ScrollPosition::Bottom), 1200.0);
    }

    #[test]
    fn scrolled_to_clamps() {
        let m = ScrollMetrics::new(0.0, 1000.0, 800.0);
        assert_eq!(m.scrolled_to(-5.0).scroll_top, 0.0);
        assert_eq!(m.scrolled_to(900.0).scroll_top, 200.0);
    }

    #[test]
    fn content_shorter_than_viewport_has_zero_max() {
        let m = ScrollMetrics::new(0.0, 300.0, 800.0);
        assert_eq!(m.max_offset(), 0.0);
    }
}
