#![forbid(unsafe_code)]

//! Canonical deck input events.
//!
//! The host translates raw DOM events into [`DeckInput`] values and feeds
//! them to the deck. Only the fields the deck actually reads are carried.
//!
//! # Design Notes
//!
//! - `Wheel::delta_y` follows the DOM convention: positive scrolls content
//!   down (towards the end of the page).
//! - Touch coordinates are client coordinates in CSS pixels.
//! - `Scroll` reports the active panel's new `scrollTop` after the browser
//!   has applied it.

use serde::{Deserialize, Serialize};

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Input delivered to the deck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeckInput {
    /// Mouse wheel or trackpad scroll over the deck.
    Wheel { delta_y: f64 },
    /// A touch contact began. `touches` counts all active contacts.
    TouchStart { point: TouchPoint, touches: u8 },
    /// A touch contact moved.
    TouchMove { point: TouchPoint, touches: u8 },
    /// The last contact lifted.
    TouchEnd,
    /// The platform cancelled the touch sequence.
    TouchCancel,
    /// The active panel scrolled internally.
    Scroll { scroll_top: f64 },
}

impl DeckInput {
    #[must_use]
    pub const fn wheel(delta_y: f64) -> Self {
        Self::Wheel { delta_y }
    }

    #[must_use]
    pub const fn touch_start(y: f64) -> Self {
        Self::TouchStart {
            point: TouchPoint::new(0.0, y),
            touches: 1,
        }
    }

    #[must_use]
    pub const fn touch_move(y: f64) -> Self {
        Self::TouchMove {
            point: TouchPoint::new(0.0, y),
            touches: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_touch_constructors() {
        let DeckInput::TouchStart { point, touches } = DeckInput::touch_start(42.0) else {
            unreachable!("constructor builds TouchStart");
        };
        assert_eq!(point.y, 42.0);
        assert_eq!(touches, 1);
    }
}
