#![forbid(unsafe_code)]

//! JSON view of the deck, for the page script and for debugging.

use folio_deck::{
    DeckHost, Direction, PanelFrame, PanelRenderState, ScrollDeck, TransitionPhase, ZLayer,
};
use serde::Serialize;

use crate::style::PanelStyle;

/// One panel as the page sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub index: usize,
    pub id: String,
    pub render: PanelRenderState,
    pub layer: ZLayer,
    pub visible: bool,
    pub interactive: bool,
    pub accessible: bool,
    pub frame: PanelFrame,
    pub style: PanelStyle,
}

/// The whole deck at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckSnapshot {
    pub active_index: usize,
    pub active_id: Option<String>,
    pub phase: TransitionPhase,
    pub direction: Direction,
    pub modal_open: bool,
    pub inspection_mode: bool,
    pub panels: Vec<PanelSnapshot>,
}

impl DeckSnapshot {
    #[must_use]
    pub fn capture<H: DeckHost>(deck: &ScrollDeck<H>) -> Self {
        let registry = deck.registry();
        let panels = (0..deck.panel_count())
            .filter_map(|index| {
                let state = deck.panel_state(index)?;
                let frame = deck.frame(index)?;
                let id = registry.id_at(index)?.to_owned();
                Some(PanelSnapshot {
                    index,
                    id,
                    render: state.render,
                    layer: state.layer,
                    visible: state.is_visible(),
                    interactive: state.is_interactive(),
                    accessible: state.is_accessible(),
                    frame,
                    style: PanelStyle::resolve(state, frame),
                })
            })
            .collect();
        Self {
            active_index: deck.active_index(),
            active_id: deck.active_section().map(|s| s.id.clone()),
            phase: deck.phase(),
            direction: deck.last_direction(),
            modal_open: deck.is_modal_open(),
            inspection_mode: deck.inspection_mode(),
            panels,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
