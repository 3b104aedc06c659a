#![forbid(unsafe_code)]

//! Full-viewport panel deck.
//!
//! One panel per portfolio section, switched with a directional crossfade.
//! Wheel and touch input only change panels at a panel's scroll boundary;
//! external navigation goes through a pending-request bridge. The deck owns
//! no DOM: it drives a [`DeckHost`] and exposes per-panel
//! [`PanelState`]/[`PanelFrame`] values for the host to render.
//!
//! ```
//! use folio_core::SectionRegistry;
//! use folio_deck::{DeckConfig, MemoryHost, NavigateOptions, ScrollDeck};
//!
//! let mut deck = ScrollDeck::new(
//!     MemoryHost::uniform(5, 1600.0, 800.0),
//!     SectionRegistry::portfolio(),
//!     DeckConfig::default(),
//! );
//! deck.mount();
//! let outcome = deck.navigate_to_section("projects");
//! assert_eq!(outcome.target(), Some(2));
//! while deck.advance(std::time::Duration::from_millis(16)) {}
//! assert_eq!(deck.active_section().map(|s| s.id.as_str()), Some("projects"));
//! ```

pub mod bridge;
pub mod config;
pub mod deck;
pub mod focus;
pub mod gesture;
pub mod host;
pub mod navigation;
pub mod publisher;
pub mod transition;
pub mod visibility;

pub use bridge::PendingNavigation;
pub use config::{DeckConfig, DeckConfigError, GestureConfig, TransitionConfig, TransitionProfile};
pub use deck::ScrollDeck;
pub use focus::{FocusManager, FocusTarget};
pub use gesture::{BoundaryContext, GestureDecision, GestureRouter};
pub use host::{DeckHost, FocusSurface, LocationSurface, MemoryFocus, MemoryHost, PanelSurface};
pub use navigation::{
    Direction, DropReason, InstantReason, NavOutcome, NavigateOptions, ScrollBehavior,
};
pub use publisher::{ActivePanelChanged, DeckEvent, DeckStateChanged, StatePublisher, Subscription};
pub use transition::{Crossfade, PanelFrame, TransitionPhase};
pub use visibility::{PanelFlags, PanelRenderState, PanelState, VisibilityController, ZLayer};
