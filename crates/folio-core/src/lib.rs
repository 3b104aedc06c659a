#![forbid(unsafe_code)]

//! Core: sections, runtime capabilities, input events, and animation primitives.
//!
//! # Role in Folio
//! `folio-core` is the leaf layer of the panel deck. It owns the ordered
//! [`section::SectionRegistry`], the environment [`capabilities::Capabilities`]
//! value object, normalized deck input events, scroll-container metrics, and
//! the small tween/timeline toolkit the transition engine is built on.
//!
//! # How it fits in the system
//! `folio-deck` consumes these types and drives the navigation state machine.
//! Nothing in this crate holds mutable state across calls except the
//! animation values themselves, so every type here is cheap to test in
//! isolation.

pub mod animation;
pub mod capabilities;
pub mod event;
pub mod scroll;
pub mod section;

pub use capabilities::Capabilities;
pub use event::{DeckInput, TouchPoint};
pub use scroll::{ScrollMetrics, ScrollPosition};
pub use section::{Section, SectionError, SectionRegistry};
