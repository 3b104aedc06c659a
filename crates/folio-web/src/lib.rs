#![forbid(unsafe_code)]

//! Browser adapter for the folio panel deck.
//!
//! The deck itself is pure state. This crate turns that state into what a
//! page needs:
//!
//! - [`style::PanelStyle`]: CSS and ARIA attributes for one panel.
//! - [`snapshot::DeckSnapshot`]: a JSON view of the whole deck.
//! - [`runner::DeckRunner`]: a host-driven wrapper with a deterministic
//!   clock, JSON input decoding, and an event outbox.
//! - On `wasm32`, `FolioDeck`: the `wasm-bindgen` export driving a
//!   JS-callback host.

pub mod clock;
pub mod runner;
pub mod snapshot;
pub mod style;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioDeck;

pub use clock::DeterministicClock;
pub use runner::DeckRunner;
pub use snapshot::{DeckSnapshot, PanelSnapshot};
pub use style::PanelStyle;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "FOLIO_LOG";

/// Install a JSON `tracing` subscriber filtered by [`LOG_ENV`]
/// (default `info`).
///
/// Returns an error if a global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
}
