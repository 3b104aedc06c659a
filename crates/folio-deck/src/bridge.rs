#![forbid(unsafe_code)]

//! Pending-navigation bridge.
//!
//! Holds at most one section id requested from outside the deck (a nav bar,
//! a deep link) until the deck consumes it. The request is handed out exactly
//! once; a newer request replaces an older unconsumed one.

use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingNavigation {
    pending: Option<String>,
}

impl PendingNavigation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `id`, replacing any unconsumed request.
    pub fn request(&mut self, id: impl Into<String>) {
        let id = id.into();
        trace!(target: "folio.deck", id = id.as_str(), "navigation requested");
        self.pending = Some(id);
    }

    /// Consume the pending request.
    pub fn take(&mut self) -> Option<String> {
        self.pending.take()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
