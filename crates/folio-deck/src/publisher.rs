#![forbid(unsafe_code)]

//! Navigation/state publisher.
//!
//! Owns the committed active index, keeps the URL fragment in sync, and
//! notifies subscribers. Subscribers are held as `Weak` references; the
//! [`Subscription`] guard returned by [`StatePublisher::subscribe`] owns the
//! only strong reference, so dropping it unsubscribes.
//!
//! # Invariants
//!
//! 1. The fragment is written only when it differs from the committed id,
//!    and always by replacement (no history entries).
//! 2. For one commit, [`DeckEvent::StateChanged`] is delivered before
//!    [`DeckEvent::ActivePanelChanged`].
//! 3. Subscribers are called in registration order. Dead ones are pruned
//!    lazily on the next emit.

use std::rc::{Rc, Weak};

use folio_core::SectionRegistry;
use serde::Serialize;
use tracing::{info, trace};

use crate::host::LocationSurface;

/// Published after every commit and intra-panel scroll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckStateChanged {
    pub index: usize,
    pub id: String,
    pub scroll_top: f64,
}

/// Published once the new panel is visible and exposed to assistive tech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivePanelChanged {
    pub index: usize,
    pub id: String,
}

/// Outbound deck notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeckEvent {
    StateChanged(DeckStateChanged),
    ActivePanelChanged(ActivePanelChanged),
}

impl DeckEvent {
    /// Index the event refers to.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::StateChanged(e) => e.index,
            Self::ActivePanelChanged(e) => e.index,
        }
    }
}

type CallbackRc = Rc<dyn Fn(&DeckEvent)>;
type CallbackWeak = Weak<dyn Fn(&DeckEvent)>;

/// RAII guard for a deck subscription.
///
/// Dropping it drops the callback; the publisher's weak reference stops
/// upgrading and is pruned on the next emit.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    _guard: CallbackRc,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Committed deck index plus its subscribers.
#[derive(Default)]
pub struct StatePublisher {
    active_index: usize,
    subscribers: Vec<CallbackWeak>,
}

impl std::fmt::Debug for StatePublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatePublisher")
            .field("active_index", &self.active_index)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl StatePublisher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Register `callback`; it stays live as long as the guard does.
    pub fn subscribe(&mut self, callback: impl Fn(&DeckEvent) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.subscribers.push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Commit `index` as active: sync the fragment and emit
    /// [`DeckEvent::StateChanged`].
    ///
    /// Returns `false` (and does nothing) when `index` has no section.
    pub fn commit(
        &mut self,
        location: &mut impl LocationSurface,
        registry: &SectionRegistry,
        index: usize,
        scroll_top: f64,
    ) -> bool {
        let Some(id) = registry.id_at(index) else {
            return false;
        };
        let previous = self.active_index;
        self.active_index = index;
        if location.fragment().as_deref() != Some(id) {
            location.replace_fragment(id);
            trace!(target: "folio.publisher", id, "fragment replaced");
        }
        info!(target: "folio.publisher", from = previous, to = index, id, "active panel committed");
        self.emit(&DeckEvent::StateChanged(DeckStateChanged {
            index,
            id: id.to_owned(),
            scroll_top,
        }));
        true
    }

    /// Re-announce the current state without changing the index.
    pub fn announce_state(&mut self, registry: &SectionRegistry, scroll_top: f64) {
        if let Some(id) = registry.id_at(self.active_index) {
            self.emit(&DeckEvent::StateChanged(DeckStateChanged {
                index: self.active_index,
                id: id.to_owned(),
                scroll_top,
            }));
        }
    }

    /// Emit [`DeckEvent::ActivePanelChanged`] for the committed index.
    pub fn announce_active(&mut self, registry: &SectionRegistry) {
        if let Some(id) = registry.id_at(self.active_index) {
            self.emit(&DeckEvent::ActivePanelChanged(ActivePanelChanged {
                index: self.active_index,
                id: id.to_owned(),
            }));
        }
    }

    /// Forget every subscriber and return to index 0.
    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.active_index = 0;
    }

    fn emit(&mut self, event: &DeckEvent) {
        self.subscribers.retain(|w| w.strong_count() > 0);
        let callbacks: Vec<CallbackRc> = self.subscribers.iter().filter_map(Weak::upgrade).collect();
        for cb in &callbacks {
            cb(event);
        }
    }
}
