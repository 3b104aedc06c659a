#![forbid(unsafe_code)]

//! Host-driven deck runner.
//!
//! [`DeckRunner`] owns a [`ScrollDeck`], a [`DeterministicClock`], and an
//! outbox of [`DeckEvent`]s. A page calls it once per animation frame:
//!
//! ```text
//! push inputs ─► advance_time_ms(dt) ─► snapshot() / drain_events()
//! ```
//!
//! It is generic over the host so the same code runs against the JS
//! callback host in the browser and [`folio_deck::MemoryHost`] in tests.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Capabilities, DeckInput, SectionRegistry};
use folio_deck::{
    DeckConfig, DeckEvent, DeckHost, GestureDecision, NavOutcome, ScrollBehavior, ScrollDeck,
    Subscription,
};
use tracing::debug;

use crate::clock::DeterministicClock;
use crate::snapshot::DeckSnapshot;

#[derive(Debug)]
pub struct DeckRunner<H: DeckHost> {
    deck: ScrollDeck<H>,
    clock: DeterministicClock,
    outbox: Rc<RefCell<Vec<DeckEvent>>>,
    subscription: Option<Subscription>,
}

impl<H: DeckHost> DeckRunner<H> {
    #[must_use]
    pub fn new(host: H, registry: SectionRegistry, config: DeckConfig, caps: Capabilities) -> Self {
        Self::with_clock(host, registry, config, caps, DeterministicClock::new())
    }

    #[must_use]
    pub fn with_clock(
        host: H,
        registry: SectionRegistry,
        config: DeckConfig,
        caps: Capabilities,
        clock: DeterministicClock,
    ) -> Self {
        Self {
            deck: ScrollDeck::new(host, registry, config).with_capabilities(caps),
            clock,
            outbox: Rc::new(RefCell::new(Vec::new())),
            subscription: None,
        }
    }

    /// Mount the deck. Initial events land in the outbox.
    pub fn init(&mut self) -> Option<NavOutcome> {
        if self.subscription.is_none() {
            let outbox = Rc::clone(&self.outbox);
            self.subscription = Some(
                self.deck
                    .subscribe(move |event| outbox.borrow_mut().push(event.clone())),
            );
        }
        self.deck.mount()
    }

    /// Unmount the deck and drop the outbox subscription.
    pub fn destroy(&mut self) {
        self.deck.unmount();
        self.subscription = None;
    }

    /// Advance time by `dt_ms`. Returns whether another frame is needed.
    pub fn advance_time_ms(&mut self, dt_ms: f64) -> bool {
        let dt = self.clock.advance_ms(dt_ms);
        self.deck.advance(dt)
    }

    pub fn push_input(&mut self, input: &DeckInput) -> GestureDecision {
        let now = self.clock.now();
        self.deck.handle_input(input, now)
    }

    /// Decode a JSON input (`{"kind":"wheel","delta_y":40}`) and route it.
    pub fn push_encoded_input(&mut self, json: &str) -> Result<GestureDecision, serde_json::Error> {
        let input: DeckInput = serde_json::from_str(json).map_err(|err| {
            debug!(target: "folio.deck", error = %err, "malformed input");
            err
        })?;
        Ok(self.push_input(&input))
    }

    pub fn navigate(&mut self, id: &str) -> NavOutcome {
        self.deck.navigate_to_section(id)
    }

    pub fn scroll_to_top(&mut self, smooth: bool) -> bool {
        let behavior = if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        self.deck.scroll_active_to_top(behavior)
    }

    pub fn set_capabilities(&mut self, caps: Capabilities) {
        self.deck.set_capabilities(caps);
    }

    pub fn set_modal_open(&mut self, open: bool) {
        self.deck.set_modal_open(open);
    }

    #[must_use]
    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot::capture(&self.deck)
    }

    /// Take every event published since the last drain.
    pub fn drain_events(&mut self) -> Vec<DeckEvent> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }

    #[must_use]
    pub fn clock(&self) -> &DeterministicClock {
        &self.clock
    }

    #[must_use]
    pub fn deck(&self) -> &ScrollDeck<H> {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut ScrollDeck<H> {
        &mut self.deck
    }
}
