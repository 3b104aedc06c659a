#![forbid(unsafe_code)]

//! Log events emitted by the deck: levels, targets, fields and span nesting.
//!
//! Run:
//!   cargo test -p folio-deck --test tracing_deck_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use folio_core::{Capabilities, SectionRegistry};
use folio_deck::{DeckConfig, MemoryHost, NavigateOptions, ScrollDeck};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_span_name,
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn deck(host: MemoryHost) -> ScrollDeck<MemoryHost> {
    ScrollDeck::new(host, SectionRegistry::portfolio(), DeckConfig::default())
        .with_capabilities(Capabilities::desktop())
}

#[test]
fn dropped_request_logged_at_debug_inside_span() {
    let events = with_captured_events(|| {
        let mut d = deck(MemoryHost::uniform(5, 800.0, 800.0));
        d.mount();
        d.go_to_index(1, NavigateOptions::top());
        d.go_to_index(2, NavigateOptions::top());
    });
    let dropped: Vec<_> = events
        .iter()
        .filter(|e| e.fields.get("reason").map(String::as_str) == Some("in_flight"))
        .collect();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].level, tracing::Level::DEBUG);
    assert_eq!(dropped[0].target, "folio.deck");
    assert_eq!(dropped[0].parent_span_name.as_deref(), Some("deck.go_to_index"));
}

#[test]
fn commit_logged_at_info() {
    let events = with_captured_events(|| {
        let mut d = deck(MemoryHost::uniform(5, 800.0, 800.0));
        d.mount();
        d.go_to_index(3, NavigateOptions::top());
    });
    let commits: Vec<_> = events
        .iter()
        .filter(|e| e.target == "folio.publisher" && e.level == tracing::Level::INFO)
        .collect();
    // Initial reveal plus the switch.
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[1].fields.get("to").map(String::as_str), Some("3"));
    assert_eq!(commits[1].fields.get("id").map(String::as_str), Some("certifications"));
}

#[test]
fn missing_panel_logged_at_warn() {
    let events = with_captured_events(|| {
        let mut d = deck(MemoryHost::uniform(5, 800.0, 800.0).with_panel(1, None));
        d.mount();
        d.go_to_index(1, NavigateOptions::top());
    });
    let warnings: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].target, "folio.transition");
    assert_eq!(
        warnings[0].fields.get("incoming_mounted").map(String::as_str),
        Some("false")
    );
}
