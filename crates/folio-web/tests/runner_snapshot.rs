//! Runner and snapshot behavior over the in-memory host.

use folio_core::{Capabilities, SectionRegistry};
use folio_deck::{DeckConfig, DeckEvent, GestureDecision, MemoryHost, NavOutcome, TransitionPhase};
use folio_web::{DeckRunner, PanelStyle};
use pretty_assertions::assert_eq;
use serde_json::json;

fn runner(caps: Capabilities) -> DeckRunner<MemoryHost> {
    let mut runner = DeckRunner::new(
        MemoryHost::uniform(5, 800.0, 800.0),
        SectionRegistry::portfolio(),
        DeckConfig::default(),
        caps,
    );
    runner.init();
    runner
}

#[test]
fn initial_snapshot_json() {
    let runner = runner(Capabilities::desktop());
    let value = runner.snapshot().to_json_value().expect("serialize");
    assert_eq!(value["active_index"], json!(0));
    assert_eq!(value["active_id"], json!("home"));
    assert_eq!(value["phase"], json!("idle"));
    assert_eq!(value["panels"].as_array().map(Vec::len), Some(5));
    assert_eq!(
        value["panels"][0]["style"],
        json!({
            "opacity": 1.0,
            "transform": "none",
            "filter": "none",
            "visibility": "visible",
            "pointer_events": "auto",
            "z_index": 2,
            "will_change": "auto",
            "aria_hidden": false,
            "inert": false,
        })
    );
    assert_eq!(value["panels"][1]["render"], json!("hidden"));
    assert_eq!(value["panels"][1]["style"]["aria_hidden"], json!(true));
}

#[test]
fn init_publishes_initial_state() {
    let mut runner = runner(Capabilities::desktop());
    let events = runner.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], DeckEvent::StateChanged(e) if e.id == "home"));
    assert!(matches!(&events[1], DeckEvent::ActivePanelChanged(e) if e.index == 0));
    assert!(runner.drain_events().is_empty());
}

#[test]
fn encoded_wheel_drives_transition() {
    let mut runner = runner(Capabilities::desktop());
    runner.drain_events();

    let decision = runner
        .push_encoded_input(r#"{"kind":"wheel","delta_y":48.0}"#)
        .expect("valid input");
    assert!(matches!(decision, GestureDecision::Navigate { target: 1, .. }));

    let mid = runner.snapshot();
    assert_eq!(mid.phase, TransitionPhase::Transitioning);
    assert_eq!(mid.panels[1].style.will_change, "opacity, transform, filter");

    let mut frames = 0;
    while runner.advance_time_ms(16.0) {
        frames += 1;
    }
    assert!(frames > 10, "desktop crossfade should span many frames");
    let done = runner.snapshot();
    assert_eq!(done.phase, TransitionPhase::Idle);
    assert_eq!(done.active_id.as_deref(), Some("about"));
    assert_eq!(
        done.panels[0].style,
        PanelStyle::resolve(
            runner.deck().panel_state(0).expect("state"),
            folio_deck::PanelFrame::HIDDEN
        )
    );

    // The cooldown armed at t=0 has expired by the end of the crossfade.
    assert!(!runner.deck().gestures().in_cooldown(runner.clock().now()));
    let next = runner
        .push_encoded_input(r#"{"kind":"wheel","delta_y":48.0}"#)
        .expect("valid input");
    assert!(matches!(next, GestureDecision::Navigate { target: 2, .. }));
}

#[test]
fn cooldown_runs_on_deterministic_clock() {
    let mut runner = runner(Capabilities::desktop().with_reduced_motion(true));
    let wheel = r#"{"kind":"wheel","delta_y":48.0}"#;
    assert!(matches!(
        runner.push_encoded_input(wheel),
        Ok(GestureDecision::Navigate { target: 1, .. })
    ));
    runner.advance_time_ms(100.0);
    assert_eq!(runner.push_encoded_input(wheel).ok(), Some(GestureDecision::Suppress));
    assert_eq!(runner.deck().active_index(), 1);
    runner.advance_time_ms(700.0);
    assert!(matches!(
        runner.push_encoded_input(wheel),
        Ok(GestureDecision::Navigate { target: 2, .. })
    ));
}

#[test]
fn malformed_input_is_an_error() {
    let mut runner = runner(Capabilities::desktop());
    assert!(runner.push_encoded_input("{\"kind\":\"pinch\"}").is_err());
    assert!(runner.push_encoded_input("not json").is_err());
}

#[test]
fn touch_json_round_trip() {
    let mut runner = runner(Capabilities::touch());
    let start = r#"{"kind":"touch_start","point":{"x":10.0,"y":500.0},"touches":1}"#;
    let moved = r#"{"kind":"touch_move","point":{"x":10.0,"y":420.0},"touches":1}"#;
    assert_eq!(runner.push_encoded_input(start).ok(), Some(GestureDecision::PassThrough));
    assert!(matches!(
        runner.push_encoded_input(moved),
        Ok(GestureDecision::Navigate { target: 1, .. })
    ));
    assert_eq!(
        runner.push_encoded_input(r#"{"kind":"touch_end"}"#).ok(),
        Some(GestureDecision::PassThrough)
    );
}

#[test]
fn navigate_and_events_serialize() {
    let mut runner = runner(Capabilities::desktop().with_reduced_motion(true));
    runner.drain_events();
    let outcome = runner.navigate("services");
    assert!(matches!(outcome, NavOutcome::Completed { to: 4, .. }));
    let events = serde_json::to_value(runner.drain_events()).expect("serialize");
    assert_eq!(
        events,
        json!([
            {"type": "state_changed", "index": 4, "id": "services", "scroll_top": 0.0},
            {"type": "active_panel_changed", "index": 4, "id": "services"},
        ])
    );
}

#[test]
fn destroy_then_init_resubscribes() {
    let mut runner = runner(Capabilities::desktop());
    runner.drain_events();
    runner.destroy();
    assert!(!runner.deck().is_mounted());
    runner.init();
    assert_eq!(runner.drain_events().len(), 2);
}

#[test]
fn snapshot_before_drain_already_exposes_new_panel() {
    let mut runner = runner(Capabilities::desktop());
    runner.drain_events();
    assert!(matches!(runner.navigate("projects"), NavOutcome::Started { to: 2, .. }));

    let snapshot = runner.snapshot().to_json_value().expect("serialize");
    let target = &snapshot["panels"][2]["style"];
    assert_eq!(target["aria_hidden"], json!(false));
    assert_eq!(target["inert"], json!(false));
    assert_eq!(target["visibility"], json!("visible"));

    let events = runner.drain_events();
    assert!(matches!(events.last(), Some(DeckEvent::ActivePanelChanged(e)) if e.index == 2));
}
