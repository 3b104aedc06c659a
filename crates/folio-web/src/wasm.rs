#![forbid(unsafe_code)]

//! `wasm-bindgen` export for the panel deck.
//!
//! The page passes a plain object of callbacks as the host; see [`JsHost`].
//! Only compiled on `wasm32` targets.

use folio_core::capabilities::MediaFeatures;
use folio_core::{Capabilities, ScrollMetrics, SectionRegistry};
use folio_deck::{
    DeckConfig, FocusSurface, GestureDecision, LocationSurface, NavOutcome, PanelSurface,
    ScrollBehavior,
};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::runner::DeckRunner;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!("panic at {}:{}:{}: {info}", loc.file(), loc.line(), loc.column())
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn get_f64(obj: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_f64()
}

/// Host implemented by page callbacks.
///
/// Expected shape (every member optional; missing ones behave as
/// "not mounted" or no-ops):
///
/// ```js
/// {
///   panelCount(): number,
///   panelMetrics(i): { scrollTop, scrollHeight, clientHeight } | null,
///   setPanelScroll(i, offset, smooth),
///   focusedPanel(): number | null,
///   focusDeckRoot(),
///   focusFirstFocusable(i): boolean,
///   focusPanel(i): boolean,
///   fragment(): string | null,
///   replaceFragment(id),
/// }
/// ```
struct JsHost {
    callbacks: JsValue,
}

impl std::fmt::Debug for JsHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsHost").finish_non_exhaustive()
    }
}

impl JsHost {
    fn call(&self, name: &str, args: &[JsValue]) -> Option<JsValue> {
        let func = Reflect::get(&self.callbacks, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let array: Array = args.iter().collect();
        match func.apply(&self.callbacks, &array) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(target: "folio.deck", callback = name, error = ?err, "host callback threw");
                None
            }
        }
    }

    fn call_bool(&self, name: &str, args: &[JsValue]) -> bool {
        self.call(name, args).and_then(|v| v.as_bool()).unwrap_or(false)
    }
}

impl PanelSurface for JsHost {
    fn panel_count(&self) -> usize {
        self.call("panelCount", &[])
            .and_then(|v| v.as_f64())
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map_or(0, |n| n as usize)
    }

    fn panel_metrics(&self, index: usize) -> Option<ScrollMetrics> {
        let value = self.call("panelMetrics", &[JsValue::from(index as u32)])?;
        if value.is_null() || value.is_undefined() {
            return None;
        }
        Some(ScrollMetrics::new(
            get_f64(&value, "scrollTop")?,
            get_f64(&value, "scrollHeight")?,
            get_f64(&value, "clientHeight")?,
        ))
    }

    fn set_panel_scroll(&mut self, index: usize, offset: f64, behavior: ScrollBehavior) {
        let smooth = behavior == ScrollBehavior::Smooth;
        self.call(
            "setPanelScroll",
            &[
                JsValue::from(index as u32),
                JsValue::from_f64(offset),
                JsValue::from_bool(smooth),
            ],
        );
    }
}

impl FocusSurface for JsHost {
    fn focused_panel(&self) -> Option<usize> {
        let n = self.call("focusedPanel", &[])?.as_f64()?;
        (n.is_finite() && n >= 0.0).then_some(n as usize)
    }

    fn focus_deck_root(&mut self) {
        self.call("focusDeckRoot", &[]);
    }

    fn focus_first_focusable(&mut self, index: usize) -> bool {
        self.call_bool("focusFirstFocusable", &[JsValue::from(index as u32)])
    }

    fn focus_panel(&mut self, index: usize) -> bool {
        self.call_bool("focusPanel", &[JsValue::from(index as u32)])
    }
}

impl LocationSurface for JsHost {
    fn fragment(&self) -> Option<String> {
        self.call("fragment", &[])?.as_string()
    }

    fn replace_fragment(&mut self, id: &str) {
        self.call("replaceFragment", &[JsValue::from_str(id)]);
    }
}

/// `window.matchMedia`, when present.
struct WindowMedia;

impl MediaFeatures for WindowMedia {
    fn matches(&self, query: &str) -> Option<bool> {
        let global = js_sys::global();
        let match_media = Reflect::get(&global, &"matchMedia".into())
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let list = match_media.call1(&global, &JsValue::from_str(query)).ok()?;
        Reflect::get(&list, &"matches".into()).ok()?.as_bool()
    }
}

fn decision_to_js(decision: GestureDecision) -> JsValue {
    let obj = Object::new();
    match decision {
        GestureDecision::PassThrough => set_js(&obj, "action", "pass_through".into()),
        GestureDecision::Suppress => set_js(&obj, "action", "suppress".into()),
        GestureDecision::Navigate { target, .. } => {
            set_js(&obj, "action", "navigate".into());
            set_js(&obj, "target", JsValue::from(target as u32));
        }
    }
    set_js(
        &obj,
        "preventDefault",
        JsValue::from_bool(decision != GestureDecision::PassThrough),
    );
    obj.into()
}

fn outcome_to_js(outcome: NavOutcome) -> JsValue {
    let obj = Object::new();
    let status = match outcome {
        NavOutcome::Started { .. } => "started",
        NavOutcome::Completed { .. } => "completed",
        NavOutcome::Repositioned { .. } => "repositioned",
        NavOutcome::Unchanged { .. } => "unchanged",
        NavOutcome::Dropped(_) => "dropped",
    };
    set_js(&obj, "status", status.into());
    if let Some(target) = outcome.target() {
        set_js(&obj, "target", JsValue::from(target as u32));
    }
    if let Some(reason) = outcome.drop_reason() {
        set_js(&obj, "reason", reason.as_str().into());
    }
    obj.into()
}

/// Panel deck driven from JavaScript.
///
/// Host-driven: the page pushes input, calls `advanceTime` each animation
/// frame, and applies `snapshotJson()` styles to its panels.
#[wasm_bindgen]
pub struct FolioDeck {
    inner: DeckRunner<JsHost>,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl FolioDeck {
    /// Create a deck over `host` callbacks.
    ///
    /// `sections_json` is a JSON array of `{id, display_name}` (default: the
    /// portfolio sections); `config_json` a JSON `DeckConfig` (default
    /// config when omitted).
    #[wasm_bindgen(constructor)]
    pub fn new(
        host: JsValue,
        sections_json: Option<String>,
        config_json: Option<String>,
    ) -> Result<FolioDeck, JsValue> {
        install_panic_hook();
        let registry = match sections_json {
            Some(json) => serde_json::from_str::<SectionRegistry>(&json)
                .map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => SectionRegistry::portfolio(),
        };
        let config = match config_json {
            Some(json) => {
                DeckConfig::from_json_str(&json).map_err(|err| JsValue::from_str(&err.to_string()))?
            }
            None => DeckConfig::default(),
        };
        let caps = Capabilities::sample(&WindowMedia);
        Ok(Self {
            inner: DeckRunner::new(JsHost { callbacks: host }, registry, config, caps),
        })
    }

    /// Mount: reveal the first panel and reset the fragment.
    pub fn init(&mut self) -> JsValue {
        self.inner.init().map_or(JsValue::NULL, outcome_to_js)
    }

    /// Unmount and release everything.
    pub fn destroy(&mut self) {
        self.inner.destroy();
    }

    /// Advance the clock by `dt_ms`. Returns whether another frame is needed.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) -> bool {
        self.inner.advance_time_ms(dt_ms)
    }

    /// Route a JSON-encoded input. Returns `{action, target?, preventDefault}`
    /// or `null` when the input is malformed.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> JsValue {
        self.inner
            .push_encoded_input(json)
            .map_or(JsValue::NULL, decision_to_js)
    }

    #[wasm_bindgen(js_name = navigateToSection)]
    pub fn navigate_to_section(&mut self, id: &str) -> JsValue {
        outcome_to_js(self.inner.navigate(id))
    }

    #[wasm_bindgen(js_name = scrollActiveToTop)]
    pub fn scroll_active_to_top(&mut self, smooth: bool) -> bool {
        self.inner.scroll_to_top(smooth)
    }

    /// Re-sample media features after a `change` event.
    #[wasm_bindgen(js_name = refreshCapabilities)]
    pub fn refresh_capabilities(&mut self) {
        self.inner.set_capabilities(Capabilities::sample(&WindowMedia));
    }

    #[wasm_bindgen(js_name = setCapabilities)]
    pub fn set_capabilities(&mut self, reduced_motion: bool, coarse_pointer: bool) {
        self.inner.set_capabilities(
            Capabilities::default()
                .with_reduced_motion(reduced_motion)
                .with_coarse_pointer(coarse_pointer),
        );
    }

    #[wasm_bindgen(js_name = setModalOpen)]
    pub fn set_modal_open(&mut self, open: bool) {
        self.inner.set_modal_open(open);
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> u32 {
        self.inner.deck().active_index() as u32
    }

    /// Deck state and per-panel styles as JSON.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.inner.snapshot().to_json().unwrap_or_else(|err| {
            console_error(&format!("snapshot serialization failed: {err}"));
            String::from("{}")
        })
    }

    /// Events published since the last call, as a JSON array.
    ///
    /// Apply `snapshotJson()` to the DOM before dispatching these.
    /// `active_panel_changed` listeners expect the new panel to already be
    /// visible and out of `inert`/`aria-hidden`; the deck has committed that
    /// state, but the page only shows it once the snapshot is applied.
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> String {
        let events = self.inner.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| String::from("[]"))
    }
}
