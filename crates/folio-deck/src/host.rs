#![forbid(unsafe_code)]

//! Host seam: what the deck asks of its environment.
//!
//! The deck owns no DOM. Three small traits describe everything it needs:
//!
//! - [`PanelSurface`]: each panel's scroll container.
//! - [`FocusSurface`]: document focus.
//! - [`LocationSurface`]: the URL fragment.
//!
//! [`DeckHost`] is implemented for any type providing all three. The web
//! adapter implements them over `web-sys`-free JS callbacks; [`MemoryHost`]
//! implements them in memory for tests and native embedding.

use folio_core::ScrollMetrics;

use crate::navigation::ScrollBehavior;

/// Panel scroll containers.
pub trait PanelSurface {
    /// Number of panel slots rendered by the host, mounted or not.
    fn panel_count(&self) -> usize;

    /// Metrics of panel `index`, or `None` when its element is not mounted.
    fn panel_metrics(&self, index: usize) -> Option<ScrollMetrics>;

    /// Set panel `index`'s scroll offset. Ignored for unmounted panels.
    fn set_panel_scroll(&mut self, index: usize, offset: f64, behavior: ScrollBehavior);
}

/// Document focus.
pub trait FocusSurface {
    /// Panel containing the focused element, if any.
    fn focused_panel(&self) -> Option<usize>;

    /// Blur the focused element and focus the deck root container.
    fn focus_deck_root(&mut self);

    /// Focus the first tab-reachable element inside panel `index`.
    /// Returns `false` when the panel has none.
    fn focus_first_focusable(&mut self, index: usize) -> bool;

    /// Make panel `index`'s container programmatically focusable and focus it.
    /// Returns `false` when the container is not mounted.
    fn focus_panel(&mut self, index: usize) -> bool;
}

/// The URL fragment (`#id`).
pub trait LocationSurface {
    /// Current fragment without the leading `#`.
    fn fragment(&self) -> Option<String>;

    /// Replace the fragment without creating a history entry.
    fn replace_fragment(&mut self, id: &str);
}

/// Everything the deck needs from its environment.
pub trait DeckHost: PanelSurface + FocusSurface + LocationSurface {}

impl<T: PanelSurface + FocusSurface + LocationSurface> DeckHost for T {}

/// Where focus sits inside a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryFocus {
    /// Focus is outside the deck (e.g. the nav bar).
    #[default]
    Outside,
    /// The deck root container.
    DeckRoot,
    /// The first focusable element of a panel.
    Element(usize),
    /// A panel container itself.
    Panel(usize),
}

/// In-memory host.
///
/// Scroll offsets apply immediately regardless of [`ScrollBehavior`];
/// every fragment write is counted so tests can assert on history churn.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    panels: Vec<Option<ScrollMetrics>>,
    focusable: Vec<bool>,
    focus: MemoryFocus,
    fragment: Option<String>,
    fragment_writes: usize,
    scroll_log: Vec<(usize, f64, ScrollBehavior)>,
}

impl MemoryHost {
    /// `count` mounted panels, each `viewport` tall with `content` of content,
    /// each holding one focusable element.
    #[must_use]
    pub fn uniform(count: usize, content: f64, viewport: f64) -> Self {
        Self {
            panels: vec![Some(ScrollMetrics::new(0.0, content, viewport)); count],
            focusable: vec![true; count],
            ..Self::default()
        }
    }

    /// Builder: replace panel `index`'s metrics.
    #[must_use]
    pub fn with_panel(mut self, index: usize, metrics: Option<ScrollMetrics>) -> Self {
        if index >= self.panels.len() {
            self.panels.resize(index + 1, None);
            self.focusable.resize(index + 1, false);
        }
        self.panels[index] = metrics;
        self
    }

    /// Builder: whether panel `index` holds a focusable element.
    #[must_use]
    pub fn with_focusable(mut self, index: usize, focusable: bool) -> Self {
        if let Some(slot) = self.focusable.get_mut(index) {
            *slot = focusable;
        }
        self
    }

    /// Builder: initial fragment, as if the page was loaded with `#id`.
    #[must_use]
    pub fn with_fragment(mut self, id: &str) -> Self {
        self.fragment = Some(id.to_owned());
        self
    }

    /// Unmount or remount a panel element.
    pub fn set_mounted(&mut self, index: usize, metrics: Option<ScrollMetrics>) {
        if let Some(slot) = self.panels.get_mut(index) {
            *slot = metrics;
        }
    }

    /// Simulate the user scrolling panel `index`.
    pub fn scroll_by_user(&mut self, index: usize, offset: f64) {
        if let Some(Some(m)) = self.panels.get_mut(index) {
            *m = m.scrolled_to(offset);
        }
    }

    /// Simulate the user focusing something.
    pub fn set_focus(&mut self, focus: MemoryFocus) {
        self.focus = focus;
    }

    #[must_use]
    pub fn focus(&self) -> MemoryFocus {
        self.focus
    }

    #[must_use]
    pub fn fragment_writes(&self) -> usize {
        self.fragment_writes
    }

    /// Every `set_panel_scroll` call, in order.
    #[must_use]
    pub fn scroll_log(&self) -> &[(usize, f64, ScrollBehavior)] {
        &self.scroll_log
    }
}

impl PanelSurface for MemoryHost {
    fn panel_count(&self) -> usize {
        self.panels.len()
    }

    fn panel_metrics(&self, index: usize) -> Option<ScrollMetrics> {
        self.panels.get(index).copied().flatten()
    }

    fn set_panel_scroll(&mut self, index: usize, offset: f64, behavior: ScrollBehavior) {
        if let Some(Some(m)) = self.panels.get_mut(index) {
            *m = m.scrolled_to(offset);
            self.scroll_log.push((index, offset, behavior));
        }
    }
}

impl FocusSurface for MemoryHost {
    fn focused_panel(&self) -> Option<usize> {
        match self.focus {
            MemoryFocus::Element(i) | MemoryFocus::Panel(i) => Some(i),
            MemoryFocus::Outside | MemoryFocus::DeckRoot => None,
        }
    }

    fn focus_deck_root(&mut self) {
        self.focus = MemoryFocus::DeckRoot;
    }

    fn focus_first_focusable(&mut self, index: usize) -> bool {
        let mounted = self.panel_metrics(index).is_some();
        if mounted && self.focusable.get(index).copied().unwrap_or(false) {
            self.focus = MemoryFocus::Element(index);
            true
        } else {
            false
        }
    }

    fn focus_panel(&mut self, index: usize) -> bool {
        if self.panel_metrics(index).is_some() {
            self.focus = MemoryFocus::Panel(index);
            true
        } else {
            false
        }
    }
}

impl LocationSurface for MemoryHost {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, id: &str) {
        self.fragment = Some(id.to_owned());
        self.fragment_writes += 1;
    }
}
