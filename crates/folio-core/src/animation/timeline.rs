#![forbid(unsafe_code)]

//! Timeline: labeled animations scheduled at offsets.
//!
//! A [`Timeline`] runs several [`Animation`]s against one clock, each starting
//! at its own offset. Overlap is expressed by giving a later event an offset
//! smaller than the earlier event's duration.
//!
//! # Invariants
//!
//! 1. Events are kept sorted by offset (stable for equal offsets).
//! 2. `tick()` only advances events while `Playing`.
//! 3. The timeline is `Finished` exactly when every event has started and
//!    completed.
//! 4. `finish()` jumps every event to its end value, from any state.
//!
//! # Failure Modes
//!
//! - Empty timeline: `play()` moves straight to `Finished`.
//! - Unknown label: `event_value` returns `None`.

use std::time::Duration;

use super::Animation;

/// Playback state of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not yet started.
    Idle,
    /// Actively playing.
    Playing,
    /// Every event has completed.
    Finished,
}

struct TimelineEvent {
    offset: Duration,
    label: &'static str,
    animation: Box<dyn Animation>,
}

impl std::fmt::Debug for TimelineEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineEvent")
            .field("offset", &self.offset)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Labeled animations sharing one clock.
pub struct Timeline {
    events: Vec<TimelineEvent>,
    state: PlaybackState,
    current_time: Duration,
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("events", &self.events)
            .field("state", &self.state)
            .field("current_time", &self.current_time)
            .finish()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            state: PlaybackState::Idle,
            current_time: Duration::ZERO,
        }
    }

    /// Add a labeled animation starting at `offset` (builder pattern).
    #[must_use]
    pub fn add(
        mut self,
        label: &'static str,
        offset: Duration,
        animation: impl Animation + 'static,
    ) -> Self {
        let pos = self.events.partition_point(|e| e.offset <= offset);
        self.events.insert(
            pos,
            TimelineEvent {
                offset,
                label,
                animation: Box::new(animation),
            },
        );
        self
    }

    /// Start playback from the beginning.
    pub fn play(&mut self) {
        self.current_time = Duration::ZERO;
        for event in &mut self.events {
            event.animation.reset();
        }
        self.state = if self.events.is_empty() {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing
        };
    }

    /// Jump every event to its end state.
    pub fn finish(&mut self) {
        // Large enough to cover any offset plus any duration we schedule.
        const FAR: Duration = Duration::from_secs(3600);
        for event in &mut self.events {
            event.animation.reset();
            event.animation.tick(FAR);
        }
        self.state = PlaybackState::Finished;
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    #[inline]
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Value of the event with the given label.
    #[must_use]
    pub fn event_value(&self, label: &str) -> Option<f32> {
        self.events
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.animation.value())
    }

    /// Whether the labeled event has passed its start offset.
    #[must_use]
    pub fn event_started(&self, label: &str) -> bool {
        self.events
            .iter()
            .find(|e| e.label == label)
            .is_some_and(|e| self.state == PlaybackState::Finished || self.current_time > e.offset)
    }
}

impl Animation for Timeline {
    fn tick(&mut self, dt: Duration) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let new_time = self.current_time.saturating_add(dt);
        for event in &mut self.events {
            if new_time <= event.offset || event.animation.is_complete() {
                continue;
            }
            if self.current_time >= event.offset {
                event.animation.tick(dt);
            } else {
                // Starts inside this tick: forward only the part after the offset.
                event.animation.tick(new_time - event.offset);
            }
        }
        self.current_time = new_time;

        let all_done = self
            .events
            .iter()
            .all(|e| self.current_time > e.offset && e.animation.is_complete());
        if all_done {
            self.state = PlaybackState::Finished;
        }
    }

    fn is_complete(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Fraction of events that have completed.
    fn value(&self) -> f32 {
        if self.events.is_empty() {
            return 1.0;
        }
        let done = self
            .events
            .iter()
            .filter(|e| e.animation.is_complete())
            .count();
        done as f32 / self.events.len() as f32
    }

    fn reset(&mut self) {
        self.current_time = Duration::ZERO;
        self.state = PlaybackState::Idle;
        for event in &mut self.events {
            event.animation.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Tween;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);

    fn fade(d: Duration) -> Tween {
        Tween::new(0.0, 1.0, d)
    }

    #[test]
    fn empty_timeline_finishes_on_play() {
        let mut tl = Timeline::new();
        tl.play();
        assert!(tl.is_complete());
        assert_eq!(tl.value(), 1.0);
    }

    #[test]
    fn idle_timeline_ignores_ticks() {
        let mut tl = Timeline::new().add("a", Duration::ZERO, fade(MS_100));
        tl.tick(MS_200);
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert_eq!(tl.event_value("a"), Some(0.0));
    }

    #[test]
    fn overlapping_events() {
        let mut tl = Timeline::new()
            .add("in", Duration::ZERO, fade(MS_200))
            .add("out", Duration::from_millis(50), fade(MS_100));
        tl.play();

        tl.tick(Duration::from_millis(50));
        assert!(!tl.event_started("out"));
        assert!((tl.event_value("in").unwrap() - 0.25).abs() < 1e-3);

        // The "out" event starts mid-tick and only sees the remainder.
        tl.tick(Duration::from_millis(100));
        assert!(tl.event_started("out"));
        assert!((tl.event_value("out").unwrap() - 1.0).abs() < 1e-3);
        assert!((tl.event_value("in").unwrap() - 0.75).abs() < 1e-3);
        assert!(!tl.is_complete());

        tl.tick(Duration::from_millis(50));
        assert!(tl.is_complete());
    }

    #[test]
    fn events_sorted_by_offset() {
        let tl = Timeline::new()
            .add("late", MS_200, fade(MS_100))
            .add("early", Duration::ZERO, fade(MS_100));
        assert_eq!(tl.events[0].label, "early");
        assert_eq!(tl.events[1].label, "late");
    }

    #[test]
    fn finish_jumps_to_end() {
        let mut tl = Timeline::new()
            .add("a", Duration::ZERO, fade(MS_100))
            .add("b", MS_200, fade(MS_100));
        tl.play();
        tl.tick(Duration::from_millis(10));
        tl.finish();
        assert!(tl.is_complete());
        assert_eq!(tl.event_value("a"), Some(1.0));
        assert_eq!(tl.event_value("b"), Some(1.0));
        assert!(tl.event_started("b"));
    }

    #[test]
    fn unknown_label() {
        let tl = Timeline::new().add("a", Duration::ZERO, fade(MS_100));
        assert_eq!(tl.event_value("missing"), None);
        assert!(!tl.event_started("missing"));
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut tl = Timeline::new().add("a", Duration::ZERO, fade(MS_100));
        tl.play();
        tl.tick(MS_200);
        assert!(tl.is_complete());
        tl.reset();
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert_eq!(tl.event_value("a"), Some(0.0));
    }
}
