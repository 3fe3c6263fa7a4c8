//! Input adapters
//!
//! Hosts turn whatever they receive (terminal keys, mouse, a replay file)
//! into [`InputEvent`]s and hand them to the carousel. The carousel offers
//! each event to every registered [`InputAdapter`]; an adapter either
//! translates it into a navigator call or ignores it.
//!
//! ```text
//! InputEvent ──▶ Carousel::dispatch ──▶ [buttons, keyboard, swipe,
//!                                         progress bar, scroll, hover]
//!                                                │
//!                                                ▼
//!                                   Navigator / SettleTimer / classes
//! ```

use super::navigator::Navigator;
use super::settle::SettleTimer;
use super::state::CarouselState;
use super::surface::{Class, Element, Surface};
use super::CarouselSettings;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;

/// Keys the carousel cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    /// Anything else. Still counts as an interaction.
    Other,
}

/// Everything a host can report to the carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PrevButton,
    NextButton,
    KeyDown {
        key: Key,
    },
    /// The container's scroll position changed, for any reason
    Scroll,
    /// Free scroll by `dx` pixels. Hosts apply it to their container, which
    /// then reports `Scroll` like any other movement.
    ScrollBy {
        dx: f64,
    },
    /// Gesture start, horizontal position in device-independent pixels
    TouchStart {
        x: f64,
    },
    TouchEnd {
        x: f64,
    },
    /// Click on the progress bar: offset from its left edge and its width
    ProgressClick {
        offset: f64,
        width: f64,
    },
    PointerEnter {
        placeholder: usize,
    },
    PointerLeave {
        placeholder: usize,
    },
}

/// An event stamped with milliseconds since the source started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: InputEvent,
}

/// Anything that can feed events to a host loop
pub trait EventSource {
    fn next_event(&mut self) -> Option<TimedEvent>;
}

/// Fixed, pre-recorded sequence of events
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    events: VecDeque<TimedEvent>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = TimedEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self) -> Option<TimedEvent> {
        self.events.pop_front()
    }
}

/// Result of offering an event to an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// What an adapter may touch while handling one event
pub struct AdapterCx<'a> {
    pub(super) state: &'a mut CarouselState,
    pub(super) surface: &'a mut dyn Surface,
    pub(super) settle: &'a mut SettleTimer,
    pub(super) settings: &'a CarouselSettings,
    pub(super) now: Instant,
}

impl AdapterCx<'_> {
    pub fn total(&self) -> usize {
        self.state.total()
    }

    pub fn settings(&self) -> &CarouselSettings {
        self.settings
    }

    pub fn go_to_card(&mut self, target: i64) -> bool {
        Navigator::new(&mut *self.state, &mut *self.surface).go_to_card(target)
    }

    pub fn previous(&mut self) -> bool {
        Navigator::new(&mut *self.state, &mut *self.surface).previous()
    }

    pub fn next(&mut self) -> bool {
        Navigator::new(&mut *self.state, &mut *self.surface).next()
    }

    pub fn first(&mut self) -> bool {
        Navigator::new(&mut *self.state, &mut *self.surface).first()
    }

    pub fn last(&mut self) -> bool {
        Navigator::new(&mut *self.state, &mut *self.surface).last()
    }

    pub fn arm_settle(&mut self) {
        self.settle.arm(self.now);
    }

    pub fn toggle_class(&mut self, element: Element, class: Class, on: bool) {
        self.surface.toggle_class(element, class, on);
    }
}

/// A translator from one input channel to carousel operations
pub trait InputAdapter {
    fn name(&self) -> &'static str;

    fn handle(&mut self, event: &InputEvent, cx: &mut AdapterCx<'_>) -> Handled;
}

/// Previous / next buttons
#[derive(Debug, Default)]
pub struct ButtonAdapter;

impl InputAdapter for ButtonAdapter {
    fn name(&self) -> &'static str {
        "buttons"
    }

    fn handle(&mut self, event: &InputEvent, cx: &mut AdapterCx<'_>) -> Handled {
        match event {
            InputEvent::PrevButton => {
                cx.previous();
                Handled::Yes
            }
            InputEvent::NextButton => {
                cx.next();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }
}

/// Arrow keys, Home and End. Not scoped to any focus region.
#[derive(Debug, Default)]
pub struct KeyboardAdapter;

impl InputAdapter for KeyboardAdapter {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn handle(&mut self, event: &InputEvent, cx: &mut AdapterCx<'_>) -> Handled {
        let InputEvent::KeyDown { key } = event else {
            return Handled::No;
        };

        match key {
            Key::ArrowLeft => {
                cx.previous();
            }
            Key::ArrowRight => {
                cx.next();
            }
            Key::Home => {
                cx.first();
            }
            Key::End => {
                cx.last();
            }
            Key::Other => return Handled::No,
        }
        Handled::Yes
    }
}

/// Horizontal swipe: one step per gesture past the threshold
#[derive(Debug, Default)]
pub struct SwipeAdapter {
    start_x: Option<f64>,
}

impl SwipeAdapter {
    /// Which way a finished gesture should move, if at all
    pub fn direction(start_x: f64, end_x: f64, threshold: f64) -> Option<SwipeDirection> {
        let diff = start_x - end_x;
        if diff.abs() <= threshold {
            return None;
        }
        Some(if diff > 0.0 {
            SwipeDirection::Next
        } else {
            SwipeDirection::Previous
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Previous,
    Next,
}

impl InputAdapter for SwipeAdapter {
    fn name(&self) -> &'static str {
        "swipe"
    }

    fn handle(&mut self, event: &InputEvent, cx: &mut AdapterCx<'_>) -> Handled {
        match event {
            InputEvent::TouchStart { x } => {
                self.start_x = Some(*x);
                Handled::Yes
            }
            InputEvent::TouchEnd { x } => {
                let Some(start_x) = self.start_x.take() else {
                    return Handled::No;
                };
                match Self::direction(start_x, *x, cx.settings().swipe_threshold) {
                    Some(SwipeDirection::Next) => {
                        cx.next();
                    }
                    Some(SwipeDirection::Previous) => {
                        cx.previous();
                    }
                    None => tracing::trace!(start_x, end_x = *x, "swipe below threshold"),
                }
                Handled::Yes
            }
            _ => Handled::No,
        }
    }
}

/// Click-to-seek on the progress bar
#[derive(Debug, Default)]
pub struct ProgressBarAdapter;

impl ProgressBarAdapter {
    /// Card index for a click; may be one past the end at the far right edge
    pub fn target(offset: f64, width: f64, total: usize, clamp: bool) -> Option<i64> {
        if !(width > 0.0) {
            return None;
        }
        let target = ((offset / width) * total as f64).floor() as i64;
        Some(if clamp {
            target.min(total as i64 - 1)
        } else {
            target
        })
    }
}

impl InputAdapter for ProgressBarAdapter {
    fn name(&self) -> &'static str {
        "progress-bar"
    }

    fn handle(&mut self, event: &InputEvent, cx: &mut AdapterCx<'_>) -> Handled {
        let InputEvent::ProgressClick { offset, width } = event else {
            return Handled::No;
        };

        let clamp = cx.settings().clamp_progress_click;
        match Self::target(*offset, *width, cx.total(), clamp) {
            Some(target) => {
                cx.go_to_card(target);
                Handled::Yes
            }
            None => Handled::No,
        }
    }
}

/// Free scrolling: push the settle deadline forward
#[derive(Debug, Default)]
pub struct ScrollAdapter;

impl InputAdapter for ScrollAdapter {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn handle(&mut self, event: &InputEvent, cx: &mut AdapterCx<'_>) -> Handled {
        if !matches!(event, InputEvent::Scroll) {
            return Handled::No;
        }
        cx.arm_settle();
        Handled::Yes
    }
}

/// Glitch effect while the pointer is over a placeholder
#[derive(Debug, Default)]
pub struct HoverAdapter;

impl InputAdapter for HoverAdapter {
    fn name(&self) -> &'static str {
        "hover"
    }

    fn handle(&mut self, event: &InputEvent, cx: &mut AdapterCx<'_>) -> Handled {
        let (placeholder, on) = match event {
            InputEvent::PointerEnter { placeholder } => (*placeholder, true),
            InputEvent::PointerLeave { placeholder } => (*placeholder, false),
            _ => return Handled::No,
        };
        cx.toggle_class(Element::Placeholder(placeholder), Class::GlitchHover, on);
        Handled::Yes
    }
}

/// The standard adapter set, in registration order
pub fn default_adapters() -> Vec<Box<dyn InputAdapter>> {
    vec![
        Box::new(ButtonAdapter),
        Box::new(KeyboardAdapter),
        Box::new(ScrollAdapter),
        Box::new(SwipeAdapter::default()),
        Box::new(ProgressBarAdapter),
        Box::new(HoverAdapter),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_threshold_is_exclusive() {
        assert_eq!(SwipeAdapter::direction(100.0, 51.0, 50.0), None); // 49
        assert_eq!(SwipeAdapter::direction(100.0, 50.0, 50.0), None); // 50
        assert_eq!(
            SwipeAdapter::direction(100.0, 49.0, 50.0),
            Some(SwipeDirection::Next)
        );
        assert_eq!(
            SwipeAdapter::direction(100.0, 151.0, 50.0),
            Some(SwipeDirection::Previous)
        );
    }

    #[test]
    fn progress_target_floors() {
        assert_eq!(ProgressBarAdapter::target(90.0, 100.0, 5, false), Some(4));
        assert_eq!(ProgressBarAdapter::target(0.0, 100.0, 5, false), Some(0));
        assert_eq!(ProgressBarAdapter::target(39.9, 100.0, 5, false), Some(1));
    }

    #[test]
    fn progress_right_edge_overflows_unless_clamped() {
        assert_eq!(ProgressBarAdapter::target(100.0, 100.0, 5, false), Some(5));
        assert_eq!(ProgressBarAdapter::target(100.0, 100.0, 5, true), Some(4));
    }

    #[test]
    fn progress_zero_width_is_ignored() {
        assert_eq!(ProgressBarAdapter::target(0.0, 0.0, 5, false), None);
    }

    #[test]
    fn timed_events_parse_from_json() {
        let event: TimedEvent =
            serde_json::from_str(r#"{"type": "key_down", "key": "arrow_right", "at_ms": 20}"#)
                .unwrap();
        assert_eq!(event.at_ms, 20);
        assert_eq!(
            event.event,
            InputEvent::KeyDown {
                key: Key::ArrowRight
            }
        );

        let click: TimedEvent =
            serde_json::from_str(r#"{"type": "progress_click", "offset": 9, "width": 10}"#)
                .unwrap();
        assert_eq!(click.at_ms, 0);
        assert_eq!(
            click.event,
            InputEvent::ProgressClick {
                offset: 9.0,
                width: 10.0
            }
        );
    }

    #[test]
    fn scripted_source_drains_in_order() {
        let mut source = ScriptedSource::new(vec![
            TimedEvent {
                at_ms: 0,
                event: InputEvent::NextButton,
            },
            TimedEvent {
                at_ms: 5,
                event: InputEvent::Scroll,
            },
        ]);
        assert_eq!(source.next_event().unwrap().event, InputEvent::NextButton);
        assert_eq!(source.next_event().unwrap().at_ms, 5);
        assert!(source.next_event().is_none());
    }
}
