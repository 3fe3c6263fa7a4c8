//! In-process surface: a horizontal scroll container plus element state
//!
//! The stage plays the part of the page. It lays cards out in a row with
//! enough padding on both ends that any card can sit in the center, owns
//! the scroll offset (including smooth-scroll animation), and remembers
//! every text/style/class mutation so a renderer can draw it.
//!
//! All geometry is in device-independent pixels. Hosts convert from their
//! own units (terminal columns) before calling in.

use super::surface::{
    Class, Element, ElementSink, LayoutProbe, ScrollAlign, ScrollIntoView, Span, Style,
};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Card size and spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageLayout {
    pub card_width: f64,
    pub gap: f64,
}

impl StageLayout {
    /// Layout for a grid of terminal cells
    pub fn from_columns(card_width: u16, gap: u16, px_per_column: f64) -> Self {
        Self {
            card_width: f64::from(card_width) * px_per_column,
            gap: f64::from(gap) * px_per_column,
        }
    }
}

/// Per-card render state
#[derive(Debug, Clone, Default)]
pub struct CardView {
    pub active: bool,
    /// When the card first entered view
    pub in_view_since: Option<Instant>,
    pub animation_delay: Duration,
}

#[derive(Debug, Clone)]
struct HintView {
    opacity: f32,
    transition: Duration,
    fade_from: f32,
    fade_started: Option<Instant>,
    hidden: bool,
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    /// Ease-out cubic position at `now`, plus whether it has finished
    fn sample(&self, now: Instant) -> (f64, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        (self.from + (self.to - self.from) * eased, false)
    }
}

/// Serializable view of the stage, for replay output and tests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSnapshot {
    pub counter: String,
    pub progress_percent: f64,
    pub prev_opacity: f32,
    pub next_opacity: f32,
    pub active: Vec<usize>,
    pub in_view: Vec<usize>,
    pub scroll_offset: f64,
    pub hint_hidden: bool,
}

#[derive(Debug, Clone)]
pub struct Stage {
    layout: StageLayout,
    viewport: f64,
    offset: f64,
    animation: Option<ScrollAnimation>,
    scrolled: bool,
    now: Instant,

    transition_medium: Duration,

    cards: Vec<CardView>,
    /// Owning card of each placeholder, in source order
    placeholder_owners: Vec<usize>,
    glitching: Vec<bool>,

    counter: String,
    progress: f64,
    prev_opacity: f32,
    next_opacity: f32,
    hint: HintView,
}

/// Default transition lengths, overridden through the root variables
pub const DEFAULT_TRANSITION_FAST: Duration = Duration::from_millis(200);
pub const DEFAULT_TRANSITION_MEDIUM: Duration = Duration::from_millis(400);

impl Stage {
    pub fn new(
        cards: usize,
        placeholder_owners: Vec<usize>,
        layout: StageLayout,
        viewport: f64,
        now: Instant,
    ) -> Self {
        let glitching = vec![false; placeholder_owners.len()];
        Self {
            layout,
            viewport: viewport.max(0.0),
            offset: 0.0,
            animation: None,
            scrolled: false,
            now,
            transition_medium: DEFAULT_TRANSITION_MEDIUM,
            cards: vec![CardView::default(); cards],
            placeholder_owners,
            glitching,
            counter: String::new(),
            progress: 0.0,
            prev_opacity: 1.0,
            next_opacity: 1.0,
            hint: HintView {
                opacity: 1.0,
                transition: Duration::ZERO,
                fade_from: 1.0,
                fade_started: None,
                hidden: false,
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────────────

    /// Leading/trailing space so the first and last cards can be centered
    fn padding(&self) -> f64 {
        ((self.viewport - self.layout.card_width) / 2.0).max(0.0)
    }

    fn card_left(&self, index: usize) -> f64 {
        self.padding() + index as f64 * (self.layout.card_width + self.layout.gap)
    }

    fn content_width(&self) -> f64 {
        let n = self.cards.len() as f64;
        let gaps = (n - 1.0).max(0.0) * self.layout.gap;
        2.0 * self.padding() + n * self.layout.card_width + gaps
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_width() - self.viewport).max(0.0)
    }

    /// Offset that puts a card at the requested alignment
    fn offset_for(&self, index: usize, align: ScrollAlign) -> f64 {
        let left = self.card_left(index);
        let width = self.layout.card_width;
        let target = match align {
            ScrollAlign::Center => left + width / 2.0 - self.viewport / 2.0,
            ScrollAlign::Nearest => {
                if left < self.offset {
                    left
                } else if left + width > self.offset + self.viewport {
                    left + width - self.viewport
                } else {
                    self.offset
                }
            }
        };
        target.clamp(0.0, self.max_offset())
    }

    fn set_offset(&mut self, offset: f64) {
        let offset = offset.clamp(0.0, self.max_offset());
        if (offset - self.offset).abs() > f64::EPSILON {
            self.offset = offset;
            self.scrolled = true;
        }
    }

    #[cfg(test)]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[cfg(test)]
    pub fn viewport(&self) -> f64 {
        self.viewport
    }

    /// Change the viewport width, keeping the offset in range
    pub fn resize(&mut self, viewport: f64) {
        self.viewport = viewport.max(0.0);
        self.animation = None;
        let offset = self.offset;
        self.set_offset(offset);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────

    /// User-driven scroll by `delta` pixels; interrupts any animation
    pub fn scroll_by(&mut self, delta: f64) {
        self.animation = None;
        let offset = self.offset + delta;
        self.set_offset(offset);
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance the clock and any running scroll animation
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        if let Some(animation) = self.animation {
            let (offset, done) = animation.sample(now);
            self.set_offset(offset);
            if done {
                self.animation = None;
            }
        }
    }

    /// Whether the offset moved since the last call. Hosts turn this into a
    /// scroll event.
    pub fn take_scrolled(&mut self) -> bool {
        std::mem::take(&mut self.scrolled)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Render state
    // ─────────────────────────────────────────────────────────────────────

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn card_rect(&self, index: usize) -> Span {
        Span::new(self.card_left(index) - self.offset, self.layout.card_width)
    }

    pub fn counter(&self) -> &str {
        &self.counter
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress
    }

    pub fn prev_opacity(&self) -> f32 {
        self.prev_opacity
    }

    pub fn next_opacity(&self) -> f32 {
        self.next_opacity
    }

    pub fn placeholders_of(&self, card: usize) -> impl Iterator<Item = usize> + '_ {
        self.placeholder_owners
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == card)
            .map(|(placeholder, _)| placeholder)
    }

    pub fn is_glitching(&self, placeholder: usize) -> bool {
        self.glitching.get(placeholder).copied().unwrap_or(false)
    }

    pub fn hint_hidden(&self) -> bool {
        self.hint.hidden
    }

    /// Hint opacity at the current clock, following its transition
    pub fn hint_opacity(&self) -> f32 {
        if self.hint.hidden {
            return 0.0;
        }
        match self.hint.fade_started {
            Some(started) if !self.hint.transition.is_zero() => {
                let elapsed = self.now.saturating_duration_since(started);
                let t = (elapsed.as_secs_f32() / self.hint.transition.as_secs_f32()).min(1.0);
                self.hint.fade_from + (self.hint.opacity - self.hint.fade_from) * t
            }
            _ => self.hint.opacity,
        }
    }

    /// Entrance progress for a card (0.0 hidden, 1.0 fully shown).
    ///
    /// Starts once the card is in view and its animation delay has passed,
    /// and runs for the medium transition.
    pub fn entrance(&self, index: usize) -> f64 {
        let Some(card) = self.cards.get(index) else {
            return 0.0;
        };
        let Some(since) = card.in_view_since else {
            return 0.0;
        };
        if self.transition_medium.is_zero() {
            return 1.0;
        }
        let start = since + card.animation_delay;
        let elapsed = self.now.saturating_duration_since(start);
        (elapsed.as_secs_f64() / self.transition_medium.as_secs_f64()).min(1.0)
    }

    pub fn snapshot(&self) -> StageSnapshot {
        let flagged = |pick: fn(&CardView) -> bool| -> Vec<usize> {
            self.cards
                .iter()
                .enumerate()
                .filter(|(_, card)| pick(card))
                .map(|(i, _)| i)
                .collect()
        };
        StageSnapshot {
            counter: self.counter.clone(),
            progress_percent: self.progress,
            prev_opacity: self.prev_opacity,
            next_opacity: self.next_opacity,
            active: flagged(|card| card.active),
            in_view: flagged(|card| card.in_view_since.is_some()),
            scroll_offset: self.offset,
            hint_hidden: self.hint.hidden,
        }
    }
}

impl ElementSink for Stage {
    fn set_text(&mut self, element: Element, text: String) {
        match element {
            Element::Counter => self.counter = text,
            other => tracing::trace!(element = %other, "text ignored"),
        }
    }

    fn set_style(&mut self, element: Element, style: Style) {
        match (element, style) {
            (Element::ProgressFill, Style::Width(percent)) => {
                self.progress = percent.clamp(0.0, 100.0)
            }
            (Element::PrevButton, Style::Opacity(opacity)) => self.prev_opacity = opacity,
            (Element::NextButton, Style::Opacity(opacity)) => self.next_opacity = opacity,
            (Element::SwipeHint, Style::Transition(duration)) => self.hint.transition = duration,
            (Element::SwipeHint, Style::Opacity(opacity)) => {
                self.hint.fade_from = self.hint_opacity();
                self.hint.fade_started = Some(self.now);
                self.hint.opacity = opacity;
            }
            (Element::SwipeHint, Style::Hidden) => self.hint.hidden = true,
            (Element::Card(index), Style::AnimationDelay(delay)) => {
                if let Some(card) = self.cards.get_mut(index) {
                    card.animation_delay = delay;
                }
            }
            (Element::Root, Style::TransitionMedium(duration)) => {
                self.transition_medium = duration
            }
            (element, style) => tracing::trace!(%element, ?style, "style ignored"),
        }
    }

    fn toggle_class(&mut self, element: Element, class: Class, on: bool) {
        match (element, class) {
            (Element::Card(index), Class::Active) => {
                if let Some(card) = self.cards.get_mut(index) {
                    card.active = on;
                }
            }
            (Element::Card(index), Class::InView) => {
                let now = self.now;
                if let Some(card) = self.cards.get_mut(index) {
                    card.in_view_since = match (on, card.in_view_since) {
                        (false, _) => None,
                        (true, Some(since)) => Some(since),
                        (true, None) => Some(now),
                    };
                }
            }
            (Element::Placeholder(index), Class::GlitchHover) => {
                if let Some(flag) = self.glitching.get_mut(index) {
                    *flag = on;
                }
            }
            (element, class) => {
                tracing::trace!(%element, class = class.as_str(), on, "class ignored")
            }
        }
    }

    fn scroll_into_view(&mut self, card: usize, options: ScrollIntoView) {
        if card >= self.cards.len() {
            return;
        }
        let target = self.offset_for(card, options.inline);
        if !self.transition_medium.is_zero() {
            self.animation = Some(ScrollAnimation {
                from: self.offset,
                to: target,
                started: self.now,
                duration: self.transition_medium,
            });
        } else {
            self.animation = None;
            self.set_offset(target);
        }
    }
}

impl LayoutProbe for Stage {
    fn contains(&self, element: Element) -> bool {
        match element {
            Element::Card(index) => index < self.cards.len(),
            Element::Placeholder(index) => index < self.placeholder_owners.len(),
            _ => true,
        }
    }

    fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn placeholder_count(&self) -> usize {
        self.placeholder_owners.len()
    }

    fn container_rect(&self) -> Span {
        Span::new(0.0, self.viewport)
    }

    fn card_rects(&self) -> Vec<Span> {
        (0..self.cards.len()).map(|i| self.card_rect(i)).collect()
    }
}
