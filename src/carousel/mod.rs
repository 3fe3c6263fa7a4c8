//! Carousel core
//!
//! Everything that decides which card is current and what the indicators
//! show. The core is host-agnostic: it talks to a [`Surface`] and receives
//! [`InputEvent`]s with an explicit clock, so the terminal UI, the replay
//! runner and the tests all drive it the same way.
//!
//! ```text
//!  host ──InputEvent──▶ Carousel::dispatch ──▶ adapters ──▶ Navigator
//!   │                        │                               │
//!   │                        ▼                               ▼
//!   └──tick──▶ Carousel::poll_timers ──▶ settle / hint ──▶ UiSynchronizer ──▶ Surface
//! ```

pub mod hint;
pub mod input;
pub mod navigator;
pub mod settle;
pub mod stage;
pub mod state;
pub mod surface;
pub mod sync;
pub mod visibility;

#[cfg(test)]
pub mod testing;

use crate::config::Config;
use hint::SwipeHint;
use input::{default_adapters, AdapterCx, Handled, InputAdapter, InputEvent};
use navigator::Navigator;
use settle::SettleTimer;
use state::CarouselState;
use std::fmt;
use std::time::{Duration, Instant};
use surface::{Element, Style, Surface};
use sync::UiSynchronizer;
use visibility::VisibilityObserver;

/// Tunables the core reads at mount
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSettings {
    /// Quiet period after the last scroll event before settling
    pub settle_delay: Duration,
    /// Minimum horizontal travel for a swipe, exclusive
    pub swipe_threshold: f64,
    /// Visible fraction that marks a card as seen
    pub visibility_threshold: f64,
    /// Clamp far-right progress clicks onto the last card
    pub clamp_progress_click: bool,
    /// Per-card entrance delay step
    pub stagger: Duration,
    pub reduced_motion: bool,
    pub transition_fast: Duration,
    pub transition_medium: Duration,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            settle_delay: settle::DEFAULT_SETTLE_DELAY,
            swipe_threshold: 50.0,
            visibility_threshold: visibility::DEFAULT_THRESHOLD,
            clamp_progress_click: false,
            stagger: Duration::from_millis(100),
            reduced_motion: false,
            transition_fast: stage::DEFAULT_TRANSITION_FAST,
            transition_medium: stage::DEFAULT_TRANSITION_MEDIUM,
        }
    }
}

impl From<&Config> for CarouselSettings {
    fn from(config: &Config) -> Self {
        let carousel = &config.carousel;
        let motion = &config.motion;
        Self {
            settle_delay: Duration::from_millis(carousel.settle_delay_ms),
            swipe_threshold: carousel.swipe_threshold_px,
            visibility_threshold: carousel.visibility_threshold,
            clamp_progress_click: carousel.clamp_progress_click,
            stagger: Duration::from_millis(carousel.stagger_ms),
            reduced_motion: motion.reduced_motion,
            transition_fast: Duration::from_millis(motion.transition_fast_ms),
            transition_medium: Duration::from_millis(motion.transition_medium_ms),
        }
    }
}

/// Why a carousel could not be mounted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    MissingElement(Element),
    NoCards,
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::MissingElement(element) => {
                write!(f, "carousel structure is missing the {}", element)
            }
            MountError::NoCards => write!(f, "carousel has no cards to show"),
        }
    }
}

impl std::error::Error for MountError {}

/// Elements that must exist before anything is wired
const REQUIRED: [Element; 8] = [
    Element::Root,
    Element::Container,
    Element::PrevButton,
    Element::NextButton,
    Element::Counter,
    Element::ProgressBar,
    Element::ProgressFill,
    Element::SwipeHint,
];

/// A mounted carousel: state, timers and the registered input adapters
pub struct Carousel {
    state: CarouselState,
    settings: CarouselSettings,
    settle: SettleTimer,
    visibility: VisibilityObserver,
    hint: SwipeHint,
    adapters: Vec<Box<dyn InputAdapter>>,
}

impl Carousel {
    /// Validate the structure, then run the initial sync.
    ///
    /// Nothing is written to the surface unless every required element is
    /// present and there is at least one card.
    pub fn mount<S: Surface + ?Sized>(
        settings: CarouselSettings,
        surface: &mut S,
    ) -> Result<Self, MountError> {
        if let Some(missing) = REQUIRED.iter().find(|e| !surface.contains(**e)) {
            return Err(MountError::MissingElement(*missing));
        }
        let total = surface.card_count();
        let state = CarouselState::new(total).ok_or(MountError::NoCards)?;
        if let Some(missing) = (0..total)
            .map(Element::Card)
            .find(|e| !surface.contains(*e))
        {
            return Err(MountError::MissingElement(missing));
        }

        let (fast, medium) = if settings.reduced_motion {
            (Duration::ZERO, Duration::ZERO)
        } else {
            (settings.transition_fast, settings.transition_medium)
        };
        surface.set_style(Element::Root, Style::TransitionFast(fast));
        surface.set_style(Element::Root, Style::TransitionMedium(medium));

        for card in 0..total {
            let delay = settings.stagger.saturating_mul(card as u32);
            surface.set_style(Element::Card(card), Style::AnimationDelay(delay));
        }

        UiSynchronizer::new(&state).update_ui(&mut *surface);

        let mut visibility = VisibilityObserver::new(total, settings.visibility_threshold);
        visibility.observe(&mut *surface);

        tracing::info!(
            cards = total,
            placeholders = surface.placeholder_count(),
            reduced_motion = settings.reduced_motion,
            "carousel mounted"
        );

        Ok(Self {
            state,
            settle: SettleTimer::new(settings.settle_delay),
            settings,
            visibility,
            hint: SwipeHint::new(),
            adapters: default_adapters(),
        })
    }

    /// Register an extra adapter after the defaults
    #[cfg(test)]
    pub fn register(&mut self, adapter: Box<dyn InputAdapter>) {
        tracing::debug!(adapter = adapter.name(), "input adapter registered");
        self.adapters.push(adapter);
    }

    /// Offer one event to every adapter
    pub fn dispatch<S: Surface>(
        &mut self,
        event: &InputEvent,
        now: Instant,
        surface: &mut S,
    ) -> Handled {
        self.hint.note(event, now, &mut *surface);

        let mut handled = Handled::No;
        for adapter in self.adapters.iter_mut() {
            let mut cx = AdapterCx {
                state: &mut self.state,
                surface: &mut *surface,
                settle: &mut self.settle,
                settings: &self.settings,
                now,
            };
            if adapter.handle(event, &mut cx).was_handled() {
                tracing::trace!(adapter = adapter.name(), ?event, "event handled");
                handled = Handled::Yes;
            }
        }

        if matches!(event, InputEvent::Scroll) {
            self.visibility.observe(&mut *surface);
        }
        handled
    }

    /// Fire any deadline that has passed
    pub fn poll_timers<S: Surface + ?Sized>(&mut self, now: Instant, surface: &mut S) {
        if self.settle.fire_if_due(now) {
            let container = surface.container_rect();
            let rects = surface.card_rects();
            match settle::nearest_card(container, &rects) {
                Some(nearest) if nearest != self.state.index() => {
                    Navigator::new(&mut self.state, &mut *surface).adopt(nearest);
                }
                _ => tracing::trace!(index = self.state.index(), "scroll settled in place"),
            }
        }
        self.hint.poll(now, &mut *surface);
    }

    /// Earliest pending deadline, for hosts that sleep between events
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.settle.deadline(), self.hint.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Re-run the visibility pass after a layout change (resize)
    pub fn observe_layout<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.visibility.observe(surface);
    }

    pub fn index(&self) -> usize {
        self.state.index()
    }

    pub fn total(&self) -> usize {
        self.state.total()
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_armed()
    }

    pub fn seen_count(&self) -> usize {
        self.visibility.seen_count()
    }

    #[cfg(test)]
    pub fn hint_dismissed(&self) -> bool {
        self.hint.is_hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::input::Key;
    use super::stage::{Stage, StageLayout};
    use super::surface::{Class, Span};
    use super::sync::DIMMED_OPACITY;
    use super::testing::RecordingSurface;
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn stage(cards: usize, t0: Instant) -> Stage {
        let layout = StageLayout {
            card_width: 200.0,
            gap: 20.0,
        };
        Stage::new(cards, vec![0], layout, 400.0, t0)
    }

    fn mounted(cards: usize, t0: Instant) -> (Carousel, Stage) {
        let mut stage = stage(cards, t0);
        let carousel = Carousel::mount(CarouselSettings::default(), &mut stage).unwrap();
        (carousel, stage)
    }

    #[test]
    fn mount_fails_fast_on_missing_element() {
        let mut surface = RecordingSurface::new(3).without(Element::ProgressFill);
        let err = Carousel::mount(CarouselSettings::default(), &mut surface).err();
        assert_eq!(err, Some(MountError::MissingElement(Element::ProgressFill)));
        assert_eq!(surface.mutation_count(), 0);
    }

    #[test]
    fn mount_fails_on_missing_card() {
        let mut surface = RecordingSurface::new(3).without(Element::Card(1));
        let err = Carousel::mount(CarouselSettings::default(), &mut surface).err();
        assert_eq!(err, Some(MountError::MissingElement(Element::Card(1))));
        assert_eq!(surface.mutation_count(), 0);
    }

    #[test]
    fn mount_fails_without_cards() {
        let mut surface = RecordingSurface::new(0);
        let err = Carousel::mount(CarouselSettings::default(), &mut surface).err();
        assert_eq!(err, Some(MountError::NoCards));
        assert_eq!(surface.mutation_count(), 0);
    }

    #[test]
    fn mount_runs_initial_sync_and_stagger() {
        let mut surface = RecordingSurface::new(3);
        let carousel = Carousel::mount(CarouselSettings::default(), &mut surface).unwrap();

        assert_eq!(carousel.index(), 0);
        assert_eq!(surface.text(Element::Counter), Some("1"));
        assert_eq!(
            surface.style(Element::PrevButton),
            Some(Style::Opacity(DIMMED_OPACITY))
        );
        assert_eq!(surface.cards_with(Class::Active), vec![0]);
        assert_eq!(
            surface.style(Element::Card(2)),
            Some(Style::AnimationDelay(ms(200)))
        );
    }

    #[test]
    fn reduced_motion_zeroes_root_transitions() {
        let mut surface = RecordingSurface::new(2);
        let settings = CarouselSettings {
            reduced_motion: true,
            ..CarouselSettings::default()
        };
        Carousel::mount(settings, &mut surface).unwrap();
        assert_eq!(
            surface.styles_of(Element::Root),
            vec![
                Style::TransitionFast(Duration::ZERO),
                Style::TransitionMedium(Duration::ZERO)
            ]
        );
    }

    #[test]
    fn five_cards_end_to_end() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(5, t0);

        for _ in 0..3 {
            carousel.dispatch(&InputEvent::NextButton, t0, &mut stage);
        }
        let snap = stage.snapshot();
        assert_eq!(carousel.index(), 3);
        assert_eq!(snap.counter, "4");
        assert_eq!(snap.progress_percent, 80.0);
        assert_eq!(snap.prev_opacity, 1.0);
        assert_eq!(snap.next_opacity, 1.0);

        for _ in 0..2 {
            carousel.dispatch(&InputEvent::NextButton, t0, &mut stage);
        }
        let snap = stage.snapshot();
        assert_eq!(carousel.index(), 4);
        assert_eq!(snap.counter, "5");
        assert_eq!(snap.progress_percent, 100.0);
        assert_eq!(snap.next_opacity, DIMMED_OPACITY);
        assert_eq!(snap.active, vec![4]);
    }

    #[test]
    fn progress_click_seeks() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(5, t0);
        let click = InputEvent::ProgressClick {
            offset: 90.0,
            width: 100.0,
        };
        assert!(carousel.dispatch(&click, t0, &mut stage).was_handled());
        assert_eq!(carousel.index(), 4);
    }

    #[test]
    fn progress_click_at_far_right_is_rejected_by_default() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(5, t0);
        let click = InputEvent::ProgressClick {
            offset: 100.0,
            width: 100.0,
        };
        carousel.dispatch(&click, t0, &mut stage);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn keyboard_home_and_end() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(5, t0);
        carousel.dispatch(&InputEvent::KeyDown { key: Key::End }, t0, &mut stage);
        assert_eq!(carousel.index(), 4);
        carousel.dispatch(&InputEvent::KeyDown { key: Key::ArrowLeft }, t0, &mut stage);
        assert_eq!(carousel.index(), 3);
        carousel.dispatch(&InputEvent::KeyDown { key: Key::Home }, t0, &mut stage);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn swipe_threshold_through_dispatch() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(5, t0);
        carousel.dispatch(&InputEvent::KeyDown { key: Key::End }, t0, &mut stage);

        // 49px to the right: nothing
        carousel.dispatch(&InputEvent::TouchStart { x: 100.0 }, t0, &mut stage);
        carousel.dispatch(&InputEvent::TouchEnd { x: 149.0 }, t0, &mut stage);
        assert_eq!(carousel.index(), 4);

        // 51px to the right: previous
        carousel.dispatch(&InputEvent::TouchStart { x: 100.0 }, t0, &mut stage);
        carousel.dispatch(&InputEvent::TouchEnd { x: 151.0 }, t0, &mut stage);
        assert_eq!(carousel.index(), 3);

        // 51px to the left: next
        carousel.dispatch(&InputEvent::TouchStart { x: 151.0 }, t0, &mut stage);
        carousel.dispatch(&InputEvent::TouchEnd { x: 100.0 }, t0, &mut stage);
        assert_eq!(carousel.index(), 4);
    }

    #[test]
    fn scroll_burst_settles_exactly_once() {
        let t0 = Instant::now();
        let mut surface = RecordingSurface::new(3);
        surface.rects = vec![
            Span::new(-200.0, 60.0),
            Span::new(-100.0, 60.0),
            Span::new(20.0, 60.0), // center 50, the container's center
        ];
        let mut carousel = Carousel::mount(CarouselSettings::default(), &mut surface).unwrap();
        let syncs = |s: &RecordingSurface| s.styles_of(Element::ProgressFill).len();
        assert_eq!(syncs(&surface), 1);

        for step in 0..10 {
            let now = t0 + ms(step * 5);
            carousel.dispatch(&InputEvent::Scroll, now, &mut surface);
            carousel.poll_timers(now, &mut surface);
        }
        assert!(carousel.is_settling());
        carousel.poll_timers(t0 + ms(45 + 49), &mut surface);
        assert_eq!(carousel.index(), 0);

        carousel.poll_timers(t0 + ms(45 + 50), &mut surface);
        assert_eq!(carousel.index(), 2);
        assert!(!carousel.is_settling());
        carousel.poll_timers(t0 + ms(1000), &mut surface);

        assert_eq!(syncs(&surface), 2);
        assert_eq!(surface.text(Element::Counter), Some("3"));
        assert!(surface.scrolls.is_empty());
    }

    #[test]
    fn free_scroll_on_stage_adopts_centered_card() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(5, t0);

        // Card pitch is 220px; this centers card 2
        stage.scroll_by(440.0);
        assert!(stage.take_scrolled());
        carousel.dispatch(&InputEvent::Scroll, t0, &mut stage);
        carousel.poll_timers(t0 + ms(50), &mut stage);

        assert_eq!(carousel.index(), 2);
        assert_eq!(stage.snapshot().counter, "3");
        assert!(carousel.seen_count() >= 2);
    }

    #[test]
    fn first_scroll_dismisses_hint() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(3, t0);
        carousel.dispatch(&InputEvent::Scroll, t0, &mut stage);
        assert_eq!(carousel.next_deadline(), Some(t0 + ms(50)));

        stage.tick(t0 + ms(500));
        carousel.poll_timers(t0 + ms(500), &mut stage);
        assert!(carousel.hint_dismissed());
        assert!(stage.snapshot().hint_hidden);
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn hover_toggles_glitch() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(2, t0);
        carousel.dispatch(&InputEvent::PointerEnter { placeholder: 0 }, t0, &mut stage);
        assert!(stage.is_glitching(0));
        carousel.dispatch(&InputEvent::PointerLeave { placeholder: 0 }, t0, &mut stage);
        assert!(!stage.is_glitching(0));
    }

    #[test]
    fn hover_marks_placeholder_class() {
        let t0 = Instant::now();
        let mut surface = RecordingSurface::new(2).with_placeholders(1);
        let mut carousel = Carousel::mount(CarouselSettings::default(), &mut surface).unwrap();
        carousel.dispatch(&InputEvent::PointerEnter { placeholder: 0 }, t0, &mut surface);
        assert!(surface.has_class(Element::Placeholder(0), surface::Class::GlitchHover));
    }

    /// Counts every event it sees and claims none of them
    struct Tally(std::rc::Rc<std::cell::Cell<usize>>);

    impl InputAdapter for Tally {
        fn name(&self) -> &'static str {
            "tally"
        }

        fn handle(&mut self, _event: &InputEvent, _cx: &mut AdapterCx<'_>) -> Handled {
            self.0.set(self.0.get() + 1);
            Handled::No
        }
    }

    #[test]
    fn registered_adapter_sees_every_event() {
        let t0 = Instant::now();
        let (mut carousel, mut stage) = mounted(3, t0);
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        carousel.register(Box::new(Tally(seen.clone())));

        carousel.dispatch(&InputEvent::NextButton, t0, &mut stage);
        carousel.dispatch(&InputEvent::KeyDown { key: Key::Other }, t0, &mut stage);
        assert_eq!(seen.get(), 2);
        assert_eq!(carousel.index(), 1);
    }
}
