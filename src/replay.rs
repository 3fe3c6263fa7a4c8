// Replay module - headless runs driven by a recorded event script
//
// A script is JSON Lines: one InputEvent per line with an optional `at_ms`
// timestamp. Blank lines and lines starting with '#' are skipped. The runner
// owns a synthetic clock, so a replay is deterministic and finishes as fast
// as the machine can step it.

use crate::carousel::input::{EventSource, InputEvent, ScriptedSource, TimedEvent};
use crate::carousel::stage::{Stage, StageLayout, StageSnapshot};
use crate::carousel::surface::LayoutProbe;
use crate::carousel::{Carousel, CarouselSettings};
use crate::config::Config;
use crate::deck::Deck;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};

/// Simulated frame length between script events
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on simulated time spent waiting for timers after the script
const SETTLE_CAP: Duration = Duration::from_secs(30);

/// Upper bound on simulated time between two consecutive events. Every
/// timer is long done well before this, so longer gaps change nothing.
const MAX_GAP: Duration = Duration::from_secs(60);

/// Parse a JSONL script. Errors name the offending line.
pub fn parse_script(contents: &str) -> Result<Vec<TimedEvent>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(number, line)| {
            serde_json::from_str::<TimedEvent>(line)
                .with_context(|| format!("line {}: invalid event: {}", number + 1, line.trim()))
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<ScriptedSource> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read replay script {}", path.display()))?;
    let events = parse_script(&contents)?;
    tracing::info!(path = %path.display(), events = events.len(), "replay script loaded");
    Ok(ScriptedSource::new(events))
}

/// A carousel on a stage, stepped by a synthetic clock
pub struct Replay {
    carousel: Carousel,
    stage: Stage,
    start: Instant,
    now: Instant,
}

impl Replay {
    pub fn new(deck: &Deck, config: &Config, columns: u16) -> Result<Self> {
        let start = Instant::now();
        let carousel_config = &config.carousel;
        let layout = StageLayout::from_columns(
            carousel_config.card_width,
            carousel_config.card_gap,
            carousel_config.px_per_column,
        );
        let viewport = f64::from(columns) * carousel_config.px_per_column;

        let mut stage = Stage::new(
            deck.cards.len(),
            deck.placeholder_owners(),
            layout,
            viewport,
            start,
        );
        let carousel = Carousel::mount(CarouselSettings::from(config), &mut stage)
            .context("failed to mount carousel")?;

        Ok(Self {
            carousel,
            stage,
            start,
            now: start,
        })
    }

    /// One frame at the current clock: animate, report scrolling, fire timers
    fn step(&mut self) {
        self.stage.tick(self.now);
        if self.stage.take_scrolled() {
            self.carousel
                .dispatch(&InputEvent::Scroll, self.now, &mut self.stage);
        }
        self.carousel.poll_timers(self.now, &mut self.stage);
    }

    /// Step frames until `target`, landing exactly on it
    fn advance_to(&mut self, target: Instant) {
        while let Some(next) = self.now.checked_add(FRAME).filter(|next| *next < target) {
            self.now = next;
            self.step();
        }
        if self.now < target {
            self.now = target;
            self.step();
        }
    }

    /// Clock time for an event stamped `at_ms`, given the previous stamp.
    /// Gaps are capped at `MAX_GAP` and stamps that go backwards run now.
    fn event_time(&self, at_ms: u64, last_ms: u64) -> Instant {
        if at_ms < last_ms {
            tracing::warn!(at_ms, last_ms, "event timestamp goes backwards, running it now");
            return self.now;
        }
        let gap = Duration::from_millis(at_ms - last_ms);
        if gap > MAX_GAP {
            tracing::warn!(at_ms, gap_ms = gap.as_millis() as u64, "event gap capped");
        }
        self.now.checked_add(gap.min(MAX_GAP)).unwrap_or(self.now)
    }

    fn is_quiet(&self) -> bool {
        !self.stage.is_animating() && self.carousel.next_deadline().is_none()
    }

    /// Feed every event, then let animations and timers run out
    pub fn run(mut self, source: &mut impl EventSource) -> StageSnapshot {
        let mut count = 0usize;
        let mut last_ms = 0u64;
        while let Some(TimedEvent { at_ms, event }) = source.next_event() {
            let at = self.event_time(at_ms, last_ms);
            last_ms = last_ms.max(at_ms);
            self.advance_to(at);

            if let InputEvent::ScrollBy { dx } = event {
                self.stage.scroll_by(dx);
            }
            let handled = self.carousel.dispatch(&event, self.now, &mut self.stage);
            tracing::debug!(at_ms, ?event, handled = handled.was_handled(), "replayed");
            self.step();
            count += 1;
        }

        let deadline = self.now.checked_add(SETTLE_CAP).unwrap_or(self.now);
        while !self.is_quiet() && self.now < deadline {
            let next = self.now.checked_add(FRAME).map_or(deadline, |next| next.min(deadline));
            self.advance_to(next);
        }
        if !self.is_quiet() {
            tracing::warn!("replay stopped before timers went quiet");
        }

        tracing::info!(
            events = count,
            index = self.carousel.index(),
            cards = self.stage.card_count(),
            elapsed_ms = self.now.duration_since(self.start).as_millis() as u64,
            "replay finished"
        );
        self.stage.snapshot()
    }
}
