//! Swipe hint: shown until the first interaction, then faded out once

use super::input::InputEvent;
use super::surface::{Element, ElementSink, Style};
use std::time::{Duration, Instant};

/// Fade-out length; the hint is removed from layout when it ends
pub const HINT_FADE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Shown,
    Fading { hide_at: Instant },
    Hidden,
}

#[derive(Debug, Clone)]
pub struct SwipeHint {
    phase: Phase,
}

impl SwipeHint {
    pub fn new() -> Self {
        Self {
            phase: Phase::Shown,
        }
    }

    /// Only the first scroll or key press counts as an interaction
    pub fn note<S: ElementSink + ?Sized>(
        &mut self,
        event: &InputEvent,
        now: Instant,
        sink: &mut S,
    ) {
        if self.phase != Phase::Shown {
            return;
        }
        if !matches!(event, InputEvent::Scroll | InputEvent::KeyDown { .. }) {
            return;
        }

        sink.set_style(Element::SwipeHint, Style::Transition(HINT_FADE));
        sink.set_style(Element::SwipeHint, Style::Opacity(0.0));
        self.phase = Phase::Fading {
            hide_at: now + HINT_FADE,
        };
        tracing::debug!("swipe hint dismissed");
    }

    pub fn poll<S: ElementSink + ?Sized>(&mut self, now: Instant, sink: &mut S) {
        if let Phase::Fading { hide_at } = self.phase {
            if now >= hide_at {
                sink.set_style(Element::SwipeHint, Style::Hidden);
                self.phase = Phase::Hidden;
            }
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Fading { hide_at } => Some(hide_at),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_hidden(&self) -> bool {
        self.phase == Phase::Hidden
    }
}

impl Default for SwipeHint {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::input::Key;
    use crate::carousel::testing::RecordingSurface;

    #[test]
    fn clicks_do_not_dismiss() {
        let mut hint = SwipeHint::new();
        let mut sink = RecordingSurface::new(1);
        hint.note(&InputEvent::NextButton, Instant::now(), &mut sink);
        assert_eq!(hint.deadline(), None);
        assert!(sink.styles_of(Element::SwipeHint).is_empty());
    }

    #[test]
    fn first_key_fades_then_hides() {
        let t0 = Instant::now();
        let mut hint = SwipeHint::new();
        let mut sink = RecordingSurface::new(1);

        hint.note(&InputEvent::KeyDown { key: Key::Other }, t0, &mut sink);
        assert_eq!(
            sink.styles_of(Element::SwipeHint),
            vec![Style::Transition(HINT_FADE), Style::Opacity(0.0)]
        );

        hint.poll(t0 + Duration::from_millis(499), &mut sink);
        assert!(!hint.is_hidden());
        hint.poll(t0 + HINT_FADE, &mut sink);
        assert!(hint.is_hidden());
        assert_eq!(sink.styles_of(Element::SwipeHint).last(), Some(&Style::Hidden));
    }

    #[test]
    fn dismissal_happens_once() {
        let t0 = Instant::now();
        let mut hint = SwipeHint::new();
        let mut sink = RecordingSurface::new(1);

        hint.note(&InputEvent::Scroll, t0, &mut sink);
        hint.note(&InputEvent::Scroll, t0 + Duration::from_millis(100), &mut sink);
        assert_eq!(hint.deadline(), Some(t0 + HINT_FADE));
        assert_eq!(sink.styles_of(Element::SwipeHint).len(), 2);
    }
}
