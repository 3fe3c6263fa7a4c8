//! Scroll settle detection
//!
//! Free scrolling does not go through the navigator. Instead every scroll
//! event pushes a deadline forward; once the container has been quiet for
//! the full delay, the card nearest the container's center becomes current.

use super::surface::Span;
use std::time::{Duration, Instant};

/// Default quiet period before a scroll counts as settled
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Restartable one-shot deadline
#[derive(Debug, Clone)]
pub struct SettleTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SettleTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Cancel any pending deadline and start a fresh one from `now`
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once per armed deadline, when it has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for SettleTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

/// Index of the card whose center is closest to the container's center.
///
/// Ties keep the earlier card. `None` only when there are no cards.
pub fn nearest_card(container: Span, cards: &[Span]) -> Option<usize> {
    let center = container.center();
    let mut best: Option<(usize, f64)> = None;

    for (index, card) in cards.iter().enumerate() {
        let distance = (center - card.center()).abs();
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}
