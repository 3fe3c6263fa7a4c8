//! One-way "seen" tracking for entrance animations
//!
//! Runs on layout changes, never on index changes, and never clears a flag.

use super::surface::{Class, Element, Surface};

/// Default visible fraction that counts as "in view"
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    seen: Vec<bool>,
}

impl VisibilityObserver {
    pub fn new(cards: usize, threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            seen: vec![false; cards],
        }
    }

    /// Check every unseen card against the container viewport.
    /// Returns the cards that crossed the threshold on this pass.
    pub fn observe<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Vec<usize> {
        let viewport = surface.container_rect();
        let rects = surface.card_rects();
        let mut newly_seen = Vec::new();

        for (index, rect) in rects.iter().enumerate() {
            let Some(seen) = self.seen.get_mut(index) else {
                break;
            };
            if *seen {
                continue;
            }

            let ratio = rect.intersection_ratio(viewport);
            if ratio > 0.0 && ratio >= self.threshold {
                *seen = true;
                surface.toggle_class(Element::Card(index), Class::InView, true);
                newly_seen.push(index);
            }
        }

        if !newly_seen.is_empty() {
            tracing::trace!(cards = ?newly_seen, "cards entered view");
        }
        newly_seen
    }

    #[cfg(test)]
    pub fn is_seen(&self, index: usize) -> bool {
        self.seen.get(index).copied().unwrap_or(false)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.iter().filter(|&&s| s).count()
    }
}
