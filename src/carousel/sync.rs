//! UI synchronizer: pushes the current index out to every indicator

use super::state::CarouselState;
use super::surface::{Class, Element, ElementSink, Style};

/// Opacity of a navigation button that has nowhere left to go
pub const DIMMED_OPACITY: f32 = 0.3;

/// What the indicators were set to on the last sync
#[derive(Debug, Clone, PartialEq)]
pub struct UiSnapshot {
    pub counter: String,
    pub progress_percent: f64,
    pub prev_opacity: f32,
    pub next_opacity: f32,
    pub active: usize,
}

/// Fill percentage for a 0-based index
pub fn progress_percent(index: usize, total: usize) -> f64 {
    ((index + 1) as f64 / total as f64) * 100.0
}

/// Reads the state, writes the indicators. Holds no state of its own.
pub struct UiSynchronizer<'a> {
    state: &'a CarouselState,
}

impl<'a> UiSynchronizer<'a> {
    pub fn new(state: &'a CarouselState) -> Self {
        Self { state }
    }

    /// Compute indicator values without touching a sink
    pub fn snapshot(&self) -> UiSnapshot {
        let index = self.state.index();
        UiSnapshot {
            counter: (index + 1).to_string(),
            progress_percent: progress_percent(index, self.state.total()),
            prev_opacity: if self.state.is_first() {
                DIMMED_OPACITY
            } else {
                1.0
            },
            next_opacity: if self.state.is_last() {
                DIMMED_OPACITY
            } else {
                1.0
            },
            active: index,
        }
    }

    /// Full re-evaluation: counter, fill, buttons, then every card's active flag
    pub fn update_ui<S: ElementSink + ?Sized>(&self, sink: &mut S) -> UiSnapshot {
        let snapshot = self.snapshot();

        sink.set_text(Element::Counter, snapshot.counter.clone());
        sink.set_style(
            Element::ProgressFill,
            Style::Width(snapshot.progress_percent),
        );
        sink.set_style(Element::PrevButton, Style::Opacity(snapshot.prev_opacity));
        sink.set_style(Element::NextButton, Style::Opacity(snapshot.next_opacity));

        for card in 0..self.state.total() {
            sink.toggle_class(Element::Card(card), Class::Active, card == snapshot.active);
        }

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::testing::RecordingSurface;

    fn state_at(total: usize, index: i64) -> CarouselState {
        let mut state = CarouselState::new(total).unwrap();
        state.try_set(index).unwrap();
        state
    }

    #[test]
    fn counter_is_one_based() {
        let state = state_at(5, 2);
        assert_eq!(UiSynchronizer::new(&state).snapshot().counter, "3");
    }

    #[test]
    fn progress_matches_formula_for_every_index() {
        for index in 0..7 {
            let state = state_at(7, index as i64);
            let snap = UiSynchronizer::new(&state).snapshot();
            assert_eq!(
                snap.progress_percent,
                ((index + 1) as f64 / 7.0) * 100.0
            );
            assert!(snap.progress_percent > 0.0 && snap.progress_percent <= 100.0);
        }
    }

    #[test]
    fn buttons_dim_at_boundaries() {
        let first = UiSynchronizer::new(&state_at(3, 0)).snapshot();
        assert_eq!(first.prev_opacity, DIMMED_OPACITY);
        assert_eq!(first.next_opacity, 1.0);

        let middle = UiSynchronizer::new(&state_at(3, 1)).snapshot();
        assert_eq!(middle.prev_opacity, 1.0);
        assert_eq!(middle.next_opacity, 1.0);

        let last = UiSynchronizer::new(&state_at(3, 2)).snapshot();
        assert_eq!(last.prev_opacity, 1.0);
        assert_eq!(last.next_opacity, DIMMED_OPACITY);
    }

    #[test]
    fn single_card_dims_both_buttons() {
        let snap = UiSynchronizer::new(&state_at(1, 0)).snapshot();
        assert_eq!(snap.prev_opacity, DIMMED_OPACITY);
        assert_eq!(snap.next_opacity, DIMMED_OPACITY);
        assert_eq!(snap.progress_percent, 100.0);
    }

    #[test]
    fn update_ui_marks_exactly_one_active_card() {
        let mut sink = RecordingSurface::new(6);
        // Stale marks from an earlier sync must be cleared
        sink.toggle_class(Element::Card(0), Class::Active, true);
        sink.toggle_class(Element::Card(5), Class::Active, true);

        UiSynchronizer::new(&state_at(6, 4)).update_ui(&mut sink);

        assert_eq!(sink.cards_with(Class::Active), vec![4]);
        assert_eq!(sink.text(Element::Counter), Some("5"));
        assert_eq!(
            sink.style(Element::ProgressFill),
            Some(Style::Width(progress_percent(4, 6)))
        );
    }
}
