//! Navigator: the only way the current index changes

use super::state::CarouselState;
use super::surface::{ElementSink, ScrollIntoView};
use super::sync::UiSynchronizer;

/// Borrows the state and a sink for the duration of one navigation
pub struct Navigator<'a, S: ElementSink + ?Sized> {
    state: &'a mut CarouselState,
    sink: &'a mut S,
}

impl<'a, S: ElementSink + ?Sized> Navigator<'a, S> {
    pub fn new(state: &'a mut CarouselState, sink: &'a mut S) -> Self {
        Self { state, sink }
    }

    /// Move to `target`, scroll it into view, resync the indicators.
    ///
    /// Out-of-range targets are dropped silently and return `false`.
    pub fn go_to_card(&mut self, target: i64) -> bool {
        let Some(index) = self.state.try_set(target) else {
            tracing::trace!(target, total = self.state.total(), "navigation rejected");
            return false;
        };

        self.sink.scroll_into_view(index, ScrollIntoView::CENTERED);
        UiSynchronizer::new(&*self.state).update_ui(&mut *self.sink);
        tracing::debug!(index, "navigated to card");
        true
    }

    /// Take over an index the view already shows (scroll settle).
    /// Never scrolls.
    pub fn adopt(&mut self, index: usize) -> bool {
        let Ok(target) = i64::try_from(index) else {
            return false;
        };
        if self.state.try_set(target).is_none() {
            return false;
        }

        UiSynchronizer::new(&*self.state).update_ui(&mut *self.sink);
        tracing::debug!(index, "settled on card");
        true
    }

    pub fn previous(&mut self) -> bool {
        self.go_to_card(self.state.index() as i64 - 1)
    }

    pub fn next(&mut self) -> bool {
        self.go_to_card(self.state.index() as i64 + 1)
    }

    pub fn first(&mut self) -> bool {
        self.go_to_card(0)
    }

    pub fn last(&mut self) -> bool {
        self.go_to_card(self.state.last() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::surface::{Class, Element};
    use crate::carousel::testing::RecordingSurface;

    #[test]
    fn accepted_navigation_scrolls_and_syncs() {
        let mut state = CarouselState::new(5).unwrap();
        let mut sink = RecordingSurface::new(5);

        assert!(Navigator::new(&mut state, &mut sink).go_to_card(3));

        assert_eq!(state.index(), 3);
        assert_eq!(sink.scrolls, vec![(3, ScrollIntoView::CENTERED)]);
        assert_eq!(sink.text(Element::Counter), Some("4"));
        assert_eq!(sink.cards_with(Class::Active), vec![3]);
    }

    #[test]
    fn rejected_navigation_has_no_side_effects() {
        let mut state = CarouselState::new(5).unwrap();
        let mut sink = RecordingSurface::new(5);

        let mut nav = Navigator::new(&mut state, &mut sink);
        assert!(!nav.go_to_card(-1));
        assert!(!nav.go_to_card(5));

        assert_eq!(state.index(), 0);
        assert!(sink.scrolls.is_empty());
        assert_eq!(sink.text(Element::Counter), None);
    }

    #[test]
    fn previous_at_start_and_next_at_end_are_idempotent() {
        let mut state = CarouselState::new(3).unwrap();
        let mut sink = RecordingSurface::new(3);

        assert!(!Navigator::new(&mut state, &mut sink).previous());
        assert_eq!(state.index(), 0);

        assert!(Navigator::new(&mut state, &mut sink).last());
        assert!(!Navigator::new(&mut state, &mut sink).next());
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn adopt_syncs_without_scrolling() {
        let mut state = CarouselState::new(4).unwrap();
        let mut sink = RecordingSurface::new(4);

        assert!(Navigator::new(&mut state, &mut sink).adopt(2));
        assert_eq!(state.index(), 2);
        assert!(sink.scrolls.is_empty());
        assert_eq!(sink.text(Element::Counter), Some("3"));

        assert!(!Navigator::new(&mut state, &mut sink).adopt(4));
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn index_stays_in_bounds_for_any_request_sequence() {
        let mut state = CarouselState::new(4).unwrap();
        let mut sink = RecordingSurface::new(4);
        let requests = [-7_i64, 0, 9, 3, 4, -1, 2, i64::MIN, 1, i64::MAX, 5, 3];

        for (step, target) in requests.iter().enumerate() {
            let mut nav = Navigator::new(&mut state, &mut sink);
            match step % 3 {
                0 => nav.go_to_card(*target),
                1 => nav.next(),
                _ => nav.previous(),
            };
            assert!(state.index() < state.total());
        }
    }
}
