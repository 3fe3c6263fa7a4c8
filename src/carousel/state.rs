//! Index state: the one piece of mutable carousel state

/// Current card position plus the fixed card total
///
/// Invariant: `index < total`, and `total > 0`. Only the navigator writes
/// through [`CarouselState::try_set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    total: usize,
}

impl CarouselState {
    /// Start at the first card. Returns `None` for an empty carousel.
    pub fn new(total: usize) -> Option<Self> {
        (total > 0).then_some(Self { index: 0, total })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn last(&self) -> usize {
        self.total - 1
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index == self.last()
    }

    /// Map an arbitrary request onto a valid index, if it is one
    pub fn resolve(&self, target: i64) -> Option<usize> {
        usize::try_from(target).ok().filter(|&i| i < self.total)
    }

    /// Validated setter; out-of-range targets leave the state untouched
    pub(super) fn try_set(&mut self, target: i64) -> Option<usize> {
        let index = self.resolve(target)?;
        self.index = index;
        Some(index)
    }
}
