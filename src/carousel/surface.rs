//! The boundary between the carousel core and whatever displays it.
//!
//! The core never touches a renderer directly. It writes through an
//! [`ElementSink`] (text, inline styles, class toggles, scroll requests) and
//! reads geometry through a [`LayoutProbe`]. Anything implementing both is a
//! [`Surface`].

use std::fmt;
use std::time::Duration;

/// Elements the carousel binds to at mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Document root, carries the transition duration variables
    Root,
    /// The horizontally scrolling card container
    Container,
    /// A card, by position in source order
    Card(usize),
    /// A decorative placeholder, by position in source order
    Placeholder(usize),
    PrevButton,
    NextButton,
    /// Text node showing the 1-based current position
    Counter,
    /// Clickable progress track
    ProgressBar,
    /// Fill inside the progress track
    ProgressFill,
    SwipeHint,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Root => write!(f, "root"),
            Element::Container => write!(f, "card container"),
            Element::Card(i) => write!(f, "card #{}", i),
            Element::Placeholder(i) => write!(f, "placeholder #{}", i),
            Element::PrevButton => write!(f, "previous button"),
            Element::NextButton => write!(f, "next button"),
            Element::Counter => write!(f, "card counter"),
            Element::ProgressBar => write!(f, "progress bar"),
            Element::ProgressFill => write!(f, "progress fill"),
            Element::SwipeHint => write!(f, "swipe hint"),
        }
    }
}

/// Class markers toggled on elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// The card at the current index
    Active,
    /// One-way entrance marker set by the visibility observer
    InView,
    /// Pointer is over a placeholder
    GlitchHover,
}

impl Class {
    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Active => "active",
            Class::InView => "in-view",
            Class::GlitchHover => "glitch-hover",
        }
    }
}

/// Inline style mutations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    /// Width as a percentage of the parent (0.0..=100.0)
    Width(f64),
    Opacity(f32),
    /// Transition duration applied to subsequent style changes
    Transition(Duration),
    /// Removes the element from layout
    Hidden,
    /// Delay before the element's entrance animation starts
    AnimationDelay(Duration),
    /// Root variable for short transitions
    TransitionFast(Duration),
    /// Root variable for medium transitions (card entrance, smooth scroll)
    TransitionMedium(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Center,
    Nearest,
}

/// Options for bringing a card into view. Scrolling is smooth unless the
/// surface's medium transition is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollIntoView {
    /// Alignment across the scroll axis
    pub block: ScrollAlign,
    /// Alignment along the scroll axis
    pub inline: ScrollAlign,
}

impl ScrollIntoView {
    /// Centered on the navigation axis
    pub const CENTERED: ScrollIntoView = ScrollIntoView {
        block: ScrollAlign::Nearest,
        inline: ScrollAlign::Center,
    };
}

/// A horizontal extent, like the left/width pair of a bounding rect
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub left: f64,
    pub width: f64,
}

impl Span {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Fraction of this span that lies inside `viewport` (0.0..=1.0)
    pub fn intersection_ratio(&self, viewport: Span) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        let overlap = self.right().min(viewport.right()) - self.left.max(viewport.left);
        (overlap.max(0.0) / self.width).min(1.0)
    }
}

/// Write side of the surface
pub trait ElementSink {
    fn set_text(&mut self, element: Element, text: String);

    fn set_style(&mut self, element: Element, style: Style);

    fn toggle_class(&mut self, element: Element, class: Class, on: bool);

    /// Bring a card into view inside the container
    fn scroll_into_view(&mut self, card: usize, options: ScrollIntoView);
}

/// Read side of the surface
pub trait LayoutProbe {
    /// Whether an element exists in the bound structure
    fn contains(&self, element: Element) -> bool;

    /// Number of card elements, read once at mount
    fn card_count(&self) -> usize;

    /// Number of placeholder elements
    fn placeholder_count(&self) -> usize;

    /// Visible extent of the scroll container
    fn container_rect(&self) -> Span;

    /// Card extents in the container's coordinate space, in source order
    fn card_rects(&self) -> Vec<Span>;
}

pub trait Surface: ElementSink + LayoutProbe {}

impl<T: ElementSink + LayoutProbe + ?Sized> Surface for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_ratio_partial_and_outside() {
        let viewport = Span::new(0.0, 100.0);
        assert_eq!(Span::new(0.0, 40.0).intersection_ratio(viewport), 1.0);
        assert_eq!(Span::new(80.0, 40.0).intersection_ratio(viewport), 0.5);
        assert_eq!(Span::new(-30.0, 40.0).intersection_ratio(viewport), 0.25);
        assert_eq!(Span::new(150.0, 40.0).intersection_ratio(viewport), 0.0);
    }

    #[test]
    fn zero_width_span_is_never_visible() {
        assert_eq!(
            Span::new(10.0, 0.0).intersection_ratio(Span::new(0.0, 100.0)),
            0.0
        );
    }

    #[test]
    fn element_names_read_naturally() {
        assert_eq!(Element::Card(3).to_string(), "card #3");
        assert_eq!(Element::ProgressFill.to_string(), "progress fill");
    }
}
