//! Recording surface for unit tests

use super::surface::{Class, Element, ElementSink, LayoutProbe, ScrollIntoView, Span, Style};
use std::collections::{HashMap, HashSet};

/// Records every mutation and serves canned geometry
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    cards: usize,
    placeholders: usize,
    missing: Vec<Element>,
    texts: HashMap<Element, String>,
    styles: Vec<(Element, Style)>,
    classes: HashSet<(Element, Class)>,
    pub scrolls: Vec<(usize, ScrollIntoView)>,
    pub container: Span,
    pub rects: Vec<Span>,
}

impl RecordingSurface {
    pub fn new(cards: usize) -> Self {
        Self {
            cards,
            placeholders: 0,
            missing: Vec::new(),
            texts: HashMap::new(),
            styles: Vec::new(),
            classes: HashSet::new(),
            scrolls: Vec::new(),
            container: Span::new(0.0, 100.0),
            rects: Vec::new(),
        }
    }

    pub fn with_placeholders(mut self, placeholders: usize) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Pretend `element` is absent from the structure
    pub fn without(mut self, element: Element) -> Self {
        self.missing.push(element);
        self
    }

    pub fn text(&self, element: Element) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    /// Last style written to `element`
    pub fn style(&self, element: Element) -> Option<Style> {
        self.styles
            .iter()
            .rev()
            .find(|(e, _)| *e == element)
            .map(|(_, style)| *style)
    }

    /// Every style written to `element`, oldest first
    pub fn styles_of(&self, element: Element) -> Vec<Style> {
        self.styles
            .iter()
            .filter(|(e, _)| *e == element)
            .map(|(_, style)| *style)
            .collect()
    }

    pub fn has_class(&self, element: Element, class: Class) -> bool {
        self.classes.contains(&(element, class))
    }

    pub fn cards_with(&self, class: Class) -> Vec<usize> {
        (0..self.cards)
            .filter(|&i| self.has_class(Element::Card(i), class))
            .collect()
    }

    pub fn mutation_count(&self) -> usize {
        self.texts.len() + self.styles.len() + self.classes.len() + self.scrolls.len()
    }
}

impl ElementSink for RecordingSurface {
    fn set_text(&mut self, element: Element, text: String) {
        self.texts.insert(element, text);
    }

    fn set_style(&mut self, element: Element, style: Style) {
        self.styles.push((element, style));
    }

    fn toggle_class(&mut self, element: Element, class: Class, on: bool) {
        if on {
            self.classes.insert((element, class));
        } else {
            self.classes.remove(&(element, class));
        }
    }

    fn scroll_into_view(&mut self, card: usize, options: ScrollIntoView) {
        self.scrolls.push((card, options));
    }
}

impl LayoutProbe for RecordingSurface {
    fn contains(&self, element: Element) -> bool {
        if self.missing.contains(&element) {
            return false;
        }
        match element {
            Element::Card(i) => i < self.cards,
            Element::Placeholder(i) => i < self.placeholders,
            _ => true,
        }
    }

    fn card_count(&self) -> usize {
        self.cards
    }

    fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    fn container_rect(&self) -> Span {
        self.container
    }

    fn card_rects(&self) -> Vec<Span> {
        self.rects.clone()
    }
}
