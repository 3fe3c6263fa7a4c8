// TUI application state
//
// Owns the carousel and the stage it draws from, and turns terminal input
// into carousel events. Terminal columns are converted to stage pixels here,
// so nothing below this layer knows about cells.

use super::components::card_strip::PLACEHOLDER_HEIGHT;
use super::input::InputHandler;
use super::layout::{hit, ScreenLayout};
use super::theme::{Theme, ThemeKind};
use crate::carousel::input::{InputEvent, Key};
use crate::carousel::stage::{Stage, StageLayout};
use crate::carousel::{Carousel, CarouselSettings, MountError};
use crate::config::Config;
use crate::deck::Deck;
use crate::logging::LogBuffer;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;

/// Columns moved per mouse wheel notch
const WHEEL_COLUMNS: f64 = 3.0;

pub struct App {
    pub deck: Deck,
    pub carousel: Carousel,
    pub stage: Stage,

    /// Current color theme
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Log buffer for the status line
    pub log_buffer: LogBuffer,

    /// Regions from the last layout pass, used for hit testing
    pub layout: ScreenLayout,
    area: Rect,
    px_per_column: f64,

    input_handler: InputHandler,
    /// Placeholder currently under the pointer
    hovered: Option<usize>,
    /// Gesture in progress, started inside the strip
    touch_started: bool,

    /// Clock origin for time-based effects
    pub started: Instant,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        deck: Deck,
        config: &Config,
        log_buffer: LogBuffer,
        area: Rect,
        now: Instant,
    ) -> Result<Self, MountError> {
        let px_per_column = config.carousel.px_per_column;
        let layout = ScreenLayout::compute(area, true);
        let stage_layout = StageLayout::from_columns(
            config.carousel.card_width,
            config.carousel.card_gap,
            px_per_column,
        );
        let mut stage = Stage::new(
            deck.cards.len(),
            deck.placeholder_owners(),
            stage_layout,
            f64::from(layout.strip.width) * px_per_column,
            now,
        );
        let carousel = Carousel::mount(CarouselSettings::from(config), &mut stage)?;

        let theme_kind = ThemeKind::from_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using dark");
            ThemeKind::Dark
        });

        Ok(Self {
            deck,
            carousel,
            stage,
            theme_kind,
            theme: theme_kind.theme(),
            log_buffer,
            layout,
            area,
            px_per_column,
            input_handler: InputHandler::default(),
            hovered: None,
            touch_started: false,
            started: now,
            should_quit: false,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Frame stepping
    // ─────────────────────────────────────────────────────────────────────

    /// Advance animations and timers to `now`
    pub fn frame(&mut self, now: Instant) {
        self.stage.tick(now);
        if self.stage.take_scrolled() {
            self.send(InputEvent::Scroll, now);
        }
        self.carousel.poll_timers(now, &mut self.stage);
    }

    fn send(&mut self, event: InputEvent, now: Instant) {
        self.carousel.dispatch(&event, now, &mut self.stage);
    }

    /// Recompute regions for the current terminal size. A new strip width
    /// resizes the stage and re-runs the visibility pass.
    pub fn relayout(&mut self, area: Rect) {
        let layout = ScreenLayout::compute(area, !self.stage.hint_hidden());
        let resized = area != self.area || layout.strip.width != self.layout.strip.width;
        self.layout = layout;
        self.area = area;

        if resized {
            self.stage
                .resize(f64::from(layout.strip.width) * self.px_per_column);
            self.carousel.observe_layout(&mut self.stage);
            tracing::debug!(width = area.width, height = area.height, "terminal resized");
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        tracing::info!(theme = self.theme_kind.name(), "theme changed");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Keyboard
    // ─────────────────────────────────────────────────────────────────────

    pub fn handle_key_press(&mut self, key: KeyCode, now: Instant) {
        if !self.input_handler.handle_key_press_at(key, now) {
            return;
        }

        let mapped = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.cycle_theme();
                Key::Other
            }
            KeyCode::Left | KeyCode::Char('h') => Key::ArrowLeft,
            KeyCode::Right | KeyCode::Char('l') => Key::ArrowRight,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Other,
        };
        self.send(InputEvent::KeyDown { key: mapped }, now);
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────────────

    fn column_px(&self, column: u16) -> f64 {
        f64::from(column.saturating_sub(self.layout.strip.x)) * self.px_per_column
    }

    /// Card position in columns relative to the strip's left edge
    pub fn card_columns(&self, index: usize) -> (i32, u16) {
        let rect = self.stage.card_rect(index);
        let left = (rect.left / self.px_per_column).round() as i32;
        let width = (rect.width / self.px_per_column).round() as u16;
        (left, width)
    }

    /// Placeholder drawn under a terminal cell, if any
    pub fn placeholder_at(&self, column: u16, row: u16) -> Option<usize> {
        let strip = self.layout.strip;
        if !hit(strip, column, row) {
            return None;
        }
        let row = row - strip.y;
        if row < 1 || row > PLACEHOLDER_HEIGHT {
            return None;
        }

        let x = i32::from(column - strip.x);
        (0..self.deck.cards.len()).find_map(|card| {
            let (left, width) = self.card_columns(card);
            if x > left && x < left + i32::from(width) - 1 {
                self.stage.placeholders_of(card).next()
            } else {
                None
            }
        })
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let layout = self.layout;
                if hit(layout.prev_button, column, row) {
                    self.send(InputEvent::PrevButton, now);
                } else if hit(layout.next_button, column, row) {
                    self.send(InputEvent::NextButton, now);
                } else if hit(layout.progress, column, row) {
                    let offset = f64::from(column - layout.progress.x) * self.px_per_column;
                    let width = f64::from(layout.progress.width) * self.px_per_column;
                    self.send(InputEvent::ProgressClick { offset, width }, now);
                } else if hit(layout.strip, column, row) {
                    self.touch_started = true;
                    let x = self.column_px(column);
                    self.send(InputEvent::TouchStart { x }, now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if std::mem::take(&mut self.touch_started) {
                    let x = self.column_px(column);
                    self.send(InputEvent::TouchEnd { x }, now);
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                self.stage.scroll_by(WHEEL_COLUMNS * self.px_per_column);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                self.stage.scroll_by(-WHEEL_COLUMNS * self.px_per_column);
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let over = self.placeholder_at(column, row);
                if over != self.hovered {
                    if let Some(placeholder) = self.hovered {
                        self.send(InputEvent::PointerLeave { placeholder }, now);
                    }
                    if let Some(placeholder) = over {
                        self.send(InputEvent::PointerEnter { placeholder }, now);
                    }
                    self.hovered = over;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn app(t0: Instant) -> App {
        let deck = Deck::bundled().unwrap();
        let area = Rect::new(0, 0, 100, 30);
        let mut app = App::new(deck, &Config::default(), LogBuffer::new(), area, t0).unwrap();
        app.relayout(area);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn arrow_key_moves_and_scrolls_to_card() {
        let t0 = Instant::now();
        let mut app = app(t0);

        app.handle_key_press(KeyCode::Right, t0);
        assert_eq!(app.carousel.index(), 1);

        app.frame(t0 + ms(1000));
        // card 1 centered: padding 224 + 368 + 176 - 400
        assert_eq!(app.stage.offset(), 368.0);
        assert_eq!(app.stage.counter(), "2");
        assert!(app.carousel.hint_dismissed());
    }

    #[test]
    fn vim_keys_and_end() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.handle_key_press(KeyCode::End, t0);
        assert_eq!(app.carousel.index(), app.deck.cards.len() - 1);
        app.handle_key_press(KeyCode::Char('h'), t0 + ms(10));
        assert_eq!(app.carousel.index(), app.deck.cards.len() - 2);
    }

    #[test]
    fn quit_and_theme_keys() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.handle_key_press(KeyCode::Char('t'), t0);
        assert_eq!(app.theme_kind, ThemeKind::Light);
        assert!(!app.should_quit);
        app.handle_key_press(KeyCode::Char('q'), t0);
        assert!(app.should_quit);
    }

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        let config = Config {
            theme: "dracula".to_string(),
            ..Config::default()
        };
        let app = App::new(
            Deck::bundled().unwrap(),
            &config,
            LogBuffer::new(),
            Rect::new(0, 0, 80, 24),
            Instant::now(),
        )
        .unwrap();
        assert_eq!(app.theme_kind, ThemeKind::Dark);
    }

    #[test]
    fn clicking_buttons_navigates() {
        let t0 = Instant::now();
        let mut app = app(t0);
        let next = app.layout.next_button;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), next.x, next.y), t0);
        assert_eq!(app.carousel.index(), 1);

        let prev = app.layout.prev_button;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), prev.x, prev.y), t0);
        assert_eq!(app.carousel.index(), 0);
    }

    #[test]
    fn progress_click_on_last_column_reaches_last_card() {
        let t0 = Instant::now();
        let mut app = app(t0);
        let track = app.layout.progress;
        let column = track.x + track.width - 1;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, track.y), t0);
        assert_eq!(app.carousel.index(), app.deck.cards.len() - 1);
    }

    #[test]
    fn drag_across_strip_swipes() {
        let t0 = Instant::now();
        let mut app = app(t0);
        let row = app.layout.strip.y + 4;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, row), t0);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 50, row), t0 + ms(80));
        assert_eq!(app.carousel.index(), 1);

        // 6 columns is 48px, under the threshold
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 50, row), t0 + ms(200));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 56, row), t0 + ms(260));
        assert_eq!(app.carousel.index(), 1);
    }

    #[test]
    fn release_without_press_is_not_a_swipe() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10, 5), t0);
        assert_eq!(app.carousel.index(), 0);
    }

    #[test]
    fn wheel_scroll_settles_on_nearest_card() {
        let t0 = Instant::now();
        let mut app = app(t0);
        for _ in 0..15 {
            app.handle_mouse(mouse(MouseEventKind::ScrollDown, 50, 10), t0);
        }
        // 45 columns is 360px, nearest to card 1 at 368
        app.frame(t0 + ms(16));
        assert!(app.carousel.is_settling());
        assert_eq!(app.carousel.index(), 0);

        app.frame(t0 + ms(100));
        assert_eq!(app.carousel.index(), 1);
    }

    #[test]
    fn hovering_placeholder_glitches() {
        let t0 = Instant::now();
        let mut app = app(t0);
        // card 0 is centered: 28 columns of padding, placeholder on the first inner rows
        let row = app.layout.strip.y + 1;
        assert_eq!(app.placeholder_at(30, row), Some(0));

        app.handle_mouse(mouse(MouseEventKind::Moved, 30, row), t0);
        assert!(app.stage.is_glitching(0));

        app.handle_mouse(mouse(MouseEventKind::Moved, 2, row), t0);
        assert!(!app.stage.is_glitching(0));
    }

    #[test]
    fn resize_keeps_active_card() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.handle_key_press(KeyCode::Right, t0);
        app.frame(t0 + ms(1000));

        app.relayout(Rect::new(0, 0, 60, 30));
        assert_eq!(app.stage.viewport(), 480.0);
        assert_eq!(app.carousel.index(), 1);
    }
}
