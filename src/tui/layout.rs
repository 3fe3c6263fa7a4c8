//! Screen layout and responsive breakpoints.
//!
//! Layout is a pure function of the terminal size, computed once per frame
//! and kept on the app so mouse events can be hit-tested against the same
//! rectangles the renderer drew.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: Split pane, minimal terminal
    Compact,
    /// 60-99 cols: Half-screen
    Normal,
    /// 100-139 cols: Full terminal
    Wide,
    /// 140+ cols: Ultrawide monitor
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            100..=139 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
            Breakpoint::UltraWide => 3,
        }
    }
}

/// Width of each navigation button, in columns
pub const BUTTON_WIDTH: u16 = 10;

/// Every region the renderer draws and the mouse can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub title: Rect,
    pub strip: Rect,
    pub prev_button: Rect,
    pub counter: Rect,
    pub next_button: Rect,
    /// Clickable track, without decorations
    pub progress: Rect,
    pub hint: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    /// Split the screen top to bottom:
    /// title, strip, nav bar, progress, hint (while shown), status
    pub fn compute(area: Rect, show_hint: bool) -> Self {
        let hint_height = if show_hint { 1 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(hint_height),
                Constraint::Length(1),
            ])
            .split(area);

        let nav = rows[2];
        let nav_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Min(1),
                Constraint::Length(BUTTON_WIDTH),
            ])
            .split(centered(nav, nav.width.min(48)));

        // Track leaves one column on each side
        let progress = rows[3];
        let progress = Rect {
            x: progress.x + 1,
            width: progress.width.saturating_sub(2),
            ..progress
        };

        Self {
            title: rows[0],
            strip: rows[1],
            prev_button: nav_cols[0],
            counter: nav_cols[1],
            next_button: nav_cols[2],
            progress,
            hint: rows[4],
            status: rows[5],
        }
    }
}

/// Horizontally centered slice of `area`
pub fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Whether a terminal cell falls inside `rect`
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.width > 0
        && rect.height > 0
        && column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
