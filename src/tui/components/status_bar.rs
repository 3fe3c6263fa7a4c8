// Status bar component
//
// Latest log line on the left; seen cards, settle state and theme on the right.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: log line plus labelled counters
/// - Narrow: counters only
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let bp = Breakpoint::from_width(area.width);

    let settling = if app.carousel.is_settling() { " │ settling" } else { "" };
    let right = if bp.at_least(Breakpoint::Wide) {
        format!(
            "seen {}/{}{} │ {} │ t theme  q quit ",
            app.carousel.seen_count(),
            app.carousel.total(),
            settling,
            app.theme_kind.name()
        )
    } else {
        format!(
            "{}/{}{} │ {} ",
            app.carousel.seen_count(),
            app.carousel.total(),
            settling,
            app.theme_kind.name()
        )
    };

    let right_width = right.width() as u16;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);

    if bp.at_least(Breakpoint::Normal) {
        if let Some(entry) = app.log_buffer.latest() {
            let line = Line::from(vec![
                Span::styled(
                    format!(" {} ", entry.timestamp.format("%H:%M:%S")),
                    theme.muted_style(),
                ),
                Span::styled(
                    format!("{:<5} ", entry.level.as_str()),
                    theme.log_style(entry.level),
                ),
                Span::styled(entry.message, theme.log_style(entry.level)),
            ]);
            f.render_widget(Paragraph::new(line), cols[0]);
        }
    }

    f.render_widget(
        Paragraph::new(right).style(theme.status_style()),
        cols[1],
    );
}
