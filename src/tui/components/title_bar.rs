// Title bar component
//
// Renders the deck title, with the tagline and attribution when there is room.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let deck = &app.deck;
    let theme = &app.theme;
    let bp = Breakpoint::from_width(area.width);

    let mut spans = vec![Span::styled(format!(" {}", deck.title), theme.title_style())];
    if bp.at_least(Breakpoint::Normal) {
        if let Some(tagline) = &deck.tagline {
            spans.push(Span::styled(
                format!("  {}", tagline),
                theme.muted_style(),
            ));
        }
    }
    if bp.at_least(Breakpoint::Wide) {
        if let Some(by) = &deck.attribution {
            spans.push(Span::styled(format!(" ({})", by), theme.muted_style()));
        }
    }

    let title = Paragraph::new(Line::from(spans))
        .style(theme.base_style())
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme.border_style()),
        );

    f.render_widget(title, area);
}
