// Swipe hint component
//
// Shown until the first scroll or key press, then faded out and removed.

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::Paragraph,
    Frame,
};

const HINT: &str = "← swipe, drag or use the arrow keys →";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.stage.hint_hidden() || area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let style = theme.faded(theme.muted_style(), app.stage.hint_opacity());
    f.render_widget(Paragraph::new(HINT).style(style).alignment(Alignment::Center), area);
}
