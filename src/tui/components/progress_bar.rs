// Progress bar component
//
// A clickable track whose fill is the stage's progress percentage.

use crate::tui::app::App;
use ratatui::{layout::Rect, style::Style, widgets::Gauge, Frame};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let percent = app.stage.progress_percent().clamp(0.0, 100.0);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent).bg(theme.bg))
        .ratio(percent / 100.0)
        .label("");

    f.render_widget(gauge, area);
}
