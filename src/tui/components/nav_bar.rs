// Navigation bar component
//
// Previous and next buttons around the card counter. A button with nowhere
// left to go is drawn dimmed, the same way the stage reports its opacity.

use crate::tui::app::App;
use ratatui::{
    layout::Alignment,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let layout = &app.layout;
    let theme = &app.theme;
    let stage = &app.stage;

    let button = |label: &'static str, opacity: f32| {
        let style = theme.faded(
            theme.border_active_style().add_modifier(Modifier::REVERSED),
            opacity,
        );
        Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center)
    };

    f.render_widget(button(" ◀ prev ", stage.prev_opacity()), layout.prev_button);
    f.render_widget(button(" next ▶ ", stage.next_opacity()), layout.next_button);

    let counter = Line::from(vec![
        Span::styled(stage.counter().to_string(), theme.title_style()),
        Span::styled(format!(" / {}", app.carousel.total()), theme.muted_style()),
    ]);
    f.render_widget(
        Paragraph::new(counter).alignment(Alignment::Center),
        layout.counter,
    );
}
