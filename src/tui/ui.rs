// UI rendering logic
//
// Draws one frame from the app's current layout. Layout itself is computed
// by App::relayout before each draw, so the regions drawn here are the same
// ones mouse events are tested against.

use super::app::App;
use super::components::{card_strip, nav_bar, progress_bar, status_bar, swipe_hint, title_bar};
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Paragraph},
    Frame,
};

/// Below this the cards cannot be drawn legibly
const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 12;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    f.render_widget(Block::default().style(app.theme.base_style()), area);

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(f, area, app);
        return;
    }

    let layout = &app.layout;
    title_bar::render(f, layout.title, app);
    card_strip::render(f, layout.strip, app);
    nav_bar::render(f, app);
    progress_bar::render(f, layout.progress, app);
    swipe_hint::render(f, layout.hint, app);
    status_bar::render(f, layout.status, app);
}

fn render_too_small(f: &mut Frame, area: Rect, app: &App) {
    let message = format!(
        "Terminal too small ({}x{}), need {}x{}",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let y = area.y + area.height / 2;
    f.render_widget(
        Paragraph::new(message)
            .style(app.theme.muted_style())
            .alignment(Alignment::Center),
        Rect {
            y,
            height: 1.min(area.height),
            ..area
        },
    );
}
