// Card strip component
//
// Renders the horizontally scrolling row of cards. Cards are positioned from
// the stage's scroll offset and may hang off either edge, so each one is
// drawn into its own buffer and only the columns inside the strip are copied.

use crate::deck::Card;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
    Frame,
};

/// Rows taken by a placeholder, directly under the card's top border
pub const PLACEHOLDER_HEIGHT: u16 = 3;

/// Rows a card drops by at the start of its entrance
const ENTRANCE_DROP: f64 = 2.0;

/// Glitch colors swap every this many milliseconds
const GLITCH_PERIOD_MS: u128 = 90;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    for (index, card) in app.deck.cards.iter().enumerate() {
        let (left, width) = app.card_columns(index);
        let right = left + i32::from(width);
        if right <= 0 || left >= i32::from(area.width) || width < 4 {
            continue;
        }

        let entrance = app.stage.entrance(index);
        let active = app.stage.cards().get(index).is_some_and(|view| view.active);
        let placeholder = app
            .stage
            .placeholders_of(index)
            .next()
            .map(|p| app.stage.is_glitching(p));

        let mut scratch = Buffer::empty(Rect::new(0, 0, width, area.height));
        let glitch_phase = glitch_phase(app);
        render_card(
            &mut scratch,
            card,
            &CardLook {
                theme: &app.theme,
                active,
                entrance,
                placeholder,
                glitch_phase,
            },
        );

        let drop = ((1.0 - entrance) * ENTRANCE_DROP).round() as u16;
        blit(f.buffer_mut(), area, &scratch, left, drop);
    }
}

fn glitch_phase(app: &App) -> bool {
    let elapsed = app.stage.now().saturating_duration_since(app.started).as_millis();
    (elapsed / GLITCH_PERIOD_MS) % 2 == 0
}

struct CardLook<'a> {
    theme: &'a Theme,
    active: bool,
    /// 0.0 not yet entered, 1.0 fully shown
    entrance: f64,
    /// Set when the card has a placeholder: whether it is glitching
    placeholder: Option<bool>,
    glitch_phase: bool,
}

fn render_card(buf: &mut Buffer, card: &Card, look: &CardLook<'_>) {
    let theme = look.theme;
    let area = buf.area;
    let opacity = look.entrance as f32;

    let border_style = if look.active {
        theme.border_active_style()
    } else {
        theme.border_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if look.active {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(theme.faded(border_style, opacity.max(0.3)))
        .style(theme.base_style());
    let inner = block.inner(area);
    block.render(area, buf);

    // Nothing but the frame until the card has started to enter
    if look.entrance <= 0.0 || inner.height == 0 {
        return;
    }

    let mut text_area = inner;
    if let Some(glitching) = look.placeholder {
        let height = PLACEHOLDER_HEIGHT.min(inner.height);
        let slot = Rect { height, ..inner };
        render_placeholder(buf, slot, card, theme, glitching && look.glitch_phase, glitching);
        text_area.y += height;
        text_area.height -= height;
    }

    let mut lines = Vec::new();
    if let Some(kicker) = &card.kicker {
        lines.push(Line::from(Span::styled(
            kicker.to_uppercase(),
            theme.faded(Style::default().fg(theme.kicker), opacity),
        )));
    }
    lines.push(Line::from(Span::styled(
        card.title.as_str(),
        theme.faded(
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            opacity,
        ),
    )));
    lines.push(Line::default());
    for paragraph in card.body.lines() {
        lines.push(Line::from(Span::styled(
            paragraph.trim(),
            theme.faded(Style::default().fg(theme.fg), opacity),
        )));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(text_area, buf);
}

fn render_placeholder(
    buf: &mut Buffer,
    area: Rect,
    card: &Card,
    theme: &Theme,
    phase: bool,
    glitching: bool,
) {
    let (fill, accent) = match (glitching, phase) {
        (false, _) => (theme.placeholder, theme.muted),
        (true, true) => (theme.glitch_a, theme.glitch_b),
        (true, false) => (theme.glitch_b, theme.glitch_a),
    };
    let pattern = if glitching { "▚▞" } else { "░░" };
    let width = usize::from(area.width);

    let mut lines: Vec<Line> = (0..area.height)
        .map(|row| {
            let shift = if glitching { usize::from(row % 2) } else { 0 };
            let text: String = pattern.chars().cycle().skip(shift).take(width).collect();
            Line::from(Span::styled(text, Style::default().fg(fill)))
        })
        .collect();

    if let Some(label) = &card.placeholder {
        let middle = usize::from(area.height / 2);
        if let Some(line) = lines.get_mut(middle) {
            let label = format!(" {} ", label);
            let label_width = unicode_width::UnicodeWidthStr::width(label.as_str());
            let pad = width.saturating_sub(label_width) / 2;
            let bar: String = pattern.chars().cycle().take(pad).collect();
            *line = Line::from(vec![
                Span::styled(bar.clone(), Style::default().fg(fill)),
                Span::styled(
                    label,
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(bar, Style::default().fg(fill)),
            ]);
        }
    }

    Paragraph::new(lines).render(area, buf);
}

/// Copy the columns of `card` that land inside `area`.
/// `left` is the card's column relative to the strip, `drop` shifts it down.
fn blit(target: &mut Buffer, area: Rect, card: &Buffer, left: i32, drop: u16) {
    for dx in 0..card.area.width {
        let x = left + i32::from(dx);
        if x < 0 || x >= i32::from(area.width) {
            continue;
        }
        let x = area.x + x as u16;
        for dy in 0..card.area.height.saturating_sub(drop) {
            let y = area.y + dy + drop;
            if let (Some(src), Some(dst)) = (card.cell((dx, dy)), target.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}
