// Theme system for the TUI
//
// Provides color themes that can be switched at runtime with 't'.
// Each theme defines colors for all UI elements.

use crate::carousel::sync::DIMMED_OPACITY;
use crate::logging::LogLevel;
use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Synthwave,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Synthwave]
    }

    /// Look up a theme by config name, case and separator insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase().replace([' ', '-', '_'], "");
        match name.as_str() {
            "dark" => Some(ThemeKind::Dark),
            "light" => Some(ThemeKind::Light),
            "synthwave" | "synthwave84" => Some(ThemeKind::Synthwave),
            _ => None,
        }
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Synthwave => "Synthwave",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Synthwave => Theme::synthwave(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_active: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Cards
    pub kicker: Color,
    pub accent: Color,
    pub placeholder: Color,
    pub glitch_a: Color,
    pub glitch_b: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_active: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,

            kicker: Color::Yellow,
            accent: Color::Cyan,
            placeholder: Color::Gray,
            glitch_a: Color::Red,
            glitch_b: Color::Cyan,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_active: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            kicker: Color::Rgb(184, 134, 11), // Dark goldenrod
            accent: Color::Blue,
            placeholder: Color::DarkGray,
            glitch_a: Color::Red,
            glitch_b: Color::Blue,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    /// Synthwave '84
    pub fn synthwave() -> Self {
        Self {
            bg: Color::Rgb(38, 35, 53),
            fg: Color::Rgb(255, 255, 255),
            muted: Color::Rgb(132, 139, 189),
            border: Color::Rgb(73, 84, 149),
            border_active: Color::Rgb(255, 126, 219), // Pink

            title: Color::Rgb(54, 249, 246),       // Cyan
            status_bar: Color::Rgb(114, 241, 184), // Green

            kicker: Color::Rgb(254, 222, 93), // Yellow
            accent: Color::Rgb(255, 126, 219),
            placeholder: Color::Rgb(132, 139, 189),
            glitch_a: Color::Rgb(254, 68, 80),
            glitch_b: Color::Rgb(54, 249, 246),

            log_error: Color::Rgb(254, 68, 80),
            log_warn: Color::Rgb(254, 222, 93),
            log_info: Color::Rgb(54, 249, 246),
            log_debug: Color::Rgb(132, 139, 189),
            log_trace: Color::Rgb(73, 84, 149),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_active_style(&self) -> Style {
        Style::default()
            .fg(self.border_active)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_bar)
    }

    /// Terminal cells have no alpha; step opacity down through color and DIM
    pub fn faded(&self, style: Style, opacity: f32) -> Style {
        if opacity >= 1.0 {
            style
        } else if opacity > DIMMED_OPACITY {
            style.fg(self.muted)
        } else {
            style.fg(self.muted).add_modifier(Modifier::DIM)
        }
    }

    pub fn log_style(&self, level: LogLevel) -> Style {
        let color = match level {
            LogLevel::Error => self.log_error,
            LogLevel::Warn => self.log_warn,
            LogLevel::Info => self.log_info,
            LogLevel::Debug => self.log_debug,
            LogLevel::Trace => self.log_trace,
        };
        Style::default().fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve() {
        assert_eq!(ThemeKind::from_name("Dark"), Some(ThemeKind::Dark));
        assert_eq!(ThemeKind::from_name("synth-wave"), Some(ThemeKind::Synthwave));
        assert_eq!(ThemeKind::from_name("dracula"), None);
    }

    #[test]
    fn cycle_wraps() {
        let mut kind = ThemeKind::Dark;
        for _ in 0..ThemeKind::all().len() {
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
    }

    #[test]
    fn dimmed_buttons_get_dim_modifier() {
        let theme = Theme::dark();
        let dimmed = theme.faded(Style::default(), DIMMED_OPACITY);
        assert!(dimmed.add_modifier.contains(Modifier::DIM));
        assert_eq!(theme.faded(Style::default(), 1.0), Style::default());
    }
}
