//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let deck = match &self.deck {
            Some(path) => format!("deck = {:?}", path.display().to_string()),
            None => "# deck = \"~/decks/my-deck.toml\"".to_string(),
        };

        format!(
            r#"# cardreel configuration

# Theme: dark, light, synthwave (press 't' in the viewer to cycle)
theme = "{theme}"

# Deck file to show instead of the bundled deck
{deck}

# ─────────────────────────────────────────────────────────────────────────────
# CAROUSEL
# ─────────────────────────────────────────────────────────────────────────────
# Distances are in device-independent pixels; the terminal converts columns
# with px_per_column.
[carousel]
settle_delay_ms = {settle_delay_ms}
swipe_threshold_px = {swipe_threshold_px:?}
visibility_threshold = {visibility_threshold:?}
# Clicking the far right edge of the progress bar normally does nothing;
# set to true to land on the last card instead
clamp_progress_click = {clamp_progress_click}
card_width = {card_width}
card_gap = {card_gap}
px_per_column = {px_per_column:?}
stagger_ms = {stagger_ms}

# ─────────────────────────────────────────────────────────────────────────────
# MOTION
# ─────────────────────────────────────────────────────────────────────────────
# CARDREEL_REDUCED_MOTION=1 also turns reduced motion on
[motion]
reduced_motion = {reduced_motion}
transition_fast_ms = {transition_fast_ms}
transition_medium_ms = {transition_medium_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to the in-app buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            theme = self.theme,
            deck = deck,
            settle_delay_ms = self.carousel.settle_delay_ms,
            swipe_threshold_px = self.carousel.swipe_threshold_px,
            visibility_threshold = self.carousel.visibility_threshold,
            clamp_progress_click = self.carousel.clamp_progress_click,
            card_width = self.carousel.card_width,
            card_gap = self.carousel.card_gap,
            px_per_column = self.carousel.px_per_column,
            stagger_ms = self.carousel.stagger_ms,
            reduced_motion = self.motion.reduced_motion,
            transition_fast_ms = self.motion.transition_fast_ms,
            transition_medium_ms = self.motion.transition_medium_ms,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
