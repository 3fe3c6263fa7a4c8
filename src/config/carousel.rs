//! Carousel configuration
//!
//! Navigation tunables plus the terminal geometry of the card strip.

use serde::Deserialize;

/// Carousel tunables
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Quiet period after the last scroll event before settling (ms)
    pub settle_delay_ms: u64,
    /// Horizontal travel a swipe must exceed (device-independent px)
    pub swipe_threshold_px: f64,
    /// Visible fraction that marks a card as seen (0.0..=1.0)
    pub visibility_threshold: f64,
    /// Clamp clicks at the far right of the progress bar to the last card
    pub clamp_progress_click: bool,
    /// Card width in terminal columns
    pub card_width: u16,
    /// Gap between cards in terminal columns
    pub card_gap: u16,
    /// Device-independent pixels per terminal column
    pub px_per_column: f64,
    /// Entrance delay step between consecutive cards (ms)
    pub stagger_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 50,
            swipe_threshold_px: 50.0,
            visibility_threshold: 0.5,
            clamp_progress_click: false,
            card_width: 44,
            card_gap: 2,
            px_per_column: 8.0,
            stagger_ms: 100,
        }
    }
}

/// Carousel settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCarousel {
    pub settle_delay_ms: Option<u64>,
    pub swipe_threshold_px: Option<f64>,
    pub visibility_threshold: Option<f64>,
    pub clamp_progress_click: Option<bool>,
    pub card_width: Option<u16>,
    pub card_gap: Option<u16>,
    pub px_per_column: Option<f64>,
    pub stagger_ms: Option<u64>,
}

/// Narrowest card that still fits a title and a few words of body
const MIN_CARD_WIDTH: u16 = 16;

impl CarouselConfig {
    /// Create from file config with defaults, clamping values that would
    /// break layout or geometry
    pub fn from_file(file: Option<FileCarousel>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            settle_delay_ms: file.settle_delay_ms.unwrap_or(defaults.settle_delay_ms),
            swipe_threshold_px: file
                .swipe_threshold_px
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.swipe_threshold_px),
            visibility_threshold: file
                .visibility_threshold
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(defaults.visibility_threshold),
            clamp_progress_click: file
                .clamp_progress_click
                .unwrap_or(defaults.clamp_progress_click),
            card_width: file
                .card_width
                .map(|w| w.max(MIN_CARD_WIDTH))
                .unwrap_or(defaults.card_width),
            card_gap: file.card_gap.unwrap_or(defaults.card_gap),
            px_per_column: file
                .px_per_column
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.px_per_column),
            stagger_ms: file.stagger_ms.unwrap_or(defaults.stagger_ms),
        }
    }
}
