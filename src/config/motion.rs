//! Motion configuration
//!
//! Transition timing for smooth scroll, card entrance and hover effects.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Zero every transition (instant scroll, no fades)
    pub reduced_motion: bool,
    /// Short transitions: hover, glitch (ms)
    pub transition_fast_ms: u64,
    /// Medium transitions: smooth scroll, card entrance (ms)
    pub transition_medium_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            transition_fast_ms: 200,
            transition_medium_ms: 400,
        }
    }
}

/// Motion settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileMotion {
    pub reduced_motion: Option<bool>,
    pub transition_fast_ms: Option<u64>,
    pub transition_medium_ms: Option<u64>,
}

impl MotionConfig {
    pub fn from_file(file: Option<FileMotion>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            reduced_motion: file.reduced_motion.unwrap_or(defaults.reduced_motion),
            transition_fast_ms: file
                .transition_fast_ms
                .unwrap_or(defaults.transition_fast_ms),
            transition_medium_ms: file
                .transition_medium_ms
                .unwrap_or(defaults.transition_medium_ms),
        }
    }
}
