//! Tunables for the effect.
//!
//! The layer list is fixed (see [`crate::layer::LAYER_NAMES`]); only paths,
//! scroll spans and timings can be overridden.

use crate::error::RevealError;
use serde::Deserialize;

/// Runtime configuration. Every field falls back to its default when absent
/// from the JSON, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// URL (relative to the page) of the layered SVG.
    pub svg_path: String,
    /// Scroll span of one layer, in `vh`.
    pub scroll_height_per_layer: u32,
    /// Extra scroll span after the last layer, in `vh`.
    pub tail_margin: u32,
    /// Duration of the opacity transition, in seconds.
    pub fade_seconds: f64,
    /// Delay before the second scroll-to-top after initialization.
    pub reset_delay_ms: i32,
    /// Number of leading scroll events that get a debug log line.
    pub scroll_log_limit: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            svg_path: "main.svg".to_string(),
            scroll_height_per_layer: 100,
            tail_margin: 100,
            fade_seconds: 0.3,
            reset_delay_ms: 100,
            scroll_log_limit: 5,
        }
    }
}

impl RevealConfig {
    /// Parse a config from JSON, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, RevealError> {
        serde_json::from_str(json).map_err(|e| RevealError::Config(e.to_string()))
    }

    /// CSS `transition` value applied to every layer.
    pub fn transition_css(&self) -> String {
        format!("opacity {}s ease", self.fade_seconds)
    }
}
