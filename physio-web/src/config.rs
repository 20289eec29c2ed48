//! Runtime engine configuration
//!
//! Exercise tables are compiled in (see [`crate::model::profile`]); this is
//! the small per-session knob set the caller may override.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Default minimum landmark confidence for an angle to be computed
pub const DEFAULT_CONFIDENCE_FLOOR: f32 = 0.5;

/// Default moving-average window (frames)
pub const DEFAULT_SMOOTHING_WINDOW: usize = 10;

/// Largest accepted window; every joint preallocates this many samples
pub const MAX_SMOOTHING_WINDOW: usize = 1024;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Landmarks below this confidence are treated as missing
    pub confidence_floor: f32,
    /// Samples kept per joint by the temporal smoother
    pub smoothing_window: usize,
    /// When set, x-coordinates are flipped across this frame width
    /// before analysis (selfie-view cameras)
    pub mirror_width: Option<f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            mirror_width: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(ConfigError::InvalidConfidenceFloor(self.confidence_floor));
        }
        if self.smoothing_window == 0 || self.smoothing_window > MAX_SMOOTHING_WINDOW {
            return Err(ConfigError::InvalidSmoothingWindow(self.smoothing_window));
        }
        if let Some(width) = self.mirror_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(ConfigError::InvalidMirrorWidth(width));
            }
        }
        Ok(())
    }
}
