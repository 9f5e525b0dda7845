//! Resizer tuning.

use serde::{Deserialize, Serialize};

/// Smallest width, in CSS pixels, an image can be dragged to
pub const DEFAULT_MIN_WIDTH: f64 = 128.0;

/// Height of the band above an image's bottom edge that turns a side drag
/// into a corner drag
pub const DEFAULT_CORNER_ZONE_PX: f64 = 18.0;

/// Resizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizerSettings {
    /// Lower bound of the on-screen image width
    pub min_width: f64,
    /// Corner-drag activation band, measured up from the image bottom
    pub corner_zone_px: f64,
}

impl Default for ResizerSettings {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            corner_zone_px: DEFAULT_CORNER_ZONE_PX,
        }
    }
}
