//! Processing configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum edge, in pixels, for both axes.
pub const DEFAULT_MAX_EDGE: f64 = 1280.0;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Width bound is zero, negative or not a finite number.
    #[error("Invalid width bound: {0} (must be a positive number)")]
    InvalidWidth(f64),

    /// Height bound is zero, negative or not a finite number.
    #[error("Invalid height bound: {0} (must be a positive number)")]
    InvalidHeight(f64),

    /// Quality outside 0-100.
    #[error("Invalid quality: {0} (must be between 0 and 100)")]
    InvalidQuality(u8),
}

/// Options for an [`ImageProcessor`](crate::ImageProcessor).
///
/// `width` and `height` are bounds: a value in `(0, 1]` is a fraction of the
/// natural dimension, a value above 1 is an absolute pixel count.
///
/// Deserializes from camelCase keys (`preserveHeaders`, `autoCompress`) so a
/// plain JS options object maps onto it directly. Missing keys take their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Maximum width (fraction or pixels).
    pub width: f64,
    /// Maximum height (fraction or pixels).
    pub height: f64,
    /// JPEG quality (0-100). Ignored for other output formats.
    pub quality: u8,
    /// Re-insert the source's metadata segments into JPEG output.
    pub preserve_headers: bool,
    /// Resize as soon as the source is decoded.
    pub auto_compress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAX_EDGE,
            height: DEFAULT_MAX_EDGE,
            quality: DEFAULT_QUALITY,
            preserve_headers: true,
            auto_compress: false,
        }
    }
}

impl Config {
    /// Create a config with the given bounds and default options.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_preserve_headers(mut self, preserve: bool) -> Self {
        self.preserve_headers = preserve;
        self
    }

    pub fn with_auto_compress(mut self, auto: bool) -> Self {
        self.auto_compress = auto;
        self
    }

    /// Check every field, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive_bound(self.width) {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if !is_positive_bound(self.height) {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        if self.quality > 100 {
            return Err(ConfigError::InvalidQuality(self.quality));
        }
        Ok(())
    }
}

#[inline]
fn is_positive_bound(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
