//! Errors surfaced by the processing pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::raster::RasterError;

/// Failures reported to callers of [`ImageProcessor`](crate::ImageProcessor).
///
/// Malformed metadata is not an error: it degrades to orientation 1 and no
/// captured header. What remains falls into two groups:
/// - input errors, raised before any decoding is attempted
///   ([`is_input_error`](Self::is_input_error));
/// - resource errors from the rasterizer, after which no output is produced.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// No MIME type was declared for the source.
    #[error("Unsupported MIME type: {0}")]
    UnsupportedMimeType(String),

    /// The rasterizer could not decode the source bytes.
    #[error("Failed to decode source image: {0}")]
    Decode(#[source] RasterError),

    /// Decoding produced an image with no pixels.
    #[error("Source image has zero width or height")]
    EmptyImage,

    /// The rasterizer could not draw the planned geometry.
    #[error("Failed to draw image: {0}")]
    Draw(#[source] RasterError),

    /// The rasterizer could not encode the output.
    #[error("Failed to encode image: {0}")]
    Encode(#[source] RasterError),

    /// The processor's resources were already released.
    #[error("Image resources have been released")]
    Released,
}

impl ProcessError {
    /// True for errors caused by the caller's arguments.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ProcessError::InvalidConfig(_) | ProcessError::UnsupportedMimeType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_display() {
        let err = ProcessError::UnsupportedMimeType(String::new());
        assert_eq!(err.to_string(), "Unsupported MIME type: ");

        let err = ProcessError::from(ConfigError::InvalidWidth(0.0));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Invalid width bound: 0 (must be a positive number)"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(ProcessError::UnsupportedMimeType(String::new()).is_input_error());
        assert!(ProcessError::from(ConfigError::InvalidQuality(101)).is_input_error());
        assert!(!ProcessError::EmptyImage.is_input_error());
        assert!(!ProcessError::Encode(RasterError::InvalidFormat).is_input_error());
        assert!(
            !ProcessError::Decode(RasterError::UnsupportedMediaType("image/gif".to_string()))
                .is_input_error()
        );
        assert!(!ProcessError::Released.is_input_error());
    }
}
