//! Pixel backend abstraction.
//!
//! The pipeline never touches pixels itself. It hands a [`GeometrySpec`] to a
//! [`Rasterizer`] and consumes the encoded bytes that come back. This keeps
//! scanning, orientation and planning testable without a real backend.
//!
//! [`ImageRasterizer`] is the bundled implementation on top of the `image`
//! crate.

mod image_backend;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::GeometrySpec;
use crate::MediaType;

pub use image_backend::ImageRasterizer;

/// Errors reported by a rasterizer backend.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The bytes are not in a format the backend can decode.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// A draw or encode was requested with a zero-sized canvas.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The spec's canvas size does not follow from its draw size and rotation.
    #[error(
        "Inconsistent geometry: drawing {draw_width}x{draw_height} cannot fill a {target_width}x{target_height} canvas"
    )]
    InconsistentGeometry {
        draw_width: u32,
        draw_height: u32,
        target_width: u32,
        target_height: u32,
    },

    /// The backend has no codec for the declared media type.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Encoding failed inside the backend.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Decode/draw/encode capability consumed by the processor.
pub trait Rasterizer {
    /// Decoded source image.
    type Drawable;
    /// Result of a draw call, ready for encoding.
    type Surface;

    /// Decode source bytes of the declared type.
    ///
    /// Types the backend has no codec for fail with
    /// [`RasterError::UnsupportedMediaType`].
    fn decode(&self, bytes: &[u8], media_type: &MediaType) -> Result<Self::Drawable, RasterError>;

    /// Natural `(width, height)` of a decoded source.
    fn dimensions(&self, drawable: &Self::Drawable) -> (u32, u32);

    /// Render `drawable` onto a new surface according to `spec`.
    fn draw(
        &self,
        drawable: &Self::Drawable,
        spec: &GeometrySpec,
    ) -> Result<Self::Surface, RasterError>;

    /// Encode a surface. `quality` (0-100) only applies to JPEG.
    fn encode(
        &self,
        surface: &Self::Surface,
        media_type: &MediaType,
        quality: u8,
    ) -> Result<Vec<u8>, RasterError>;
}

/// Filter type for scaling the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}
