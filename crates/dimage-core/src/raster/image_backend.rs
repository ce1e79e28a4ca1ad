//! [`Rasterizer`] backed by the `image` crate.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};

use super::{FilterType, RasterError, Rasterizer};
use crate::geometry::{GeometrySpec, Rotation};
use crate::MediaType;

/// Decodes with `image::ImageReader`, scales with the configured filter and
/// rotates in quarter turns.
///
/// Quarter turns on the pixel grid are exactly the canvas transforms in a
/// [`GeometrySpec`] (rotate by `rotation`, draw at the planned offset), so the
/// offsets need no separate handling here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRasterizer {
    filter: FilterType,
}

impl ImageRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl Rasterizer for ImageRasterizer {
    type Drawable = DynamicImage;
    type Surface = DynamicImage;

    fn decode(&self, bytes: &[u8], media_type: &MediaType) -> Result<DynamicImage, RasterError> {
        let format = media_type
            .to_image_format()
            .ok_or_else(|| RasterError::UnsupportedMediaType(media_type.mime().to_string()))?;
        if bytes.is_empty() {
            return Err(RasterError::InvalidFormat);
        }

        let mut reader = ImageReader::new(Cursor::new(bytes));
        reader.set_format(format);

        reader
            .decode()
            .map_err(|e| RasterError::CorruptedFile(e.to_string()))
    }

    fn dimensions(&self, drawable: &DynamicImage) -> (u32, u32) {
        (drawable.width(), drawable.height())
    }

    fn draw(
        &self,
        drawable: &DynamicImage,
        spec: &GeometrySpec,
    ) -> Result<DynamicImage, RasterError> {
        if spec.draw_width == 0 || spec.draw_height == 0 {
            return Err(RasterError::InvalidDimensions {
                width: spec.draw_width,
                height: spec.draw_height,
            });
        }

        let turned = if spec.rotation.swaps_dimensions() {
            (spec.draw_height, spec.draw_width)
        } else {
            (spec.draw_width, spec.draw_height)
        };
        if turned != (spec.target_width, spec.target_height) {
            return Err(RasterError::InconsistentGeometry {
                draw_width: spec.draw_width,
                draw_height: spec.draw_height,
                target_width: spec.target_width,
                target_height: spec.target_height,
            });
        }

        // Fast path: if dimensions match, just clone
        let scaled = if (drawable.width(), drawable.height()) == (spec.draw_width, spec.draw_height)
        {
            drawable.clone()
        } else {
            drawable.resize_exact(
                spec.draw_width,
                spec.draw_height,
                self.filter.to_image_filter(),
            )
        };

        let surface = match spec.rotation {
            Rotation::None => scaled,
            Rotation::Clockwise90 => scaled.rotate90(),
            Rotation::CounterClockwise90 => scaled.rotate270(),
            Rotation::Half => scaled.rotate180(),
        };

        Ok(surface)
    }

    fn encode(
        &self,
        surface: &DynamicImage,
        media_type: &MediaType,
        quality: u8,
    ) -> Result<Vec<u8>, RasterError> {
        let (width, height) = (surface.width(), surface.height());
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }

        let mut buffer = Cursor::new(Vec::new());

        match media_type {
            MediaType::Jpeg => {
                // JPEG has no alpha channel; the encoder rejects quality 0.
                let rgb = surface.to_rgb8();
                let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
                encoder
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| RasterError::EncodingFailed(e.to_string()))?;
            }
            MediaType::Png => {
                let rgba = surface.to_rgba8();
                let encoder = PngEncoder::new(&mut buffer);
                encoder
                    .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
                    .map_err(|e| RasterError::EncodingFailed(e.to_string()))?;
            }
            MediaType::Other(mime) => {
                return Err(RasterError::UnsupportedMediaType(mime.clone()));
            }
        }

        Ok(buffer.into_inner())
    }
}
