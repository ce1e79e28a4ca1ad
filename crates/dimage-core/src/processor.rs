//! Per-image processing session.
//!
//! An [`ImageProcessor`] owns one source image and runs the pipeline:
//!
//! 1. **scan** the leading JPEG segments (JPEG sources only)
//! 2. **decode orientation** from the EXIF APP1 segment
//! 3. **plan** resize and rotation geometry
//! 4. **draw** and **encode** through the [`Rasterizer`]
//! 5. **splice** the captured metadata header back into JPEG output
//!
//! Steps 1 and 2 run once, when the processor is created and before the
//! source is decoded; their result is kept in [`ImageProcessor::meta`].

use crate::config::Config;
use crate::data_url;
use crate::error::ProcessError;
use crate::geometry::{plan_resize, plan_rotation, GeometrySpec};
use crate::jpeg::{extract_meta, inject_header, SourceImageMeta, MAX_METADATA_SIZE};
use crate::raster::{ImageRasterizer, Rasterizer};
use crate::{MediaType, Orientation};

/// Current drawing state.
struct Canvas<S> {
    spec: GeometrySpec,
    /// Set by [`ImageProcessor::resize`]; rotation then works on the resized
    /// size instead of the natural one.
    resized: bool,
    surface: S,
}

/// Decoded source.
struct Source<D> {
    drawable: D,
    natural_width: u32,
    natural_height: u32,
}

/// One image being prepared for upload.
///
/// Operations mutate the drawing state in place and can be chained:
///
/// ```ignore
/// let mut image = ImageProcessor::new(bytes, "image/jpeg", Config::new(1280.0, 1280.0))?;
/// image.resize()?.rotate()?;
/// let jpeg = image.to_bytes()?;
/// ```
pub struct ImageProcessor<R: Rasterizer = ImageRasterizer> {
    rasterizer: R,
    config: Config,
    media_type: MediaType,
    source: Option<Source<R::Drawable>>,
    meta: SourceImageMeta,
    canvas: Option<Canvas<R::Surface>>,
}

impl ImageProcessor<ImageRasterizer> {
    /// Create a processor using the bundled `image`-crate rasterizer.
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        mime: &str,
        config: Config,
    ) -> Result<Self, ProcessError> {
        Self::with_rasterizer(bytes, mime, config, ImageRasterizer::new())
    }
}

impl<R: Rasterizer> ImageProcessor<R> {
    /// Create a processor with a custom rasterizer.
    ///
    /// Config and MIME type are checked before the bytes are decoded. JPEG
    /// metadata is captured from the first [`MAX_METADATA_SIZE`] bytes, also
    /// before decoding; other types get the defaults. Whether a non-JPEG,
    /// non-PNG type can be decoded is up to the rasterizer. When
    /// `config.auto_compress` is set the image is resized right away.
    pub fn with_rasterizer(
        bytes: impl Into<Vec<u8>>,
        mime: &str,
        config: Config,
        rasterizer: R,
    ) -> Result<Self, ProcessError> {
        config.validate()?;
        let media_type = MediaType::from_mime(mime)
            .ok_or_else(|| ProcessError::UnsupportedMimeType(mime.to_string()))?;

        let bytes: Vec<u8> = bytes.into();
        let meta = if media_type.is_jpeg() {
            extract_meta(&bytes[..bytes.len().min(MAX_METADATA_SIZE)])
        } else {
            SourceImageMeta::default()
        };

        let drawable = rasterizer
            .decode(&bytes, &media_type)
            .map_err(ProcessError::Decode)?;
        let (natural_width, natural_height) = rasterizer.dimensions(&drawable);
        if natural_width == 0 || natural_height == 0 {
            return Err(ProcessError::EmptyImage);
        }

        tracing::debug!(
            "Loaded {} source {}x{}",
            media_type.mime(),
            natural_width,
            natural_height
        );

        let mut processor = Self {
            rasterizer,
            config,
            media_type,
            source: Some(Source {
                drawable,
                natural_width,
                natural_height,
            }),
            meta,
            canvas: None,
        };

        if config.auto_compress {
            processor.resize()?;
        }

        Ok(processor)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// Orientation and captured header of the source.
    ///
    /// Non-JPEG sources report the defaults. Survives [`release`](Self::release).
    pub fn meta(&self) -> &SourceImageMeta {
        &self.meta
    }

    pub fn orientation(&self) -> Orientation {
        self.meta().orientation
    }

    /// Natural `(width, height)` of the decoded source.
    pub fn natural_dimensions(&self) -> Option<(u32, u32)> {
        self.source
            .as_ref()
            .map(|s| (s.natural_width, s.natural_height))
    }

    /// Current canvas `(width, height)`, if anything has been drawn.
    pub fn canvas_dimensions(&self) -> Option<(u32, u32)> {
        self.canvas
            .as_ref()
            .map(|c| (c.spec.target_width, c.spec.target_height))
    }

    /// Geometry of the current canvas, if anything has been drawn.
    pub fn geometry(&self) -> Option<&GeometrySpec> {
        self.canvas.as_ref().map(|c| &c.spec)
    }

    /// Scale the source to fit the configured bounds. Never enlarges.
    ///
    /// Any earlier rotation is discarded; call [`rotate`](Self::rotate)
    /// afterwards to reapply it on the resized canvas.
    pub fn resize(&mut self) -> Result<&mut Self, ProcessError> {
        let source = self.source.as_ref().ok_or(ProcessError::Released)?;

        let plan = plan_resize(
            source.natural_width,
            source.natural_height,
            self.config.width,
            self.config.height,
        );
        let spec = GeometrySpec::from_resize(&plan);
        tracing::debug!(
            "Resizing {}x{} to {}x{} (scale {:.4})",
            source.natural_width,
            source.natural_height,
            spec.target_width,
            spec.target_height,
            spec.scale
        );

        let surface = self
            .rasterizer
            .draw(&source.drawable, &spec)
            .map_err(ProcessError::Draw)?;
        self.canvas = Some(Canvas {
            spec,
            resized: true,
            surface,
        });
        Ok(self)
    }

    /// Rotate according to the EXIF orientation.
    ///
    /// Rotates around the resized size when [`resize`](Self::resize) ran
    /// first, otherwise around the natural size. A no-op for orientation 1
    /// and for the mirrored orientations. Rotating twice yields the same
    /// canvas as rotating once.
    pub fn rotate(&mut self) -> Result<&mut Self, ProcessError> {
        let orientation = self.orientation();
        let source = self.source.as_ref().ok_or(ProcessError::Released)?;

        let base = match &self.canvas {
            Some(canvas) if canvas.resized => GeometrySpec {
                scale: canvas.spec.scale,
                ..GeometrySpec::identity(canvas.spec.draw_width, canvas.spec.draw_height)
            },
            _ => GeometrySpec::identity(source.natural_width, source.natural_height),
        };

        let plan = plan_rotation(orientation, base.draw_width, base.draw_height);
        if plan.is_noop() {
            tracing::trace!("Orientation {:?} needs no rotation", orientation);
            return Ok(self);
        }

        let spec = base.with_rotation(&plan);
        tracing::debug!(
            "Rotating for orientation {} by {} rad onto {}x{}",
            orientation.value(),
            spec.rotation_radians(),
            spec.target_width,
            spec.target_height
        );

        let surface = self
            .rasterizer
            .draw(&source.drawable, &spec)
            .map_err(ProcessError::Draw)?;
        let resized = self.canvas.as_ref().is_some_and(|c| c.resized);
        self.canvas = Some(Canvas {
            spec,
            resized,
            surface,
        });
        Ok(self)
    }

    /// Encode the current canvas.
    ///
    /// When nothing was drawn yet the source is encoded at its natural size.
    /// For JPEG output with `preserve_headers` set, the source's captured
    /// metadata segments replace the encoder's own header.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProcessError> {
        let source = self.source.as_ref().ok_or(ProcessError::Released)?;

        let drawn;
        let surface = match &self.canvas {
            Some(canvas) => &canvas.surface,
            None => {
                let spec = GeometrySpec::identity(source.natural_width, source.natural_height);
                drawn = self
                    .rasterizer
                    .draw(&source.drawable, &spec)
                    .map_err(ProcessError::Draw)?;
                &drawn
            }
        };

        let encoded = self
            .rasterizer
            .encode(surface, &self.media_type, self.config.quality)
            .map_err(ProcessError::Encode)?;

        if !self.config.preserve_headers || !self.media_type.is_jpeg() {
            return Ok(encoded);
        }

        match self.meta.image_head.as_deref() {
            Some(head) if !head.is_empty() => Ok(inject_header(&encoded, head)),
            _ => Ok(encoded),
        }
    }

    /// Encode the current canvas as a base64 `data:` URL.
    ///
    /// Carries exactly the bytes [`to_bytes`](Self::to_bytes) returns.
    pub fn to_data_url(&self) -> Result<String, ProcessError> {
        let bytes = self.to_bytes()?;
        Ok(data_url::encode(self.media_type.mime(), &bytes))
    }

    /// Drop the decoded source and canvas.
    ///
    /// Later drawing or encoding calls fail with [`ProcessError::Released`].
    /// The captured metadata stays readable.
    pub fn release(&mut self) {
        self.canvas = None;
        self.source = None;
    }

    pub fn is_released(&self) -> bool {
        self.source.is_none()
    }
}
