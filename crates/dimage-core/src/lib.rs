//! DImage Core - upload preprocessing for JPEG images
//!
//! This crate bounds an image's dimensions, turns it upright according to its
//! EXIF orientation, and re-encodes it while optionally keeping the original
//! metadata segments.
//!
//! # Module Structure
//!
//! - `jpeg` - Leading segment scanner, EXIF orientation reader, header splicer
//! - `geometry` - Resize and rotation planning
//! - `raster` - Pixel backend trait and the `image`-crate implementation
//! - `processor` - Per-image session wiring the pipeline together
//! - `config` - Processing options
//! - `data_url` - `data:` URL conversion
//!
//! # Examples
//!
//! ```ignore
//! use dimage_core::{Config, ImageProcessor};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let mut image = ImageProcessor::new(bytes, "image/jpeg", Config::new(1280.0, 1280.0))?;
//! image.resize()?.rotate()?;
//! std::fs::write("upload.jpg", image.to_bytes()?)?;
//! ```

pub mod config;
pub mod data_url;
pub mod error;
pub mod geometry;
pub mod jpeg;
pub mod media;
pub mod orientation;
pub mod processor;
pub mod raster;

pub use config::{Config, ConfigError};
pub use error::ProcessError;
pub use geometry::{plan_resize, plan_rotation, GeometrySpec, ResizePlan, Rotation, RotationPlan};
pub use jpeg::{extract_meta, inject_header, read_orientation, scan, SourceImageMeta};
pub use media::MediaType;
pub use orientation::Orientation;
pub use processor::ImageProcessor;
pub use raster::{FilterType, ImageRasterizer, RasterError, Rasterizer};
