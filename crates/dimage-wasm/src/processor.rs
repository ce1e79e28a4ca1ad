//! `JsImageProcessor` - the per-image session exposed to JavaScript.
//!
//! Wraps [`dimage_core::ImageProcessor`] with the bundled `image`-crate
//! rasterizer. Options are passed as a plain object and deserialized with
//! `serde-wasm-bindgen`; missing fields take their defaults.
//!
//! # Example
//!
//! ```typescript
//! const image = new JsImageProcessor(bytes, 'image/jpeg', {
//!   width: 0.5,
//!   height: 0.5,
//!   quality: 85,
//!   preserveHeaders: true,
//! });
//! image.resize();
//! image.rotate();
//! console.log(`${image.width}x${image.height}, orientation ${image.orientation}`);
//! const url = image.to_data_url();
//! image.release();
//! ```

use dimage_core::{Config, ImageProcessor, ProcessError};
use wasm_bindgen::prelude::*;

/// An image being prepared for upload.
///
/// # Memory Management
///
/// The decoded source and the current canvas live in WASM memory. Call
/// `release()` once the output has been taken to drop them early; the
/// wasm-bindgen finalizer frees the rest.
#[wasm_bindgen]
pub struct JsImageProcessor {
    inner: ImageProcessor,
}

#[wasm_bindgen]
impl JsImageProcessor {
    /// Decode `bytes` of the given MIME type.
    ///
    /// # Arguments
    /// * `bytes` - Encoded source image
    /// * `mime_type` - Declared type; only `image/jpeg`/`image/jpg` sources
    ///   get metadata handling, and the bundled backend decodes JPEG and PNG
    /// * `config` - Options object, or `undefined` for the defaults
    ///   (1280x1280 bound, quality 90, headers preserved)
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8], mime_type: &str, config: JsValue) -> Result<JsImageProcessor, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            Config::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Self::with_config(bytes, mime_type, config).map_err(to_js_error)
    }

    /// Scale the image to fit the configured bounds.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        self.inner.resize().map(|_| ()).map_err(to_js_error)
    }

    /// Turn the image upright according to its EXIF orientation.
    pub fn rotate(&mut self) -> Result<(), JsValue> {
        self.inner.rotate().map(|_| ()).map_err(to_js_error)
    }

    /// Encoded output as a `Uint8Array`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.to_bytes().map_err(to_js_error)
    }

    /// Encoded output as a base64 `data:` URL.
    pub fn to_data_url(&self) -> Result<String, JsValue> {
        self.inner.to_data_url().map_err(to_js_error)
    }

    /// Canvas width, or the natural width when nothing was drawn yet.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    /// Canvas height, or the natural height when nothing was drawn yet.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    /// EXIF orientation of the source (1-8).
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u16 {
        self.inner.orientation().value()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.media_type().mime().to_string()
    }

    /// Whether output will carry the source's metadata segments.
    #[wasm_bindgen(getter)]
    pub fn has_image_head(&self) -> bool {
        self.inner.config().preserve_headers && self.inner.meta().has_head()
    }

    /// Drop the decoded source and canvas.
    pub fn release(&mut self) {
        self.inner.release();
    }
}

impl JsImageProcessor {
    pub(crate) fn with_config(
        bytes: &[u8],
        mime_type: &str,
        config: Config,
    ) -> Result<Self, ProcessError> {
        ImageProcessor::new(bytes, mime_type, config).map(|inner| Self { inner })
    }

    fn dimensions(&self) -> (u32, u32) {
        self.inner
            .canvas_dimensions()
            .or_else(|| self.inner.natural_dimensions())
            .unwrap_or_default()
    }
}

fn to_js_error(error: ProcessError) -> JsValue {
    let message = error.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&format!("dimage: {}", message)));
    JsValue::from_str(&message)
}


/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn options(width: f64, height: f64) -> JsValue {
        let object = js_sys::Object::new();
        js_sys::Reflect::set(&object, &"width".into(), &width.into()).unwrap();
        js_sys::Reflect::set(&object, &"height".into(), &height.into()).unwrap();
        object.into()
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        use dimage_core::{ImageRasterizer, MediaType, Rasterizer};
        use image::{DynamicImage, RgbImage};
        ImageRasterizer::new()
            .encode(
                &DynamicImage::ImageRgb8(RgbImage::new(width, height)),
                &MediaType::Png,
                90,
            )
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_constructor_with_options() {
        let mut image = JsImageProcessor::new(&png(100, 50), "image/png", options(0.5, 0.5)).unwrap();
        image.resize().unwrap();
        assert_eq!((image.width(), image.height()), (50, 25));
    }

    #[wasm_bindgen_test]
    fn test_constructor_defaults() {
        let image = JsImageProcessor::new(&png(10, 10), "image/png", JsValue::UNDEFINED).unwrap();
        assert!(image.to_data_url().unwrap().starts_with("data:image/png;base64,"));
    }

    #[wasm_bindgen_test]
    fn test_constructor_rejects_bad_config() {
        assert!(JsImageProcessor::new(&png(10, 10), "image/png", options(-1.0, 10.0)).is_err());
        assert!(JsImageProcessor::new(&png(10, 10), "image/png", JsValue::from_str("big")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_released_output_fails() {
        let mut image = JsImageProcessor::new(&png(10, 10), "image/png", JsValue::NULL).unwrap();
        image.release();
        assert!(image.to_bytes().is_err());
    }
}
