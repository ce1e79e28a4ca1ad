//! DImage WASM - WebAssembly bindings for DImage
//!
//! This crate exposes the dimage-core upload pipeline to JavaScript/TypeScript
//! so a browser can shrink and straighten photos before sending them.
//!
//! # Module Structure
//!
//! - `processor` - `JsImageProcessor`, the per-image session
//! - `jpeg` - Standalone JPEG header helpers (orientation, scan, splice)
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageProcessor } from '@dimage/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = new JsImageProcessor(bytes, file.type, { width: 1280, height: 1280 });
//! image.resize();
//! image.rotate();
//! const upload = new Blob([image.to_bytes()], { type: file.type });
//! ```

use wasm_bindgen::prelude::*;

mod jpeg;
mod processor;

pub use jpeg::{
    bytes_to_data_url, data_url_to_bytes, header_end, image_orientation, inject_header,
    read_orientation, scan_header,
};
pub use processor::JsImageProcessor;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
