//! Standalone JPEG header bindings.
//!
//! These work on raw bytes without decoding pixels, for callers that do their
//! own drawing (for example on an `OffscreenCanvas`) and only need the
//! metadata handling.
//!
//! # Example
//!
//! ```typescript
//! import { scan_header, inject_header, image_orientation } from '@dimage/wasm';
//!
//! const original = new Uint8Array(await file.arrayBuffer());
//! const orientation = image_orientation(original);
//! const head = scan_header(original);
//! // ... draw and encode on a canvas ...
//! const upload = head ? inject_header(encoded, head) : encoded;
//! ```

use dimage_core::data_url;
use dimage_core::jpeg;
use wasm_bindgen::prelude::*;

/// Read the EXIF orientation from the APP1 segment starting at `app1_offset`.
///
/// Returns 1 when the segment is missing, malformed or has no Orientation tag.
#[wasm_bindgen]
pub fn read_orientation(bytes: &[u8], app1_offset: usize) -> u16 {
    jpeg::read_orientation(bytes, app1_offset)
}

/// Orientation of a whole JPEG file (1 when absent or not a JPEG).
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u16 {
    jpeg::extract_meta(bytes).orientation.value()
}

/// Offset one past the last leading metadata segment, 0 for non-JPEG input.
#[wasm_bindgen]
pub fn header_end(bytes: &[u8]) -> usize {
    jpeg::scan(bytes).header_end
}

/// The leading metadata segments of a JPEG, or `undefined` when there are
/// none.
#[wasm_bindgen]
pub fn scan_header(bytes: &[u8]) -> Option<Vec<u8>> {
    let result = jpeg::scan(bytes);
    result.image_head(bytes).map(<[u8]>::to_vec)
}

/// Replace the metadata segments of `encoded` with `header`.
#[wasm_bindgen]
pub fn inject_header(encoded: &[u8], header: &[u8]) -> Vec<u8> {
    jpeg::inject_header(encoded, header)
}

/// Decode the payload of a `data:` URL.
#[wasm_bindgen]
pub fn data_url_to_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    data_url::decode(url)
        .map(|(_, bytes)| bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode bytes as a base64 `data:` URL.
#[wasm_bindgen]
pub fn bytes_to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    data_url::encode(mime_type, bytes)
}
