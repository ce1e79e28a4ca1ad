//! JPEG metadata handling.
//!
//! This module provides functionality for:
//! - Scanning the leading APPn/COM marker segments of a JPEG stream
//! - Reading the EXIF orientation tag out of an APP1 segment
//! - Splicing a captured metadata header into a freshly encoded JPEG
//!
//! # Architecture
//!
//! Parsing never fails outward. Every malformed structure is reported as a
//! [`FormatError`] internally, logged at `debug` level, and degraded to the
//! documented default (orientation 1, no captured header).
//!
//! Scanning only ever looks at the first [`MAX_METADATA_SIZE`] bytes of the
//! input, so the cost of the metadata path is independent of the image size.
//!
//! # Examples
//!
//! ```ignore
//! use dimage_core::jpeg::{extract_meta, inject_header};
//!
//! let original = std::fs::read("photo.jpg").unwrap();
//! let meta = extract_meta(&original);
//! println!("orientation = {:?}", meta.orientation);
//!
//! let reencoded = encode_somehow();
//! if let Some(head) = meta.image_head.as_deref() {
//!     let with_exif = inject_header(&reencoded, head);
//! }
//! ```

mod exif;
mod meta;
mod segments;
mod splice;

use thiserror::Error;

pub use exif::{parse_orientation, read_orientation, ByteOrder, TAG_ORIENTATION};
pub use meta::{extract_meta, SourceImageMeta};
pub use segments::{
    is_metadata_marker, scan, ScanResult, Segment, MARKER_APP0, MARKER_APP1, MARKER_APP15,
    MARKER_COM, MAX_METADATA_SIZE, SOI,
};
pub use splice::inject_header;

/// Malformed, truncated or absent binary structure.
///
/// These errors are recovered locally by the public entry points and never
/// reach callers of the processing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Buffer too short to hold a JPEG header.
    #[error("Buffer too short for JPEG header: {0} bytes")]
    TooShort(usize),

    /// First two bytes are not the SOI marker.
    #[error("Missing SOI marker")]
    MissingSoi,

    /// APP1 payload does not start with the "Exif" signature.
    #[error("Not valid EXIF data")]
    NotExif,

    /// TIFF header has neither `II` nor `MM` byte order mark.
    #[error("Not valid TIFF data: byte order mark {0:#06x}")]
    BadByteOrder(u16),

    /// TIFF magic number is not 0x002A.
    #[error("Not valid TIFF data: magic {0:#06x}")]
    BadTiffMagic(u16),

    /// IFD0 offset points inside the TIFF header.
    #[error("Not valid TIFF data: first IFD offset {0} is less than 8")]
    BadIfdOffset(u32),

    /// A read would run past the end of the buffer.
    #[error("Read of {size} bytes at offset {offset} exceeds buffer length {len}")]
    OutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },
}

/// Bounds-checked fixed-size read.
#[inline]
pub(crate) fn read_array<const N: usize>(
    buffer: &[u8],
    offset: usize,
) -> Result<[u8; N], FormatError> {
    offset
        .checked_add(N)
        .and_then(|end| buffer.get(offset..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or(FormatError::OutOfBounds {
            offset,
            size: N,
            len: buffer.len(),
        })
}
