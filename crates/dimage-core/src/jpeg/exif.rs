//! EXIF orientation reader.
//!
//! Only IFD0 is walked and only the Orientation tag is looked at. The layout
//! of an APP1 segment carrying EXIF data is:
//!
//! ```text
//! FF E1 | len(2) | "Exif" 00 00 | TIFF header (8) | IFD0 ...
//!                                 ^ app1_offset + 10
//! ```

use super::segments::MAX_METADATA_SIZE;
use super::{read_array, FormatError};

/// TIFF/EXIF Orientation tag.
pub const TAG_ORIENTATION: u16 = 0x0112;

const EXIF_SIGNATURE: &[u8; 4] = b"Exif";
const BYTE_ORDER_LE: u16 = 0x4949; // II
const BYTE_ORDER_BE: u16 = 0x4D4D; // MM
const TIFF_MAGIC: u16 = 0x002A;
const MIN_IFD_OFFSET: u32 = 8;
const IFD_ENTRY_SIZE: usize = 12;

/// Offset of the TIFF header relative to the APP1 marker:
/// marker (2) + length (2) + "Exif\0\0" (6).
const TIFF_HEADER_OFFSET: usize = 10;

/// Orientation reported when nothing better is known.
const DEFAULT_ORIENTATION: u16 = 1;

/// Byte order declared by a TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// `II` (Intel)
    LittleEndian,
    /// `MM` (Motorola)
    BigEndian,
}

impl ByteOrder {
    pub fn read_u16(self, buffer: &[u8], offset: usize) -> Result<u16, FormatError> {
        let bytes = read_array::<2>(buffer, offset)?;
        Ok(match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        })
    }

    pub fn read_u32(self, buffer: &[u8], offset: usize) -> Result<u32, FormatError> {
        let bytes = read_array::<4>(buffer, offset)?;
        Ok(match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        })
    }
}

/// Read the EXIF orientation from the APP1 segment starting at `app1_offset`.
///
/// Returns 1 when the segment is not EXIF, the TIFF header is invalid, or the
/// Orientation tag is absent. Never panics.
pub fn read_orientation(buffer: &[u8], app1_offset: usize) -> u16 {
    match parse_orientation(buffer, app1_offset) {
        Ok(Some(value)) => value,
        Ok(None) => DEFAULT_ORIENTATION,
        Err(e) => {
            tracing::debug!("No EXIF orientation in APP1 at {}: {}", app1_offset, e);
            DEFAULT_ORIENTATION
        }
    }
}

/// Strict variant of [`read_orientation`].
///
/// Returns `Ok(None)` when the EXIF/TIFF structure is valid but IFD0 holds no
/// Orientation entry. If the tag appears more than once the last entry wins.
/// A corrupt entry count stops the walk at the end of the segment instead of
/// failing, keeping whatever was found up to that point.
///
/// Reads stay inside the APP1 segment as declared by its length field, and
/// inside the first [`MAX_METADATA_SIZE`] bytes of `buffer`.
pub fn parse_orientation(buffer: &[u8], app1_offset: usize) -> Result<Option<u16>, FormatError> {
    let limit = buffer.len().min(MAX_METADATA_SIZE);
    let segment_end = read_array::<2>(buffer, app1_offset.saturating_add(2))
        .map(|len| {
            app1_offset
                .saturating_add(2)
                .saturating_add(u16::from_be_bytes(len) as usize)
        })
        .unwrap_or(limit);
    let buffer = &buffer[..segment_end.min(limit)];

    let signature = read_array::<4>(buffer, app1_offset.saturating_add(4))?;
    if &signature != EXIF_SIGNATURE {
        return Err(FormatError::NotExif);
    }

    let tiff_start = app1_offset.saturating_add(TIFF_HEADER_OFFSET);
    let order = match u16::from_be_bytes(read_array::<2>(buffer, tiff_start)?) {
        BYTE_ORDER_LE => ByteOrder::LittleEndian,
        BYTE_ORDER_BE => ByteOrder::BigEndian,
        other => return Err(FormatError::BadByteOrder(other)),
    };

    let magic = order.read_u16(buffer, tiff_start + 2)?;
    if magic != TIFF_MAGIC {
        return Err(FormatError::BadTiffMagic(magic));
    }

    let ifd_offset = order.read_u32(buffer, tiff_start + 4)?;
    if ifd_offset < MIN_IFD_OFFSET {
        return Err(FormatError::BadIfdOffset(ifd_offset));
    }

    let dir_start = tiff_start
        .checked_add(ifd_offset as usize)
        .ok_or(FormatError::OutOfBounds {
            offset: tiff_start,
            size: ifd_offset as usize,
            len: buffer.len(),
        })?;
    let entries = order.read_u16(buffer, dir_start)?;

    let mut orientation = None;
    for i in 0..entries as usize {
        let entry = dir_start + 2 + i * IFD_ENTRY_SIZE;
        let tag = match order.read_u16(buffer, entry) {
            Ok(tag) => tag,
            Err(e) => {
                tracing::debug!("IFD0 truncated after {} of {} entries: {}", i, entries, e);
                break;
            }
        };
        if tag == TAG_ORIENTATION {
            match order.read_u16(buffer, entry + 8) {
                Ok(value) => orientation = Some(value),
                Err(e) => {
                    tracing::debug!("Orientation entry {} truncated: {}", i, e);
                    break;
                }
            }
        }
    }

    Ok(orientation)
}



// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::test_support::exif_app1;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: arbitrary bytes at any offset never panic.
        #[test]
        fn prop_arbitrary_bytes_never_panic(
            bytes in prop::collection::vec(any::<u8>(), 0..256),
            offset in 0usize..300,
        ) {
            let _ = read_orientation(&bytes, offset);
        }

        /// Property: any embedded orientation value is read back exactly.
        #[test]
        fn prop_embedded_value_is_returned(
            value in any::<u16>(),
            little_endian in any::<bool>(),
            filler in prop::collection::vec((0x0100u16..0x0111, any::<u16>()), 0..8),
        ) {
            let order = if little_endian { ByteOrder::LittleEndian } else { ByteOrder::BigEndian };
            let mut entries = filler;
            entries.push((TAG_ORIENTATION, value));
            let app1 = exif_app1(order, &entries);
            prop_assert_eq!(read_orientation(&app1, 0), value);
        }

        /// Property: truncating a valid segment anywhere never panics.
        #[test]
        fn prop_truncation_never_panics(cut in 0usize..40, value in 1u16..=8) {
            let app1 = exif_app1(ByteOrder::LittleEndian, &[(TAG_ORIENTATION, value)]);
            let cut = cut.min(app1.len());
            let _ = read_orientation(&app1[..cut], 0);
        }
    }
}
