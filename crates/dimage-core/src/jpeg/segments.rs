//! Leading marker segment scanner.

use super::{read_array, FormatError};

/// JPEG Start-Of-Image marker.
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// First application marker (APP0, usually JFIF).
pub const MARKER_APP0: u16 = 0xFFE0;
/// APP1, conventionally EXIF (or XMP).
pub const MARKER_APP1: u16 = 0xFFE1;
/// Last application marker.
pub const MARKER_APP15: u16 = 0xFFEF;
/// Comment marker.
pub const MARKER_COM: u16 = 0xFFFE;

/// Upper bound on the number of source bytes the scanner will look at.
pub const MAX_METADATA_SIZE: usize = 262_144;

/// Smallest buffer that can hold SOI plus one marker and its length field.
const MIN_SCAN_LEN: usize = 6;

/// A header is only captured when the scan got past SOI plus one bare
/// marker and length field.
const MIN_HEAD_END: usize = 6;

/// Returns true for the markers that make up the captured metadata header.
#[inline]
pub fn is_metadata_marker(marker: u16) -> bool {
    (MARKER_APP0..=MARKER_APP15).contains(&marker) || marker == MARKER_COM
}

/// A single metadata segment found by [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Marker code (e.g. 0xFFE1).
    pub marker: u16,
    /// Byte offset of the marker within the scanned buffer.
    pub offset: usize,
    /// Value of the segment's length field, which counts itself but not the marker.
    pub length: usize,
}

impl Segment {
    /// Offset one past the last byte of this segment.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.length + 2
    }

    #[inline]
    pub fn is_app1(&self) -> bool {
        self.marker == MARKER_APP1
    }
}

/// Result of scanning a buffer's leading metadata segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Offset at which scanning stopped. Zero when the buffer is not a JPEG.
    pub header_end: usize,
    /// Complete metadata segments in file order.
    pub segments: Vec<Segment>,
}

impl ScanResult {
    /// Offsets of every APP1 segment, in file order.
    pub fn app1_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments
            .iter()
            .filter(|s| s.is_app1())
            .map(|s| s.offset)
    }

    /// The captured metadata run: everything between SOI and `header_end`.
    ///
    /// `None` unless `header_end` is past byte 6, so a lone empty segment
    /// (such as `FF FE 00 02`) is not captured.
    pub fn image_head<'a>(&self, buffer: &'a [u8]) -> Option<&'a [u8]> {
        if self.header_end <= MIN_HEAD_END {
            return None;
        }
        buffer.get(SOI.len()..self.header_end)
    }
}

/// Scan the leading APPn/COM segments of a JPEG buffer.
///
/// Never panics and never fails: a buffer that is too short or lacks the SOI
/// marker yields an empty result, and a truncated or garbled segment ends the
/// scan with whatever was accumulated so far. At most
/// [`MAX_METADATA_SIZE`] bytes are examined.
pub fn scan(buffer: &[u8]) -> ScanResult {
    if let Err(e) = check_soi(buffer) {
        tracing::debug!("Skipping JPEG header scan: {}", e);
        return ScanResult::default();
    }

    let limit = buffer.len().min(MAX_METADATA_SIZE);
    let mut offset = SOI.len();
    let mut segments = Vec::new();

    while offset + 4 <= limit {
        let marker = match read_array::<2>(buffer, offset) {
            Ok(bytes) => u16::from_be_bytes(bytes),
            Err(_) => break,
        };
        if !is_metadata_marker(marker) {
            tracing::trace!("Header scan stopped at marker {:#06x}", marker);
            break;
        }

        let length = match read_array::<2>(buffer, offset + 2) {
            Ok(bytes) => u16::from_be_bytes(bytes) as usize,
            Err(_) => break,
        };
        // The length field counts itself, so anything below 2 is garbage.
        if length < 2 {
            tracing::debug!(
                "Segment {:#06x} at {} has invalid length {}",
                marker,
                offset,
                length
            );
            break;
        }

        let segment = Segment {
            marker,
            offset,
            length,
        };
        if segment.end() > limit {
            tracing::debug!(
                "Segment {:#06x} at {} runs past the scanned range ({} > {})",
                marker,
                offset,
                segment.end(),
                limit
            );
            break;
        }

        tracing::trace!("Found segment {:#06x} at {} ({} bytes)", marker, offset, length);
        offset = segment.end();
        segments.push(segment);
    }

    ScanResult {
        header_end: offset,
        segments,
    }
}

fn check_soi(buffer: &[u8]) -> Result<(), FormatError> {
    if buffer.len() < MIN_SCAN_LEN {
        return Err(FormatError::TooShort(buffer.len()));
    }
    if buffer[..2] != SOI {
        return Err(FormatError::MissingSoi);
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: scanning arbitrary bytes never panics and never reports
        /// a boundary past the end of the input.
        #[test]
        fn prop_scan_never_reads_past_end(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let result = scan(&bytes);
            prop_assert!(result.header_end <= bytes.len());
            for s in &result.segments {
                prop_assert!(s.end() <= bytes.len());
                prop_assert!(is_metadata_marker(s.marker));
            }
        }

        /// Property: with a valid SOI prefix, segments are contiguous from
        /// offset 2 up to `header_end`.
        #[test]
        fn prop_segments_are_contiguous(tail in prop::collection::vec(any::<u8>(), 4..512)) {
            let mut bytes = SOI.to_vec();
            bytes.extend_from_slice(&tail);

            let result = scan(&bytes);
            let mut expected = 2;
            for s in &result.segments {
                prop_assert_eq!(s.offset, expected);
                expected = s.end();
            }
            prop_assert_eq!(result.header_end, expected);
        }
    }
}
