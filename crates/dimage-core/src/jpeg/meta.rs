//! Per-image metadata captured from the source JPEG.

use serde::{Deserialize, Serialize};

use super::exif::parse_orientation;
use super::segments::scan;
use crate::Orientation;

/// Metadata captured once from the source bytes of an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImageMeta {
    /// EXIF orientation, `Normal` when absent or unreadable.
    pub orientation: Orientation,
    /// Leading metadata segments (SOI excluded), ready to be spliced into a
    /// re-encoded JPEG.
    pub image_head: Option<Vec<u8>>,
}

impl SourceImageMeta {
    #[inline]
    pub fn has_head(&self) -> bool {
        self.image_head.as_ref().is_some_and(|h| !h.is_empty())
    }
}

/// Scan a JPEG buffer and capture its orientation and metadata header.
///
/// The first APP1 segment carrying a valid EXIF structure supplies the
/// orientation; other APP1 segments (XMP, vendor data) are skipped. Malformed
/// input yields the default metadata.
pub fn extract_meta(buffer: &[u8]) -> SourceImageMeta {
    let result = scan(buffer);

    let mut orientation = Orientation::Normal;
    for offset in result.app1_offsets() {
        match parse_orientation(buffer, offset) {
            Ok(value) => {
                orientation = Orientation::from(value.unwrap_or(1));
                break;
            }
            Err(e) => {
                tracing::debug!("Skipping APP1 at {}: {}", offset, e);
            }
        }
    }

    SourceImageMeta {
        orientation,
        image_head: result.image_head(buffer).map(<[u8]>::to_vec),
    }
}
