//! Declared media types.

use serde::{Deserialize, Serialize};

/// Media type declared for a source image.
///
/// Output is always encoded in the same format as the source. Only JPEG goes
/// through metadata capture; every other type is handed to the
/// [`Rasterizer`](crate::Rasterizer) as-is, which decides whether it can
/// decode it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Jpeg,
    Png,
    /// Any other declared type, kept as its lowercased MIME essence.
    Other(String),
}

impl MediaType {
    /// Parse a declared MIME type. Parameters (`; charset=...`) and case are
    /// ignored.
    ///
    /// Returns `None` only when no type is declared at all.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.is_empty() {
            None
        } else if essence.eq_ignore_ascii_case("image/jpeg") || essence.eq_ignore_ascii_case("image/jpg") {
            Some(MediaType::Jpeg)
        } else if essence.eq_ignore_ascii_case("image/png") {
            Some(MediaType::Png)
        } else {
            Some(MediaType::Other(essence.to_ascii_lowercase()))
        }
    }

    pub fn mime(&self) -> &str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Other(mime) => mime,
        }
    }

    /// Only JPEG sources go through metadata capture.
    #[inline]
    pub fn is_jpeg(&self) -> bool {
        *self == MediaType::Jpeg
    }

    /// Codec in the `image` crate for this type, if it has one built in.
    pub(crate) fn to_image_format(&self) -> Option<image::ImageFormat> {
        match self {
            MediaType::Jpeg => Some(image::ImageFormat::Jpeg),
            MediaType::Png => Some(image::ImageFormat::Png),
            MediaType::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(MediaType::from_mime("image/jpeg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_mime("image/jpg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_mime("IMAGE/JPEG"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_mime("image/png"), Some(MediaType::Png));
        assert_eq!(MediaType::from_mime(" image/png ; q=1"), Some(MediaType::Png));
        assert_eq!(
            MediaType::from_mime("Image/WebP"),
            Some(MediaType::Other("image/webp".to_string()))
        );
        assert_eq!(
            MediaType::from_mime("image/gif; x=1"),
            Some(MediaType::Other("image/gif".to_string()))
        );
    }

    #[test]
    fn test_from_mime_empty() {
        assert_eq!(MediaType::from_mime(""), None);
        assert_eq!(MediaType::from_mime("  ; charset=utf-8"), None);
    }

    #[test]
    fn test_mime_round_trip() {
        for media in [
            MediaType::Jpeg,
            MediaType::Png,
            MediaType::Other("image/gif".to_string()),
        ] {
            assert_eq!(MediaType::from_mime(media.mime()), Some(media.clone()));
        }
    }

    #[test]
    fn test_only_jpeg_is_jpeg() {
        assert!(MediaType::Jpeg.is_jpeg());
        assert!(!MediaType::Png.is_jpeg());
        assert!(!MediaType::Other("image/jpeg2000".to_string()).is_jpeg());
    }

    #[test]
    fn test_image_format() {
        assert_eq!(MediaType::Jpeg.to_image_format(), Some(image::ImageFormat::Jpeg));
        assert_eq!(MediaType::Other("image/gif".to_string()).to_image_format(), None);
    }
}
