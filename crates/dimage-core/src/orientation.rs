//! EXIF orientation values.

use serde::{Deserialize, Serialize};

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
///
/// Only the pure rotations (3, 6, 8) are acted upon by the rotation planner;
/// the mirrored variants are carried through but render as `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// The raw EXIF tag value.
    #[inline]
    pub fn value(self) -> u16 {
        self as u16
    }

    /// Returns true for the orientations the rotation planner handles.
    #[inline]
    pub fn is_handled(self) -> bool {
        matches!(
            self,
            Orientation::Normal
                | Orientation::Rotate180
                | Orientation::Rotate90CW
                | Orientation::Rotate270CW
        )
    }
}

impl From<u16> for Orientation {
    fn from(value: u16) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u16() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(3), Orientation::Rotate180);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(8), Orientation::Rotate270CW);
        assert_eq!(Orientation::from(0), Orientation::Normal);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_orientation_value_round_trips() {
        for raw in 1u16..=8 {
            assert_eq!(Orientation::from(raw).value(), raw);
        }
    }

    #[test]
    fn test_mirrored_orientations_unhandled() {
        assert!(Orientation::Normal.is_handled());
        assert!(Orientation::Rotate90CW.is_handled());
        assert!(!Orientation::FlipHorizontal.is_handled());
        assert!(!Orientation::Transpose.is_handled());
        assert!(!Orientation::Transverse.is_handled());
        assert!(!Orientation::FlipVertical.is_handled());
    }
}
