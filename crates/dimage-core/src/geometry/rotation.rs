//! Orientation-driven rotation planning.
//!
//! The parameters describe a canvas transform: rotate the drawing context by
//! [`Rotation::radians`] about the canvas origin, then draw the source scaled
//! to `base_width x base_height` at `(draw_offset_x, draw_offset_y)`. The
//! offsets bring the rotated image back into the positive quadrant.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::Orientation;

/// Quarter-turn rotation applied to the drawing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    /// π/2, clockwise on a y-down canvas.
    Clockwise90,
    /// −π/2
    CounterClockwise90,
    /// π
    Half,
}

impl Rotation {
    pub fn radians(self) -> f64 {
        match self {
            Rotation::None => 0.0,
            Rotation::Clockwise90 => FRAC_PI_2,
            Rotation::CounterClockwise90 => -FRAC_PI_2,
            Rotation::Half => PI,
        }
    }

    /// True for the quarter turns that exchange width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::CounterClockwise90)
    }
}

/// Output of [`plan_rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPlan {
    pub rotation: Rotation,
    pub swap_dims: bool,
    pub draw_offset_x: i64,
    pub draw_offset_y: i64,
    /// Size the source is drawn at, before rotation.
    pub base_width: u32,
    pub base_height: u32,
    /// Size of the output canvas.
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl RotationPlan {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.rotation == Rotation::None
    }
}

/// Plan the transform that displays an image with the given EXIF orientation
/// upright.
///
/// `base_width` and `base_height` are the dimensions to rotate around: the
/// resized canvas if a resize already happened, the natural size otherwise.
///
/// | orientation | rotation | offset |
/// |---|---|---|
/// | 6 | π/2 | (0, −h) |
/// | 8 | −π/2 | (−w, 0) |
/// | 3 | π | (−w, −h) |
/// | anything else | none | (0, 0) |
///
/// Mirrored orientations (2, 4, 5, 7) are left untouched.
pub fn plan_rotation(orientation: Orientation, base_width: u32, base_height: u32) -> RotationPlan {
    let w = i64::from(base_width);
    let h = i64::from(base_height);

    let (rotation, draw_offset_x, draw_offset_y) = match orientation {
        Orientation::Rotate90CW => (Rotation::Clockwise90, 0, -h),
        Orientation::Rotate270CW => (Rotation::CounterClockwise90, -w, 0),
        Orientation::Rotate180 => (Rotation::Half, -w, -h),
        _ => (Rotation::None, 0, 0),
    };

    let swap_dims = rotation.swaps_dimensions();
    let (canvas_width, canvas_height) = if swap_dims {
        (base_height, base_width)
    } else {
        (base_width, base_height)
    };

    RotationPlan {
        rotation,
        swap_dims,
        draw_offset_x,
        draw_offset_y,
        base_width,
        base_height,
        canvas_width,
        canvas_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_6() {
        let plan = plan_rotation(Orientation::Rotate90CW, 4000, 3000);
        assert!(plan.swap_dims);
        assert_eq!(plan.rotation.radians(), FRAC_PI_2);
        assert_eq!((plan.draw_offset_x, plan.draw_offset_y), (0, -3000));
        assert_eq!((plan.canvas_width, plan.canvas_height), (3000, 4000));
    }

    #[test]
    fn test_orientation_8() {
        let plan = plan_rotation(Orientation::Rotate270CW, 4000, 3000);
        assert!(plan.swap_dims);
        assert_eq!(plan.rotation.radians(), -FRAC_PI_2);
        assert_eq!((plan.draw_offset_x, plan.draw_offset_y), (-4000, 0));
        assert_eq!((plan.canvas_width, plan.canvas_height), (3000, 4000));
    }

    #[test]
    fn test_orientation_3() {
        let plan = plan_rotation(Orientation::Rotate180, 4000, 3000);
        assert!(!plan.swap_dims);
        assert_eq!(plan.rotation.radians(), PI);
        assert_eq!((plan.draw_offset_x, plan.draw_offset_y), (-4000, -3000));
        assert_eq!((plan.canvas_width, plan.canvas_height), (4000, 3000));
    }

    #[test]
    fn test_normal_and_mirrored_are_noops() {
        for orientation in [
            Orientation::Normal,
            Orientation::FlipHorizontal,
            Orientation::FlipVertical,
            Orientation::Transpose,
            Orientation::Transverse,
        ] {
            let plan = plan_rotation(orientation, 4000, 3000);
            assert!(plan.is_noop(), "{:?}", orientation);
            assert!(!plan.swap_dims);
            assert_eq!(plan.rotation.radians(), 0.0);
            assert_eq!((plan.draw_offset_x, plan.draw_offset_y), (0, 0));
            assert_eq!((plan.canvas_width, plan.canvas_height), (4000, 3000));
        }
    }

    #[test]
    fn test_rotation_on_resized_dimensions() {
        let plan = plan_rotation(Orientation::Rotate90CW, 1280, 960);
        assert_eq!((plan.base_width, plan.base_height), (1280, 960));
        assert_eq!((plan.canvas_width, plan.canvas_height), (960, 1280));
        assert_eq!(plan.draw_offset_y, -960);
    }

    /// Map the corners of the drawn rectangle through the planned transform
    /// and check they land exactly on the canvas.
    #[test]
    fn test_offsets_map_onto_canvas() {
        for orientation in [
            Orientation::Rotate90CW,
            Orientation::Rotate270CW,
            Orientation::Rotate180,
        ] {
            let plan = plan_rotation(orientation, 40, 30);
            let (sin, cos) = plan.rotation.radians().sin_cos();
            let x0 = plan.draw_offset_x as f64;
            let y0 = plan.draw_offset_y as f64;
            let corners = [
                (x0, y0),
                (x0 + 40.0, y0),
                (x0, y0 + 30.0),
                (x0 + 40.0, y0 + 30.0),
            ];
            let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
            let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
            for (x, y) in corners {
                let rx = x * cos - y * sin;
                let ry = x * sin + y * cos;
                min_x = min_x.min(rx);
                min_y = min_y.min(ry);
                max_x = max_x.max(rx);
                max_y = max_y.max(ry);
            }
            assert!(min_x.abs() < 1e-9 && min_y.abs() < 1e-9, "{:?}", orientation);
            assert!((max_x - plan.canvas_width as f64).abs() < 1e-9);
            assert!((max_y - plan.canvas_height as f64).abs() < 1e-9);
        }
    }
}
