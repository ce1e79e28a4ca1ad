//! Geometry planning for resize and orientation correction.
//!
//! Everything here is a pure function of natural dimensions, configured
//! bounds and orientation. The result, a [`GeometrySpec`], is what a
//! [`Rasterizer`](crate::raster::Rasterizer) draws from.

mod resize;
mod rotation;

use serde::{Deserialize, Serialize};

pub use resize::{plan_resize, resolve_bound, ResizePlan};
pub use rotation::{plan_rotation, Rotation, RotationPlan};

/// Complete drawing parameters for one draw call.
///
/// The source is scaled to `draw_width x draw_height`, the context is rotated
/// by `rotation`, and the source is drawn at `(draw_offset_x, draw_offset_y)`
/// onto a `target_width x target_height` canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySpec {
    /// Output canvas width.
    pub target_width: u32,
    /// Output canvas height.
    pub target_height: u32,
    /// Width the source is scaled to before rotation.
    pub draw_width: u32,
    /// Height the source is scaled to before rotation.
    pub draw_height: u32,
    /// Scale relative to the natural size, in (0, 1].
    pub scale: f64,
    pub rotated: bool,
    pub swap_dims: bool,
    pub rotation: Rotation,
    pub draw_offset_x: i64,
    pub draw_offset_y: i64,
}

impl GeometrySpec {
    /// Draw the source unchanged.
    pub fn identity(width: u32, height: u32) -> Self {
        Self {
            target_width: width,
            target_height: height,
            draw_width: width,
            draw_height: height,
            scale: 1.0,
            rotated: false,
            swap_dims: false,
            rotation: Rotation::None,
            draw_offset_x: 0,
            draw_offset_y: 0,
        }
    }

    /// Scale only.
    pub fn from_resize(plan: &ResizePlan) -> Self {
        Self {
            scale: plan.scale,
            ..Self::identity(plan.target_width, plan.target_height)
        }
    }

    /// Apply a rotation plan to this spec.
    ///
    /// The plan must have been computed for this spec's draw size; the scale
    /// carries over unchanged.
    pub fn with_rotation(self, plan: &RotationPlan) -> Self {
        Self {
            target_width: plan.canvas_width,
            target_height: plan.canvas_height,
            draw_width: plan.base_width,
            draw_height: plan.base_height,
            scale: self.scale,
            rotated: !plan.is_noop(),
            swap_dims: plan.swap_dims,
            rotation: plan.rotation,
            draw_offset_x: plan.draw_offset_x,
            draw_offset_y: plan.draw_offset_y,
        }
    }

    /// Rotation of the drawing context in radians.
    #[inline]
    pub fn rotation_radians(&self) -> f64 {
        self.rotation.radians()
    }
}
