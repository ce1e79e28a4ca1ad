//! Resize planning.

use serde::{Deserialize, Serialize};

/// Target dimensions computed by [`plan_resize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizePlan {
    pub target_width: u32,
    pub target_height: u32,
    /// Uniform scale factor, never above 1.
    pub scale: f64,
}

/// Resolve a configured bound against a natural dimension.
///
/// Values in `(0, 1]` are fractions of the natural size; anything else is an
/// absolute pixel count.
#[inline]
pub fn resolve_bound(bound: f64, natural: u32) -> f64 {
    if bound > 0.0 && bound <= 1.0 {
        bound * natural as f64
    } else {
        bound
    }
}

/// Compute the dimensions that fit `natural_width x natural_height` inside the
/// configured bounds while preserving aspect ratio.
///
/// The scale is clamped to 1, so images are never enlarged. Each target edge
/// is rounded to the nearest pixel and is at least 1. A zero natural
/// dimension yields a zero-sized plan with scale 1.
///
/// Bounds must be positive; [`Config::validate`](crate::Config::validate)
/// guarantees this for configured values.
pub fn plan_resize(
    natural_width: u32,
    natural_height: u32,
    bound_width: f64,
    bound_height: f64,
) -> ResizePlan {
    if natural_width == 0 || natural_height == 0 {
        return ResizePlan {
            target_width: 0,
            target_height: 0,
            scale: 1.0,
        };
    }

    let max_width = resolve_bound(bound_width, natural_width);
    let max_height = resolve_bound(bound_height, natural_height);

    let scale = (max_width / natural_width as f64)
        .min(max_height / natural_height as f64)
        .min(1.0);

    ResizePlan {
        target_width: scaled_edge(natural_width, scale),
        target_height: scaled_edge(natural_height, scale),
        scale,
    }
}

#[inline]
fn scaled_edge(natural: u32, scale: f64) -> u32 {
    ((natural as f64 * scale).round() as u32).clamp(1, natural)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=10_000, 1u32..=10_000)
    }

    /// Either a fraction in (0, 1] or an absolute pixel bound.
    fn bound_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![0.01f64..=1.0, (2u32..=8000).prop_map(f64::from)]
    }

    proptest! {
        /// Property: targets never exceed the natural size and scale stays in (0, 1].
        #[test]
        fn prop_never_upscales(
            (w, h) in dimensions_strategy(),
            bw in bound_strategy(),
            bh in bound_strategy(),
        ) {
            let plan = plan_resize(w, h, bw, bh);
            prop_assert!(plan.target_width <= w);
            prop_assert!(plan.target_height <= h);
            prop_assert!(plan.target_width >= 1 && plan.target_height >= 1);
            prop_assert!(plan.scale > 0.0 && plan.scale <= 1.0);
        }

        /// Property: bounds at or above the natural size leave the image untouched.
        #[test]
        fn prop_large_bounds_are_identity(
            (w, h) in dimensions_strategy(),
            extra_w in 0u32..=5000,
            extra_h in 0u32..=5000,
        ) {
            let bw = (w + extra_w).max(2) as f64;
            let bh = (h + extra_h).max(2) as f64;
            let plan = plan_resize(w, h, bw, bh);
            prop_assert_eq!((plan.target_width, plan.target_height), (w, h));
            prop_assert_eq!(plan.scale, 1.0);
        }

        /// Property: planning again with the same pixel bounds is a no-op.
        #[test]
        fn prop_idempotent_with_pixel_bounds(
            (w, h) in dimensions_strategy(),
            bw in 2u32..=8000,
            bh in 2u32..=8000,
        ) {
            let first = plan_resize(w, h, bw as f64, bh as f64);
            let second = plan_resize(first.target_width, first.target_height, bw as f64, bh as f64);
            prop_assert_eq!(
                (second.target_width, second.target_height),
                (first.target_width, first.target_height)
            );
        }

        /// Property: pixel bounds are respected on both axes.
        #[test]
        fn prop_fits_pixel_bounds(
            (w, h) in dimensions_strategy(),
            bw in 2u32..=8000,
            bh in 2u32..=8000,
        ) {
            let plan = plan_resize(w, h, bw as f64, bh as f64);
            prop_assert!(plan.target_width <= bw.max(1));
            prop_assert!(plan.target_height <= bh.max(1));
        }
    }
}
