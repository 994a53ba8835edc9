//! Constructive solid geometry on [`SdfSample`] pairs.
//!
//! Combinators work on samples rather than raw distances so the color of the
//! geometrically winning branch travels with the distance. The smooth
//! variants require a blend radius `k > 0`; `k == 0` divides by zero and is
//! the caller's responsibility to avoid.

use crate::sample::{Color3, SdfSample};

fn mix(a: f32, b: f32, h: f32) -> f32 {
    a + (b - a) * h
}

/// Hard union: whichever sample is nearer, unchanged.
///
/// Exact ties may resolve to either operand.
#[must_use]
pub fn union(a: SdfSample, b: SdfSample) -> SdfSample {
    if a.distance < b.distance {
        a
    } else {
        b
    }
}

/// Polynomial smooth minimum with blend radius `k`.
///
/// Distance and color are blended with the same weight, so the material
/// fades across the seam.
#[must_use]
pub fn smooth_union(a: SdfSample, b: SdfSample, k: f32) -> SdfSample {
    let h = (0.5 + 0.5 * (b.distance - a.distance) / k).clamp(0.0, 1.0);
    SdfSample {
        distance: mix(b.distance, a.distance, h) - k * h * (1.0 - h),
        color: b.color.lerp(a.color, h),
    }
}

/// Carve `b` out of `a`. The result always keeps `a`'s color.
#[must_use]
pub fn subtract(a: SdfSample, b: SdfSample) -> SdfSample {
    SdfSample {
        distance: a.distance.max(-b.distance),
        color: a.color,
    }
}

/// Smooth analogue of [`subtract`]; color fixed to `a`'s.
#[must_use]
pub fn smooth_subtract(a: SdfSample, b: SdfSample, k: f32) -> SdfSample {
    let h = (0.5 - 0.5 * (b.distance + a.distance) / k).clamp(0.0, 1.0);
    SdfSample {
        distance: mix(a.distance, -b.distance, h) + k * h * (1.0 - h),
        color: a.color,
    }
}

/// Hard intersection: whichever sample is farther, unchanged.
#[must_use]
pub fn intersect(a: SdfSample, b: SdfSample) -> SdfSample {
    if a.distance > b.distance {
        a
    } else {
        b
    }
}

/// Re-tag a sample with a new material color.
#[must_use]
pub fn set_color(sample: SdfSample, color: Color3) -> SdfSample {
    SdfSample { color, ..sample }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[test]
    fn subtract_keeps_minuend_color_where_subtrahend_wins() {
        let a = SdfSample::new(-0.5, RED);
        let b = SdfSample::new(-0.2, BLUE);
        let r = subtract(a, b);
        assert!((r.distance - 0.2).abs() < 1e-6);
        assert_eq!(r.color, RED);
    }

    #[test]
    fn smooth_union_far_apart_matches_hard_union() {
        let a = SdfSample::new(0.1, RED);
        let b = SdfSample::new(5.0, BLUE);
        let r = smooth_union(a, b, 0.25);
        assert!((r.distance - 0.1).abs() < 1e-6);
        assert_eq!(r.color, RED);
    }

    #[test]
    fn smooth_union_blends_color_at_seam() {
        let a = SdfSample::new(0.3, RED);
        let b = SdfSample::new(0.3, BLUE);
        let r = smooth_union(a, b, 0.5);
        assert!((r.color - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-6);
        // Equal distances dip by k/4.
        assert!((r.distance - (0.3 - 0.125)).abs() < 1e-6);
    }

    #[test]
    fn smooth_subtract_far_from_cutter_is_identity() {
        let a = SdfSample::new(0.4, RED);
        let b = SdfSample::new(3.0, BLUE);
        let r = smooth_subtract(a, b, 0.1);
        assert!((r.distance - 0.4).abs() < 1e-6);
        assert_eq!(r.color, RED);
    }

    #[test]
    fn set_color_keeps_distance() {
        let r = set_color(SdfSample::new(1.5, RED), BLUE);
        assert!((r.distance - 1.5).abs() < f32::EPSILON);
        assert_eq!(r.color, BLUE);
    }
}
