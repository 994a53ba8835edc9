//! Point transforms applied before a primitive is evaluated.
//!
//! Rotations are independent linear maps on the point; compose them by
//! nesting calls rather than by accumulating a matrix.

use glam::{BVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Rotate `p` about the X axis by `angle` radians.
#[must_use]
pub fn rotate_x(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x, c * p.y - s * p.z, s * p.y + c * p.z)
}

/// Rotate `p` about the Y axis by `angle` radians.
#[must_use]
pub fn rotate_y(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(c * p.x + s * p.z, p.y, -s * p.x + c * p.z)
}

/// Rotate `p` about the Z axis by `angle` radians.
#[must_use]
pub fn rotate_z(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(c * p.x - s * p.y, s * p.x + c * p.y, p.z)
}

/// Move the sample point into the frame of a shape placed at `offset`.
#[must_use]
pub fn translate(p: Vec3, offset: Vec3) -> Vec3 {
    p - offset
}

/// Fold space across the planes selected by `axes`.
#[must_use]
pub fn mirror(p: Vec3, axes: BVec3) -> Vec3 {
    Vec3::select(axes, p.abs(), p)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Pick the axis a direction vector names: X if its x component is
    /// above 0.9, then Y, otherwise Z.
    #[must_use]
    pub fn dominant(v: Vec3) -> Self {
        if v.x > 0.9 {
            Self::X
        } else if v.y > 0.9 {
            Self::Y
        } else {
            Self::Z
        }
    }

    #[must_use]
    pub const fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }

    #[must_use]
    pub fn rotate(self, p: Vec3, angle: f32) -> Vec3 {
        match self {
            Self::X => rotate_x(p, angle),
            Self::Y => rotate_y(p, angle),
            Self::Z => rotate_z(p, angle),
        }
    }

    /// Lowercase name, as used by generated shader helpers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn quarter_turns_follow_right_hand_rule() {
        assert!(close(rotate_x(Vec3::Y, FRAC_PI_2), Vec3::Z));
        assert!(close(rotate_y(Vec3::Z, FRAC_PI_2), Vec3::X));
        assert!(close(rotate_z(Vec3::X, FRAC_PI_2), Vec3::Y));
    }

    #[test]
    fn rotation_preserves_length() {
        let p = Vec3::new(0.3, -1.2, 2.5);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let r = axis.rotate(p, 0.7);
            assert!((r.length() - p.length()).abs() < 1e-5);
        }
    }

    #[test]
    fn mirror_only_touches_selected_axes() {
        let p = Vec3::new(-1.0, -2.0, -3.0);
        let m = mirror(p, BVec3::new(true, false, true));
        assert_eq!(m, Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn dominant_axis_prefers_x_then_y() {
        assert_eq!(Axis::dominant(Vec3::X), Axis::X);
        assert_eq!(Axis::dominant(Vec3::Y), Axis::Y);
        assert_eq!(Axis::dominant(Vec3::new(0.5, 0.5, 0.0)), Axis::Z);
    }
}
