use glam::Vec3;

/// A position in world space.
pub type Point3 = Vec3;
/// A direction; callers normalize before handing it to tracing or shading code.
pub type Direction3 = Vec3;
/// Linear RGB, components in `[0, inf)`, displayed without tonemapping.
pub type Color3 = Vec3;

/// Material color assigned to primitives that were never explicitly tagged.
pub const DEFAULT_COLOR: Color3 = Vec3::new(0.2, 0.55, 1.0);

/// Result of evaluating a distance field at one point.
///
/// `distance` is negative inside the solid, zero on the boundary and positive
/// outside. `color` is only meaningful for the branch a combinator selected
/// as nearest.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SdfSample {
    pub distance: f32,
    pub color: Color3,
}

impl SdfSample {
    #[must_use]
    pub const fn new(distance: f32, color: Color3) -> Self {
        Self { distance, color }
    }

    /// Sample carrying [`DEFAULT_COLOR`].
    #[must_use]
    pub const fn untagged(distance: f32) -> Self {
        Self::new(distance, DEFAULT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_uses_default_color() {
        let s = SdfSample::untagged(0.25);
        assert_eq!(s.color, DEFAULT_COLOR);
        assert!((s.distance - 0.25).abs() < 1e-6);
    }
}
