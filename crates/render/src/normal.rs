use glam::Vec3;
use sdf::Scene;

/// Floor on the gradient magnitude before normalizing.
const MIN_GRADIENT: f32 = 1e-8;

/// Surface normal from the central-difference gradient of the distance field.
///
/// Costs six scene evaluations. A vanishing gradient (non-smooth geometry or
/// a point far from any surface) yields a short vector instead of NaNs.
#[must_use]
pub fn estimate_normal<S: Scene + ?Sized>(scene: &S, p: Vec3, eps: f32) -> Vec3 {
    let ex = Vec3::new(eps, 0.0, 0.0);
    let ey = Vec3::new(0.0, eps, 0.0);
    let ez = Vec3::new(0.0, 0.0, eps);
    let gradient = Vec3::new(
        scene.map(p + ex).distance - scene.map(p - ex).distance,
        scene.map(p + ey).distance - scene.map(p - ey).distance,
        scene.map(p + ez).distance - scene.map(p - ez).distance,
    );
    gradient / gradient.length().max(MIN_GRADIENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdf::{primitives, SdfSample};

    #[test]
    fn box_face_normal_points_out_of_face() {
        let scene = |p: Vec3| SdfSample::untagged(primitives::cuboid(p, Vec3::ONE));
        let n = estimate_normal(&scene, Vec3::new(0.2, 1.0, -0.3), 5e-4);
        assert!((n - Vec3::Y).length() < 1e-3);
    }

    #[test]
    fn flat_field_does_not_produce_nan() {
        let scene = |_: Vec3| SdfSample::untagged(1.0);
        let n = estimate_normal(&scene, Vec3::ZERO, 5e-4);
        assert!(n.is_finite());
        assert_eq!(n, Vec3::ZERO);
    }
}
