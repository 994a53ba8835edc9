//! Per-pixel supersampling.

use glam::{Vec2, Vec3};
use sdf::Scene;

use crate::camera::{Camera, PrimaryRay};
use crate::config::RenderConfig;
use crate::normal::estimate_normal;
use crate::shading::{shade_miss, shade_surface, ShadingConfig, SurfacePoint};
use crate::tracer::{march, March};

/// Trace and shade a single view ray.
#[must_use]
pub fn shade_ray<S: Scene + ?Sized>(
    scene: &S,
    primary: &PrimaryRay,
    config: &RenderConfig,
    shading: &ShadingConfig,
) -> Vec3 {
    let ray = &primary.ray;
    match march(scene, ray, config) {
        March::Hit { sample, .. } => {
            let position = ray.at(sample.distance);
            let surface = SurfacePoint {
                position,
                normal: estimate_normal(scene, position, config.normal_epsilon),
                color: sample.color,
                view_dir: -ray.direction,
            };
            shade_surface(&surface, shading)
        }
        March::Miss { .. } => shade_miss(primary, config.max_distance, shading),
    }
}

/// Offsets, in pixel units, of the centers of an `n x n` sub-pixel grid.
pub fn sub_pixel_offsets(n: u32) -> impl Iterator<Item = Vec2> {
    let n = n.max(1);
    let inv = 1.0 / n as f32;
    (0..n).flat_map(move |iy| {
        (0..n).map(move |ix| (Vec2::new(ix as f32, iy as f32) + 0.5) * inv - 0.5)
    })
}

/// Box-filtered color of the pixel at screen position `pixel`.
///
/// Averages `N * N` rays on the configured grid. With `N = 1` the single
/// offset is zero and the result equals [`shade_ray`] at `pixel`.
#[must_use]
pub fn shade_pixel<S: Scene + ?Sized>(
    scene: &S,
    camera: &Camera,
    pixel: Vec2,
    config: &RenderConfig,
    shading: &ShadingConfig,
) -> Vec3 {
    let n = config.sample_grid();
    let total: Vec3 = sub_pixel_offsets(n)
        .map(|offset| shade_ray(scene, &camera.primary_ray(pixel + offset), config, shading))
        .sum();
    total / (u64::from(n) * u64::from(n)) as f32
}
