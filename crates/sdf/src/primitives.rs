//! Exact signed distance functions for the supported primitives.
//!
//! Each function expects the point already moved into the primitive's local
//! frame and returns a bare distance. Color is attached by whoever composes
//! the scene.

use glam::{Vec2, Vec3};

/// Sphere of `radius` centered at the origin.
#[must_use]
pub fn sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

/// Axis-aligned box centered at the origin.
///
/// Exact outside (the clamped length dominates) and inside (the negative
/// largest excess dominates).
#[must_use]
pub fn cuboid(p: Vec3, half_extents: Vec3) -> f32 {
    let q = p.abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
}

/// Capped cylinder along the local Y axis, spanning `[-half_height, half_height]`.
#[must_use]
pub fn cylinder(p: Vec3, radius: f32, half_height: f32) -> f32 {
    let d = Vec2::new(Vec2::new(p.x, p.z).length() - radius, p.y.abs() - half_height);
    d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length()
}

/// Torus lying in the local XZ plane.
#[must_use]
pub fn torus(p: Vec3, major_radius: f32, minor_radius: f32) -> f32 {
    let q = Vec2::new(Vec2::new(p.x, p.z).length() - major_radius, p.y);
    q.length() - minor_radius
}
