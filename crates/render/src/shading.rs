//! Local lighting for hits and the background/ground-grid for misses.
//!
//! Lit color is `c * (diffuse + ambient) + specular_color * specular + rim_color * fresnel`.
//! Misses show the background with an analytic grid on the `y = 0` plane,
//! anti-aliased by the pixel's footprint on that plane.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::PrimaryRay;
use crate::error::RenderError;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// World-space point light.
    pub light_position: Vec3,
    /// Added to the diffuse term so unlit faces never go black.
    pub ambient: f32,
    /// Phong exponent.
    pub shininess: f32,
    pub specular_color: Vec3,
    /// Scale of the `(1 - n.v)^5` rim term.
    pub rim_strength: f32,
    pub rim_color: Vec3,
    pub background: Vec3,
    pub grid_color: Vec3,
    /// World units between grid lines.
    pub grid_spacing: f32,
    /// Upper bound on grid opacity.
    pub grid_alpha: f32,
    /// Exponential fade of the grid with distance along the ray.
    pub grid_decay: f32,
    /// Tint of the `z = 0` line (the X axis).
    pub axis_x_color: Vec3,
    /// Tint of the `x = 0` line (the Z axis).
    pub axis_z_color: Vec3,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            light_position: Vec3::new(4.0, 6.0, 5.0),
            ambient: 0.1,
            shininess: 32.0,
            specular_color: Vec3::splat(0.5),
            rim_strength: 0.25,
            rim_color: Vec3::ONE,
            background: Vec3::new(0.11, 0.12, 0.14),
            grid_color: Vec3::splat(0.55),
            grid_spacing: 1.0,
            grid_alpha: 0.3,
            grid_decay: 0.08,
            axis_x_color: Vec3::new(0.9, 0.25, 0.25),
            axis_z_color: Vec3::new(0.25, 0.45, 0.95),
        }
    }
}

impl ShadingConfig {
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidShading`] naming the first bad field.
    pub fn validate(&self) -> Result<(), RenderError> {
        let vectors = [
            self.light_position,
            self.specular_color,
            self.rim_color,
            self.background,
            self.grid_color,
            self.axis_x_color,
            self.axis_z_color,
        ];
        if !vectors.iter().all(|v| v.is_finite()) {
            return Err(RenderError::InvalidShading("colors and light position must be finite"));
        }
        if !(self.shininess.is_finite() && self.shininess > 0.0) {
            return Err(RenderError::InvalidShading("shininess must be positive"));
        }
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(RenderError::InvalidShading("grid_spacing must be positive"));
        }
        if !(0.0..=1.0).contains(&self.grid_alpha) {
            return Err(RenderError::InvalidShading("grid_alpha must be within [0, 1]"));
        }
        if !(self.grid_decay.is_finite() && self.grid_decay >= 0.0) {
            return Err(RenderError::InvalidShading("grid_decay must be non-negative"));
        }
        if !(self.ambient.is_finite() && self.rim_strength.is_finite()) {
            return Err(RenderError::InvalidShading("ambient and rim_strength must be finite"));
        }
        Ok(())
    }
}

/// Everything the lighting model needs about a hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfacePoint {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Vec3,
    /// Unit vector from the surface towards the eye.
    pub view_dir: Vec3,
}

/// Coverage of the ground grid for one ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridSample {
    pub color: Vec3,
    /// Always within `[0, grid_alpha]`.
    pub alpha: f32,
    /// Ray parameter of the `y = 0` crossing.
    pub t_plane: f32,
}

fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

fn fract_gl(v: Vec2) -> Vec2 {
    v - v.floor()
}

#[must_use]
pub fn shade_surface(surface: &SurfacePoint, config: &ShadingConfig) -> Vec3 {
    let n = surface.normal;
    let v = surface.view_dir;
    let light_dir = (config.light_position - surface.position).normalize_or_zero();

    let diffuse = n.dot(light_dir).max(0.0);
    let specular = v.dot(reflect(-light_dir, n)).max(0.0).powf(config.shininess);
    let fresnel = (1.0 - n.dot(v).max(0.0)).powi(5) * config.rim_strength;

    surface.color * (diffuse + config.ambient) + config.specular_color * specular + config.rim_color * fresnel
}

/// Grid contribution where `primary` crosses the ground plane in front of
/// the eye, or `None` when it does not (or the footprint is unusable).
#[must_use]
pub fn ground_grid(primary: &PrimaryRay, max_distance: f32, config: &ShadingConfig) -> Option<GridSample> {
    let o = primary.ray.origin;
    let d = primary.ray.direction;
    let t_plane = -o.y / d.y;
    if !(t_plane > 0.0 && t_plane < max_distance) {
        return None;
    }

    // Pixel footprint on the plane from the neighbouring rays.
    let dpdx = o.y * (d / d.y - primary.dx / primary.dx.y);
    let dpdy = o.y * (d / d.y - primary.dy / primary.dy.y);
    let footprint = (Vec2::new(dpdx.x, dpdx.z).abs() + Vec2::new(dpdy.x, dpdy.z).abs()) / config.grid_spacing;
    if !footprint.is_finite() {
        return None;
    }
    let footprint = footprint.max(Vec2::splat(1e-4));

    let hit = o + d * t_plane;
    let coord = Vec2::new(hit.x, hit.z) / config.grid_spacing;
    let dist_to_line = (fract_gl(coord - 0.5) - 0.5).abs() / footprint;
    let line = 1.0 - dist_to_line.min_element().min(1.0);

    // Lines thinner than a pixel cell alias; fade them out instead.
    let resolvable = (1.0 - footprint.max_element()).clamp(0.0, 1.0);
    let fade = (-t_plane * config.grid_decay).exp();
    let alpha = (line * resolvable * fade * config.grid_alpha).clamp(0.0, config.grid_alpha);

    let on_z_axis = 1.0 - (coord.x.abs() / footprint.x).min(1.0);
    let on_x_axis = 1.0 - (coord.y.abs() / footprint.y).min(1.0);
    let color = config
        .grid_color
        .lerp(config.axis_z_color, on_z_axis)
        .lerp(config.axis_x_color, on_x_axis);

    Some(GridSample { color, alpha, t_plane })
}

/// Background with the ground grid blended over it.
#[must_use]
pub fn shade_miss(primary: &PrimaryRay, max_distance: f32, config: &ShadingConfig) -> Vec3 {
    match ground_grid(primary, max_distance, config) {
        Some(grid) => config.background.lerp(grid.color, grid.alpha),
        None => config.background,
    }
}
