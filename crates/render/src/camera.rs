//! Pixel to ray mapping.
//!
//! The camera consumes an already-resolved orthonormal basis; computing that
//! basis from user input is the host's job.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Distance from the eye to the image plane in NDC units.
pub const DEFAULT_FOCAL_LENGTH: f32 = 1.8;

/// Camera position and orientation. Orthonormal by contract, not verified.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraBasis {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl CameraBasis {
    #[must_use]
    pub const fn new(position: Vec3, right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            right,
            up,
            forward,
        }
    }
}

/// Screen-space rectangle the renderer draws into.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl ViewportRect {
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Viewport anchored at the screen origin, one unit per pixel.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width as f32, height as f32))
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.size.x / self.size.y
    }

    /// Map a screen position to aspect-corrected NDC with +y up.
    #[must_use]
    pub fn ndc(&self, pixel: Vec2) -> Vec2 {
        (((pixel - self.origin) / self.size) * 2.0 - Vec2::ONE) * Vec2::new(self.aspect(), -1.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A view ray with the directions through the next pixel to the right and
/// the next pixel down, used to size the pixel's footprint on the ground.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrimaryRay {
    pub ray: Ray,
    pub dx: Vec3,
    pub dy: Vec3,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub basis: CameraBasis,
    pub viewport: ViewportRect,
    pub focal_length: f32,
}

impl Camera {
    #[must_use]
    pub const fn new(basis: CameraBasis, viewport: ViewportRect) -> Self {
        Self {
            basis,
            viewport,
            focal_length: DEFAULT_FOCAL_LENGTH,
        }
    }

    #[must_use]
    pub const fn with_focal_length(self, focal_length: f32) -> Self {
        Self {
            focal_length,
            ..self
        }
    }

    /// Unit direction through an NDC position.
    #[must_use]
    pub fn direction(&self, ndc: Vec2) -> Vec3 {
        let b = &self.basis;
        (ndc.x * b.right + ndc.y * b.up + self.focal_length * b.forward).normalize()
    }

    /// View ray through a screen position.
    #[must_use]
    pub fn primary_ray(&self, pixel: Vec2) -> PrimaryRay {
        let vp = &self.viewport;
        PrimaryRay {
            ray: Ray::new(self.basis.position, self.direction(vp.ndc(pixel))),
            dx: self.direction(vp.ndc(pixel + Vec2::X)),
            dy: self.direction(vp.ndc(pixel + Vec2::Y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_camera(width: u32, height: u32) -> Camera {
        Camera::new(
            CameraBasis::new(Vec3::new(0.0, 0.0, 3.5), Vec3::X, Vec3::Y, Vec3::NEG_Z),
            ViewportRect::from_size(width, height),
        )
    }

    #[test]
    fn ndc_corners_are_aspect_corrected_and_flipped() {
        let vp = ViewportRect::new(Vec2::new(10.0, 20.0), Vec2::new(200.0, 100.0));
        assert_eq!(vp.ndc(Vec2::new(10.0, 20.0)), Vec2::new(-2.0, 1.0));
        assert_eq!(vp.ndc(Vec2::new(210.0, 120.0)), Vec2::new(2.0, -1.0));
        assert_eq!(vp.ndc(Vec2::new(110.0, 70.0)), Vec2::ZERO);
    }

    #[test]
    fn center_pixel_looks_forward() {
        let cam = front_camera(64, 64);
        let primary = cam.primary_ray(Vec2::new(32.0, 32.0));
        assert!((primary.ray.direction - Vec3::NEG_Z).length() < 1e-6);
        assert_eq!(primary.ray.origin, Vec3::new(0.0, 0.0, 3.5));
    }

    #[test]
    fn differentials_step_right_and_down() {
        let cam = front_camera(64, 64);
        let primary = cam.primary_ray(Vec2::new(32.0, 32.0));
        assert!(primary.dx.x > primary.ray.direction.x);
        assert!(primary.dy.y < primary.ray.direction.y);
        assert!((primary.dx.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn focal_length_narrows_the_view() {
        let wide = front_camera(64, 64).with_focal_length(1.0);
        let narrow = front_camera(64, 64).with_focal_length(3.0);
        let corner = Vec2::new(0.0, 0.0);
        let w = wide.primary_ray(corner).ray.direction;
        let n = narrow.primary_ray(corner).ray.direction;
        assert!(n.dot(Vec3::NEG_Z) > w.dot(Vec3::NEG_Z));
    }
}
