//! Yaw/pitch camera that resolves to the renderer's orthonormal basis.

use glam::Vec3;
use render::CameraBasis;
use serde::{Deserialize, Serialize};

/// Pitch is kept just short of straight up/down so `front x Y` never vanishes.
pub const PITCH_LIMIT: f32 = 1.5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    /// Radians around +Y, measured from +X towards +Z.
    pub yaw: f32,
    /// Radians above the horizon.
    pub pitch: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::look_at(Vec3::splat(5.0), Vec3::ZERO)
    }
}

impl FlyCamera {
    #[must_use]
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Camera at `position` facing `target`. Coincident points face +X.
    #[must_use]
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return Self::new(position, 0.0, 0.0);
        }
        Self::new(position, dir.z.atan2(dir.x), dir.y.clamp(-1.0, 1.0).asin())
    }

    #[must_use]
    pub fn front(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cy * cp, sp, sy * cp).normalize()
    }

    #[must_use]
    pub fn basis(&self) -> CameraBasis {
        let front = self.front();
        let right = front.cross(Vec3::Y).normalize();
        let up = right.cross(front).normalize();
        CameraBasis::new(self.position, right, up, front)
    }
}

/// Camera block of a scene file.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub position: Vec3,
    #[serde(default)]
    pub target: Vec3,
    #[serde(default)]
    pub focal_length: Option<f32>,
}

impl CameraSettings {
    #[must_use]
    pub fn fly_camera(&self) -> FlyCamera {
        FlyCamera::look_at(self.position, self.target)
    }
}
