//! Per-frame uniform block matching `Uniforms` in the generated shader.

use bytemuck::{Pod, Zeroable};
use render::{CameraBasis, ViewportRect};

/// Six `vec4<f32>` rows; the `w` lanes are padding except `cam_pos.w = 1`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Viewport origin and size in physical pixels.
    pub rect_data: [f32; 4],
    /// Elapsed seconds in `x`.
    pub time_data: [f32; 4],
    pub cam_pos: [f32; 4],
    pub cam_right: [f32; 4],
    pub cam_up: [f32; 4],
    pub cam_front: [f32; 4],
}

impl FrameUniforms {
    /// Snapshot for one frame. `pixels_per_point` scales a logical viewport
    /// to physical pixels.
    #[must_use]
    pub fn new(viewport: &ViewportRect, pixels_per_point: f32, time: f32, basis: &CameraBasis) -> Self {
        let origin = viewport.origin * pixels_per_point;
        let size = viewport.size * pixels_per_point;
        Self {
            rect_data: [origin.x, origin.y, size.x, size.y],
            time_data: [time, 0.0, 0.0, 0.0],
            cam_pos: basis.position.extend(1.0).to_array(),
            cam_right: basis.right.extend(0.0).to_array(),
            cam_up: basis.up.extend(0.0).to_array(),
            cam_front: basis.forward.extend(0.0).to_array(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn layout_is_six_vec4s() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 96);
        assert_eq!(std::mem::align_of::<FrameUniforms>(), 4);
    }

    #[test]
    fn packs_viewport_time_and_basis() {
        let basis = CameraBasis::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X, Vec3::Y, Vec3::NEG_Z);
        let vp = ViewportRect::new(Vec2::new(10.0, 20.0), Vec2::new(300.0, 200.0));
        let u = FrameUniforms::new(&vp, 2.0, 1.5, &basis);
        assert_eq!(u.rect_data, [20.0, 40.0, 600.0, 400.0]);
        assert_eq!(u.time_data[0], 1.5);
        assert_eq!(u.cam_pos, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.cam_front, [0.0, 0.0, -1.0, 0.0]);

        let bytes = u.as_bytes();
        assert_eq!(bytes.len(), 96);
        assert_eq!(&bytes[16..20], &1.5_f32.to_ne_bytes());
    }
}
