//! Whole-frame rendering.
//!
//! Rows are shaded in parallel; every worker only reads the scene, camera
//! and configs, so there is nothing to synchronize beyond handing out rows.

use std::path::Path;
use std::time::Instant;

use glam::{Vec2, Vec4};
use rayon::prelude::*;
use sdf::Scene;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::sampler::shade_pixel;
use crate::shading::ShadingConfig;

/// Row-major pixels, top row first, alpha fixed to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl Framebuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::new(0.0, 0.0, 0.0, 1.0); width as usize * height as usize],
        }
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Vec4> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Clamp to `[0, 1]` and quantize to RGBA8.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.to_array())
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`RenderError::Image`] if the PNG cannot be encoded or written.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Render `width x height` pixels covering the camera's viewport.
#[must_use]
pub fn render_frame<S: Scene + ?Sized>(
    scene: &S,
    camera: &Camera,
    width: u32,
    height: u32,
    config: &RenderConfig,
    shading: &ShadingConfig,
) -> Framebuffer {
    let _span = tracing::info_span!("render_frame", width, height, ssaa = config.sample_grid()).entered();
    let start = Instant::now();

    let mut frame = Framebuffer::new(width, height);
    if width == 0 || height == 0 {
        return frame;
    }

    let viewport = camera.viewport;
    let pixel_size = viewport.size / Vec2::new(width as f32, height as f32);

    frame
        .pixels
        .par_chunks_exact_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let pixel = viewport.origin + (Vec2::new(x as f32, y as f32) + 0.5) * pixel_size;
                let color = shade_pixel(scene, camera, pixel, config, shading);
                *out = color.extend(1.0);
            }
        });

    tracing::debug!("Frame rendered in {:?}", start.elapsed());
    frame
}
