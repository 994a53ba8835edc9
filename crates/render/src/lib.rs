#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::similar_names
)]
//! # SDF Studio Renderer
//!
//! A CPU sphere tracer for anything implementing [`sdf::Scene`].
//!
//! Each pixel is supersampled on an `N x N` grid. Every sub-sample marches a
//! ray through the distance field; hits are lit with a point light plus a
//! rim term, misses fall through to a background with an anti-aliased grid
//! on the ground plane. Frames are shaded row-parallel on the rayon pool.
//!
//! ```rust,no_run
//! use glam::Vec3;
//! use render::{Camera, CameraBasis, RenderConfig, Renderer, ViewportRect};
//! use sdf::{primitives, SdfSample};
//!
//! let scene = |p: Vec3| SdfSample::new(primitives::sphere(p, 0.6), Vec3::ONE);
//! let renderer = Renderer::new(scene, RenderConfig::preview()).expect("valid config");
//! let camera = Camera::new(
//!     CameraBasis::new(Vec3::new(0.0, 0.0, 3.5), Vec3::X, Vec3::Y, Vec3::NEG_Z),
//!     ViewportRect::from_size(320, 240),
//! );
//! let frame = renderer.render(&camera, 320, 240);
//! frame.save_png(std::path::Path::new("sphere.png")).expect("write png");
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod normal;
pub mod sampler;
pub mod shading;
pub mod tracer;

use glam::{Vec2, Vec4};
use sdf::Scene;

pub use camera::{Camera, CameraBasis, PrimaryRay, Ray, ViewportRect, DEFAULT_FOCAL_LENGTH};
pub use config::{RenderConfig, SsaaLevel, MAX_SUPERSAMPLE_GRID};
pub use error::RenderError;
pub use frame::{render_frame, Framebuffer};
pub use normal::estimate_normal;
pub use shading::{ShadingConfig, SurfacePoint};
pub use tracer::{march, March};

/// A scene bundled with validated render and shading settings.
pub struct Renderer<S> {
    scene: S,
    config: RenderConfig,
    shading: ShadingConfig,
}

impl<S: Scene> Renderer<S> {
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidConfig`] if `config` fails validation.
    pub fn new(scene: S, config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        tracing::debug!(
            max_steps = config.max_march_steps,
            max_distance = config.max_distance,
            ssaa = config.sample_grid(),
            "renderer configured"
        );
        Ok(Self {
            scene,
            config,
            shading: ShadingConfig::default(),
        })
    }

    /// # Errors
    ///
    /// Returns [`RenderError::InvalidShading`] if `shading` fails validation.
    pub fn with_shading(mut self, shading: ShadingConfig) -> Result<Self, RenderError> {
        shading.validate()?;
        self.shading = shading;
        Ok(self)
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn shading(&self) -> &ShadingConfig {
        &self.shading
    }

    /// March a single ray without shading it.
    pub fn trace(&self, ray: &Ray) -> March {
        march(&self.scene, ray, &self.config)
    }

    /// Final color of the pixel at screen position `pixel`, alpha 1.
    pub fn shade_pixel(&self, camera: &Camera, pixel: Vec2) -> Vec4 {
        sampler::shade_pixel(&self.scene, camera, pixel, &self.config, &self.shading).extend(1.0)
    }

    pub fn render(&self, camera: &Camera, width: u32, height: u32) -> Framebuffer {
        render_frame(&self.scene, camera, width, height, &self.config, &self.shading)
    }
}
