//! Scene files and built-in demo scenes.
//!
//! A scene file is JSON holding an [`SdfNode`] tree under `"scene"` and
//! optional `"camera"`, `"render"` and `"shading"` blocks. Omitted blocks and
//! omitted fields fall back to their defaults.

use std::f32::consts::TAU;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use render::{RenderConfig, ShadingConfig};
use sdf::{csg, primitives, Scene, SdfNode, SdfSample};
use serde::{Deserialize, Serialize};

use crate::camera::CameraSettings;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub scene: SdfNode,
    #[serde(default)]
    pub camera: Option<CameraSettings>,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub shading: ShadingConfig,
}

impl SceneFile {
    /// Wrap a tree with default camera and settings.
    #[must_use]
    pub fn new(scene: SdfNode) -> Self {
        Self {
            scene,
            camera: None,
            render: RenderConfig::default(),
            shading: ShadingConfig::default(),
        }
    }

    /// Parse and validate.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or on any invalid tree, render or shading value.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: Self = serde_json::from_str(text).context("failed to parse scene JSON")?;
        file.validate()?;
        Ok(file)
    }

    /// # Errors
    ///
    /// Fails if the file cannot be read or does not hold a valid scene.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        let file = Self::from_json(&text).with_context(|| format!("invalid scene file {}", path.display()))?;
        tracing::info!(
            "Loaded scene {:?}: {} primitives",
            path.file_name().unwrap_or_default(),
            file.scene.primitive_count()
        );
        Ok(file)
    }

    /// # Errors
    ///
    /// Returns the first problem found in the tree, camera or configs.
    pub fn validate(&self) -> Result<()> {
        self.scene.validate()?;
        self.render.validate()?;
        self.shading.validate()?;
        if let Some(camera) = &self.camera {
            if !(camera.position.is_finite() && camera.target.is_finite()) {
                anyhow::bail!("camera position and target must be finite");
            }
            if let Some(f) = camera.focal_length {
                if !(f.is_finite() && f > 0.0) {
                    anyhow::bail!("camera focal_length must be positive, got {f}");
                }
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Only fails if serialization itself fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize scene")
    }
}

/// Built-in scenes selectable from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Demo {
    /// Box body on four mirrored torus wheels.
    Car,
    /// Three spheres orbiting and melting into each other over time.
    Blob,
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Car => f.write_str("car"),
            Self::Blob => f.write_str("blob"),
        }
    }
}

impl Demo {
    /// Scene for the time snapshot `time` (seconds).
    #[must_use]
    pub fn scene(self, time: f32) -> HostScene {
        match self {
            Self::Car => HostScene::Tree(car()),
            Self::Blob => HostScene::Blob { time },
        }
    }

    /// Scene tree, for demos that have one.
    #[must_use]
    pub fn tree(self) -> Option<SdfNode> {
        match self {
            Self::Car => Some(car()),
            Self::Blob => None,
        }
    }
}

/// Box body on four torus wheels, one wheel mirrored into all four corners.
#[must_use]
pub fn car() -> SdfNode {
    let body = SdfNode::cuboid(Vec3::new(1.0, 0.2, 0.5)).color(Vec3::splat(0.8));
    let wheel = SdfNode::torus(0.4, 0.1).rotate_x(90.0).color(Vec3::splat(0.2));
    let wheels = wheel.translate(Vec3::new(1.0, 0.0, 0.6)).mirror_x().mirror_z();
    body.union(wheels)
}

const BLOB_COLORS: [Vec3; 3] = [
    Vec3::new(0.95, 0.3, 0.25),
    Vec3::new(0.3, 0.85, 0.4),
    Vec3::new(0.25, 0.45, 0.95),
];

/// Animated metaball-like scene; a pure function of `p` for a fixed `time`.
#[must_use]
pub fn blob(p: Vec3, time: f32) -> SdfSample {
    let mut result: Option<SdfSample> = None;
    for (i, color) in BLOB_COLORS.iter().enumerate() {
        let phase = time + i as f32 * TAU / 3.0;
        let center = Vec3::new(
            0.7 * phase.sin(),
            0.25 * (1.7 * phase).sin() + 0.1,
            0.7 * phase.cos(),
        );
        let ball = SdfSample::new(primitives::sphere(p - center, 0.45), *color);
        result = Some(match result {
            Some(acc) => csg::smooth_union(acc, ball, 0.35),
            None => ball,
        });
    }
    let ring = SdfSample::new(primitives::torus(p + Vec3::new(0.0, 0.6, 0.0), 1.1, 0.08), Vec3::splat(0.75));
    match result {
        Some(balls) => csg::smooth_union(balls, ring, 0.2),
        None => ring,
    }
}

/// Anything the host can hand to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum HostScene {
    Tree(SdfNode),
    Blob { time: f32 },
}

impl Scene for HostScene {
    fn map(&self, p: Vec3) -> SdfSample {
        match self {
            Self::Tree(node) => node.eval(p),
            Self::Blob { time } => blob(p, *time),
        }
    }
}
