//! # SDF Studio Commands
//!
//! `render` ray marches a scene file or a built-in demo into a PNG and can
//! keep re-rendering while the scene file is edited. `wgsl` exports the same
//! scene as a standalone fragment shader, optionally with a binary uniform
//! snapshot for a GPU host.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use render::{Camera, RenderConfig, Renderer, ShadingConfig, SsaaLevel, ViewportRect, DEFAULT_FOCAL_LENGTH};
use tracing::{error, info};

use crate::camera::FlyCamera;
use crate::scene_file::{Demo, HostScene, SceneFile};
use crate::uniforms::FrameUniforms;
use crate::{watcher, wgsl};

#[derive(Parser, Debug)]
#[command(name = "sdf-studio", version, about = "Render signed distance field scenes on the CPU or export them as WGSL")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ray march a scene into a PNG
    Render(RenderArgs),
    /// Export a scene as a WGSL fragment shader
    Wgsl(WgslArgs),
}

/// Where the scene comes from; exactly one is required.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SceneSource {
    /// JSON scene file
    #[arg(long)]
    pub scene: Option<PathBuf>,
    /// Built-in demo scene
    #[arg(long, value_enum)]
    pub demo: Option<Demo>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SceneSource,
    #[arg(long, default_value_t = 640)]
    pub width: u32,
    #[arg(long, default_value_t = 480)]
    pub height: u32,
    /// Supersampling: off, 2, 4 or 8 (overrides the scene file)
    #[arg(long)]
    pub ssaa: Option<SsaaLevel>,
    /// Time snapshot in seconds for animated scenes
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,
    #[arg(short, long, default_value = "frame.png")]
    pub out: PathBuf,
    /// Re-render whenever the scene file changes
    #[arg(long)]
    pub watch: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WgslArgs {
    #[command(flatten)]
    pub source: SceneSource,
    /// Supersampling: off, 2, 4 or 8 (overrides the scene file)
    #[arg(long)]
    pub ssaa: Option<SsaaLevel>,
    /// Output file; stdout if omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Also write a 96-byte uniform snapshot for this viewport and time
    #[arg(long)]
    pub uniforms: Option<PathBuf>,
    #[arg(long, default_value_t = 640)]
    pub width: u32,
    #[arg(long, default_value_t = 480)]
    pub height: u32,
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,
}

/// Scene plus everything needed to frame and light it.
#[derive(Clone, Debug)]
pub struct LoadedScene {
    pub scene: HostScene,
    pub camera: FlyCamera,
    pub focal_length: f32,
    pub render: RenderConfig,
    pub shading: ShadingConfig,
}

impl LoadedScene {
    /// # Errors
    ///
    /// Fails if the scene file cannot be read or is invalid.
    pub fn load(source: &SceneSource, time: f32) -> Result<Self> {
        if let Some(path) = &source.scene {
            let file = SceneFile::load(path)?;
            return Ok(Self::from_file(file));
        }
        match source.demo {
            Some(demo) => {
                info!("Using demo scene '{demo}'");
                Ok(Self {
                    scene: demo.scene(time),
                    camera: FlyCamera::default(),
                    focal_length: DEFAULT_FOCAL_LENGTH,
                    render: RenderConfig::default(),
                    shading: ShadingConfig::default(),
                })
            }
            None => bail!("either --scene or --demo is required"),
        }
    }

    #[must_use]
    pub fn from_file(file: SceneFile) -> Self {
        let camera = file.camera.map(|c| c.fly_camera()).unwrap_or_default();
        let focal_length = file
            .camera
            .and_then(|c| c.focal_length)
            .unwrap_or(DEFAULT_FOCAL_LENGTH);
        Self {
            scene: HostScene::Tree(file.scene),
            camera,
            focal_length,
            render: file.render,
            shading: file.shading,
        }
    }

    #[must_use]
    pub fn camera(&self, width: u32, height: u32) -> Camera {
        Camera::new(self.camera.basis(), ViewportRect::from_size(width, height)).with_focal_length(self.focal_length)
    }
}

/// # Errors
///
/// Propagates failures of the selected command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => render(&args),
        Command::Wgsl(args) => export_wgsl(&args),
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    render_once(args)?;
    if !args.watch {
        return Ok(());
    }

    let path = args
        .source
        .scene
        .as_ref()
        .context("--watch needs a --scene file")?;
    let (_watcher, changes) = watcher::watch_scene(path)?;
    while changes.recv().is_ok() {
        // Editors tend to emit several events per save.
        while changes.try_recv().is_ok() {}
        if let Err(e) = render_once(args) {
            error!("Re-render failed: {e:#}");
        }
    }
    Ok(())
}

/// Load, render and save one frame.
///
/// # Errors
///
/// Fails on an invalid scene or viewport or if the PNG cannot be written.
pub fn render_once(args: &RenderArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("image size must be non-zero, got {}x{}", args.width, args.height);
    }
    let loaded = LoadedScene::load(&args.source, args.time)?;
    let camera = loaded.camera(args.width, args.height);
    let config = match args.ssaa {
        Some(level) => loaded.render.with_ssaa(level),
        None => loaded.render,
    };

    let renderer = Renderer::new(loaded.scene, config)?.with_shading(loaded.shading)?;
    let start = Instant::now();
    let frame = renderer.render(&camera, args.width, args.height);
    frame
        .save_png(&args.out)
        .with_context(|| format!("failed to save {}", args.out.display()))?;
    info!(
        "Rendered {}x{} at {}x{} SSAA in {:?} -> {}",
        args.width,
        args.height,
        config.sample_grid(),
        config.sample_grid(),
        start.elapsed(),
        args.out.display()
    );
    Ok(())
}

/// Generate the shader text for `args`.
///
/// # Errors
///
/// Fails if the scene cannot be loaded or has no exportable tree.
pub fn shader_source(args: &WgslArgs) -> Result<(String, LoadedScene)> {
    let loaded = LoadedScene::load(&args.source, args.time)?;
    let HostScene::Tree(tree) = &loaded.scene else {
        bail!("this demo is defined in code and has no scene tree to export");
    };
    let config = match args.ssaa {
        Some(level) => loaded.render.with_ssaa(level),
        None => loaded.render,
    };
    let source = wgsl::generate_with(tree, &config, &loaded.shading, loaded.focal_length);
    Ok((source, loaded))
}

fn export_wgsl(args: &WgslArgs) -> Result<()> {
    let (source, loaded) = shader_source(args)?;
    match &args.out {
        Some(path) => {
            fs::write(path, &source).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote shader to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(source.as_bytes()).context("failed to write shader to stdout")?;
        }
    }

    if let Some(path) = &args.uniforms {
        let camera = loaded.camera(args.width, args.height);
        let uniforms = FrameUniforms::new(&camera.viewport, 1.0, args.time, &camera.basis);
        fs::write(path, uniforms.as_bytes()).with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote uniform snapshot to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_with_demo() {
        let cli = Cli::try_parse_from(["sdf-studio", "render", "--demo", "car", "--ssaa", "4", "--width", "32"])
            .expect("valid args");
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.source.demo, Some(Demo::Car));
        assert_eq!(args.ssaa, Some(SsaaLevel::X4));
        assert_eq!(args.width, 32);
        assert_eq!(args.height, 480);
        assert!(!args.watch);
    }

    #[test]
    fn scene_and_demo_are_exclusive() {
        assert!(Cli::try_parse_from(["sdf-studio", "wgsl", "--demo", "car", "--scene", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["sdf-studio", "wgsl"]).is_err());
    }

    #[test]
    fn blob_has_no_shader_export() {
        let cli = Cli::try_parse_from(["sdf-studio", "wgsl", "--demo", "blob"]).expect("valid args");
        let Command::Wgsl(args) = cli.command else {
            panic!("expected wgsl");
        };
        assert!(shader_source(&args).is_err());
    }
}
