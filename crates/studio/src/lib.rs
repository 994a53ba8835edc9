#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::missing_panics_doc
)]
//! # SDF Studio
//!
//! Host side of the SDF renderer: everything outside the pure
//! scene-to-pixels core.
//!
//! ## Modules
//!
//! -   **[`camera`]:** yaw/pitch fly camera resolved into the renderer's
//!     orthonormal [`render::CameraBasis`].
//! -   **[`scene_file`]:** JSON scene files and the built-in `car` and `blob`
//!     demos.
//! -   **[`wgsl`]:** turns an [`sdf::SdfNode`] tree into a complete fragment
//!     shader with the same operators, lighting and grid as the CPU path.
//! -   **[`uniforms`]:** the per-frame uniform block that shader expects.
//! -   **[`watcher`]:** file watching for `render --watch`.
//! -   **[`app`]:** the command-line interface tying it together.

pub mod app;
pub mod camera;
pub mod scene_file;
pub mod uniforms;
pub mod watcher;
pub mod wgsl;

pub use camera::{CameraSettings, FlyCamera};
pub use scene_file::{Demo, HostScene, SceneFile};
pub use uniforms::FrameUniforms;
