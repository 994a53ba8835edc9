#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
//! # SDF Studio Geometry
//!
//! Distance-field building blocks for the SDF studio renderer.
//!
//! Everything in this crate is a pure function of a sample point. Scenes are
//! assembled by moving the point into a primitive's local frame with the
//! [`transform`] helpers, evaluating a distance from [`primitives`], tagging
//! it with a material color and folding the results together with the
//! [`csg`] combinators.
//!
//! ## Key Components
//!
//! -   **Samples:** [`SdfSample`] pairs a signed distance with the color of the
//!     branch that produced it, so material survives CSG selection.
//! -   **Scene contract:** the [`Scene`] trait is the single extension point the
//!     renderer consumes. Any `Fn(Vec3) -> SdfSample + Sync` closure is a scene.
//! -   **Scene tree:** [`SdfNode`] is a serializable description of a scene that
//!     evaluates itself through the same primitives and combinators.
//!
//! ```rust
//! use glam::Vec3;
//! use sdf::{csg, primitives, Scene, SdfSample};
//!
//! let scene = |p: Vec3| {
//!     let ball = SdfSample::new(primitives::sphere(p, 0.6), Vec3::new(1.0, 0.2, 0.2));
//!     let slab = SdfSample::new(primitives::cuboid(p, Vec3::new(1.0, 0.1, 1.0)), Vec3::ONE);
//!     csg::smooth_union(ball, slab, 0.2)
//! };
//! assert!(scene.map(Vec3::ZERO).distance < 0.0);
//! ```

pub mod csg;
pub mod error;
pub mod node;
pub mod primitives;
pub mod sample;
pub mod scene;
pub mod transform;

pub use error::SceneError;
pub use node::SdfNode;
pub use sample::{Color3, Direction3, Point3, SdfSample, DEFAULT_COLOR};
pub use scene::Scene;
pub use transform::Axis;
