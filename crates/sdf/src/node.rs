//! Serializable scene tree.
//!
//! An [`SdfNode`] describes a scene as nested operations. It evaluates
//! itself with the functions in [`crate::primitives`], [`crate::transform`]
//! and [`crate::csg`], so a tree and a hand-written closure built from the
//! same calls produce identical samples. Host code can also walk the tree to
//! emit shader source.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::csg;
use crate::error::SceneError;
use crate::primitives;
use crate::sample::{Color3, SdfSample, DEFAULT_COLOR};
use crate::scene::Scene;
use crate::transform::{self, Axis};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SdfNode {
    Sphere {
        radius: f32,
    },
    /// Axis-aligned box; `size` holds half extents.
    #[serde(rename = "box", alias = "cuboid")]
    Cuboid {
        size: Vec3,
    },
    /// Y-aligned capped cylinder; `height` is the half height.
    Cylinder {
        radius: f32,
        height: f32,
    },
    Torus {
        major_radius: f32,
        minor_radius: f32,
    },

    /// `smooth > 0` blends with that radius, `0` is a hard union.
    Union {
        a: Box<SdfNode>,
        b: Box<SdfNode>,
        #[serde(default)]
        smooth: f32,
    },
    Subtract {
        a: Box<SdfNode>,
        b: Box<SdfNode>,
        #[serde(default)]
        smooth: f32,
    },
    Intersect {
        a: Box<SdfNode>,
        b: Box<SdfNode>,
    },

    Translate {
        target: Box<SdfNode>,
        offset: Vec3,
    },
    /// Rotates the child by `angle_deg` about the dominant component of `axis`.
    Rotate {
        target: Box<SdfNode>,
        axis: Vec3,
        angle_deg: f32,
    },
    /// Mirrors the child across every plane whose `axis` component is set.
    Mirror {
        target: Box<SdfNode>,
        axis: Vec3,
    },
    Color {
        target: Box<SdfNode>,
        color: Color3,
    },
}

impl SdfNode {
    #[must_use]
    pub const fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    #[must_use]
    pub const fn cuboid(size: Vec3) -> Self {
        Self::Cuboid { size }
    }

    #[must_use]
    pub const fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder { radius, height }
    }

    #[must_use]
    pub const fn torus(major_radius: f32, minor_radius: f32) -> Self {
        Self::Torus {
            major_radius,
            minor_radius,
        }
    }

    #[must_use]
    pub fn union(self, other: SdfNode) -> Self {
        self.smooth_union(other, 0.0)
    }

    #[must_use]
    pub fn smooth_union(self, other: SdfNode, k: f32) -> Self {
        Self::Union {
            a: Box::new(self),
            b: Box::new(other),
            smooth: k,
        }
    }

    #[must_use]
    pub fn subtract(self, other: SdfNode) -> Self {
        self.smooth_subtract(other, 0.0)
    }

    #[must_use]
    pub fn smooth_subtract(self, other: SdfNode, k: f32) -> Self {
        Self::Subtract {
            a: Box::new(self),
            b: Box::new(other),
            smooth: k,
        }
    }

    #[must_use]
    pub fn intersect(self, other: SdfNode) -> Self {
        Self::Intersect {
            a: Box::new(self),
            b: Box::new(other),
        }
    }

    #[must_use]
    pub fn translate(self, offset: Vec3) -> Self {
        Self::Translate {
            target: Box::new(self),
            offset,
        }
    }

    #[must_use]
    pub fn rotate(self, axis: Axis, angle_deg: f32) -> Self {
        Self::Rotate {
            target: Box::new(self),
            axis: axis.unit(),
            angle_deg,
        }
    }

    #[must_use]
    pub fn rotate_x(self, angle_deg: f32) -> Self {
        self.rotate(Axis::X, angle_deg)
    }

    #[must_use]
    pub fn rotate_y(self, angle_deg: f32) -> Self {
        self.rotate(Axis::Y, angle_deg)
    }

    #[must_use]
    pub fn rotate_z(self, angle_deg: f32) -> Self {
        self.rotate(Axis::Z, angle_deg)
    }

    #[must_use]
    pub fn mirror(self, axis: Axis) -> Self {
        Self::Mirror {
            target: Box::new(self),
            axis: axis.unit(),
        }
    }

    #[must_use]
    pub fn mirror_x(self) -> Self {
        self.mirror(Axis::X)
    }

    #[must_use]
    pub fn mirror_y(self) -> Self {
        self.mirror(Axis::Y)
    }

    #[must_use]
    pub fn mirror_z(self) -> Self {
        self.mirror(Axis::Z)
    }

    #[must_use]
    pub fn color(self, color: Color3) -> Self {
        Self::Color {
            target: Box::new(self),
            color,
        }
    }

    /// Operation name as it appears in scene files.
    #[must_use]
    pub const fn op_name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Cuboid { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
            Self::Torus { .. } => "torus",
            Self::Union { .. } => "union",
            Self::Subtract { .. } => "subtract",
            Self::Intersect { .. } => "intersect",
            Self::Translate { .. } => "translate",
            Self::Rotate { .. } => "rotate",
            Self::Mirror { .. } => "mirror",
            Self::Color { .. } => "color",
        }
    }

    /// Number of primitive leaves in the tree.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match self {
            Self::Sphere { .. } | Self::Cuboid { .. } | Self::Cylinder { .. } | Self::Torus { .. } => 1,
            Self::Union { a, b, .. } | Self::Subtract { a, b, .. } | Self::Intersect { a, b } => {
                a.primitive_count() + b.primitive_count()
            }
            Self::Translate { target, .. }
            | Self::Rotate { target, .. }
            | Self::Mirror { target, .. }
            | Self::Color { target, .. } => target.primitive_count(),
        }
    }

    /// Evaluate the tree at `p`.
    #[must_use]
    pub fn eval(&self, p: Vec3) -> SdfSample {
        match self {
            Self::Sphere { radius } => SdfSample::new(primitives::sphere(p, *radius), DEFAULT_COLOR),
            Self::Cuboid { size } => SdfSample::new(primitives::cuboid(p, *size), DEFAULT_COLOR),
            Self::Cylinder { radius, height } => {
                SdfSample::new(primitives::cylinder(p, *radius, *height), DEFAULT_COLOR)
            }
            Self::Torus {
                major_radius,
                minor_radius,
            } => SdfSample::new(primitives::torus(p, *major_radius, *minor_radius), DEFAULT_COLOR),

            Self::Union { a, b, smooth } => {
                let (a, b) = (a.eval(p), b.eval(p));
                if *smooth > 0.0 {
                    csg::smooth_union(a, b, *smooth)
                } else {
                    csg::union(a, b)
                }
            }
            Self::Subtract { a, b, smooth } => {
                let (a, b) = (a.eval(p), b.eval(p));
                if *smooth > 0.0 {
                    csg::smooth_subtract(a, b, *smooth)
                } else {
                    csg::subtract(a, b)
                }
            }
            Self::Intersect { a, b } => csg::intersect(a.eval(p), b.eval(p)),

            Self::Translate { target, offset } => target.eval(transform::translate(p, *offset)),
            // Inverse-rotate the sample point so the child appears rotated by +angle.
            Self::Rotate {
                target,
                axis,
                angle_deg,
            } => target.eval(Axis::dominant(*axis).rotate(p, (-angle_deg).to_radians())),
            Self::Mirror { target, axis } => {
                target.eval(transform::mirror(p, axis.cmpgt(Vec3::splat(0.9))))
            }
            Self::Color { target, color } => csg::set_color(target.eval(p), *color),
        }
    }

    /// Check every parameter in the tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`SceneError`] found in depth-first order.
    pub fn validate(&self) -> Result<(), SceneError> {
        let op = self.op_name();
        match self {
            Self::Sphere { radius } => positive(op, "radius", *radius),
            Self::Cuboid { size } => {
                positive(op, "size.x", size.x)?;
                positive(op, "size.y", size.y)?;
                positive(op, "size.z", size.z)
            }
            Self::Cylinder { radius, height } => {
                positive(op, "radius", *radius)?;
                positive(op, "height", *height)
            }
            Self::Torus {
                major_radius,
                minor_radius,
            } => {
                positive(op, "major_radius", *major_radius)?;
                positive(op, "minor_radius", *minor_radius)
            }
            Self::Union { a, b, smooth } | Self::Subtract { a, b, smooth } => {
                if !smooth.is_finite() {
                    return Err(SceneError::NonFinite { op, field: "smooth" });
                }
                if *smooth < 0.0 {
                    return Err(SceneError::NegativeSmoothing { op, value: *smooth });
                }
                a.validate()?;
                b.validate()
            }
            Self::Intersect { a, b } => {
                a.validate()?;
                b.validate()
            }
            Self::Translate { target, offset } => {
                finite_vec(op, "offset", *offset)?;
                target.validate()
            }
            Self::Rotate {
                target,
                axis,
                angle_deg,
            } => {
                finite_vec(op, "axis", *axis)?;
                if !angle_deg.is_finite() {
                    return Err(SceneError::NonFinite { op, field: "angle_deg" });
                }
                target.validate()
            }
            Self::Mirror { target, axis } => {
                finite_vec(op, "axis", *axis)?;
                target.validate()
            }
            Self::Color { target, color } => {
                finite_vec(op, "color", *color)?;
                target.validate()
            }
        }
    }
}

impl Scene for SdfNode {
    fn map(&self, p: Vec3) -> SdfSample {
        self.eval(p)
    }
}

fn positive(op: &'static str, field: &'static str, value: f32) -> Result<(), SceneError> {
    if !value.is_finite() {
        return Err(SceneError::NonFinite { op, field });
    }
    if value <= 0.0 {
        return Err(SceneError::NonPositive { op, field, value });
    }
    Ok(())
}

fn finite_vec(op: &'static str, field: &'static str, v: Vec3) -> Result<(), SceneError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SceneError::NonFinite { op, field })
    }
}
