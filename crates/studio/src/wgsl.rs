//! WGSL export of a scene tree.
//!
//! The tree becomes a straight-line `map` function with one `let` per
//! transform or combinator, so shared sub-expressions are never duplicated.
//! Operator semantics match [`SdfNode::eval`] one for one.

use glam::{Vec2, Vec3};
use render::{RenderConfig, ShadingConfig, SsaaLevel, DEFAULT_FOCAL_LENGTH};
use sdf::{Axis, SdfNode, DEFAULT_COLOR};

const TEMPLATE: &str = include_str!("shader_template.wgsl");
const CONSTANTS_MARKER: &str = "// {{CONSTANTS_HERE}}";
const MAP_MARKER: &str = "// {{MAP_FUNCTION_HERE}}";

/// Full shader for `root` with default tuning and the given SSAA level.
#[must_use]
pub fn generate(root: &SdfNode, ssaa: SsaaLevel) -> String {
    generate_with(
        root,
        &RenderConfig::default().with_ssaa(ssaa),
        &ShadingConfig::default(),
        DEFAULT_FOCAL_LENGTH,
    )
}

/// Full shader with tuning constants taken from the CPU configs and the
/// camera's focal length, so both paths render the same image.
#[must_use]
pub fn generate_with(root: &SdfNode, config: &RenderConfig, shading: &ShadingConfig, focal_length: f32) -> String {
    let body = format!("{}\n{}", map_function(root), fragment_entry(config.sample_grid()));
    TEMPLATE
        .replace(CONSTANTS_MARKER, &constants(config, shading, focal_length))
        .replace(MAP_MARKER, &body)
}

/// `struct SdfResult` and `fn map` for `root`.
#[must_use]
pub fn map_function(root: &SdfNode) -> String {
    let mut emitter = Emitter::default();
    let result = emitter.node(root, "p0");
    format!(
        "struct SdfResult {{\n    dist: f32,\n    color: vec3<f32>,\n}};\n\n\
         fn map(p0: vec3<f32>) -> SdfResult {{\n{}    return {result};\n}}\n",
        emitter.body
    )
}

fn fragment_entry(n: u32) -> String {
    if n <= 1 {
        return "@fragment\n\
                fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {\n    \
                return vec4<f32>(render_pixel(in.clip_position.xy), 1.0);\n\
                }\n"
            .to_string();
    }
    let inv = float(1.0 / n as f32);
    let inv_count = float(1.0 / (u64::from(n) * u64::from(n)) as f32);
    format!(
        "@fragment\n\
         fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {{\n    \
         var total = vec3<f32>(0.0, 0.0, 0.0);\n    \
         for (var iy: i32 = 0; iy < {n}; iy = iy + 1) {{\n        \
         for (var ix: i32 = 0; ix < {n}; ix = ix + 1) {{\n            \
         let offset = (vec2<f32>(f32(ix), f32(iy)) + 0.5) * {inv} - 0.5;\n            \
         total = total + render_pixel(in.clip_position.xy + offset);\n        \
         }}\n    \
         }}\n    \
         return vec4<f32>(total * {inv_count}, 1.0);\n\
         }}\n"
    )
}

fn constants(config: &RenderConfig, shading: &ShadingConfig, focal_length: f32) -> String {
    let max_steps = i32::try_from(config.max_march_steps).unwrap_or(i32::MAX);
    [
        format!("const MAX_STEPS: i32 = {max_steps};"),
        format!("const HIT_EPSILON: f32 = {};", float(config.hit_epsilon)),
        format!("const MAX_DISTANCE: f32 = {};", float(config.max_distance)),
        format!("const NORMAL_EPSILON: f32 = {};", float(config.normal_epsilon)),
        format!("const FOCAL_LENGTH: f32 = {};", float(focal_length)),
        format!("const LIGHT_POSITION: vec3<f32> = {};", vec3(shading.light_position)),
        format!("const AMBIENT: f32 = {};", float(shading.ambient)),
        format!("const SHININESS: f32 = {};", float(shading.shininess)),
        format!("const SPECULAR_COLOR: vec3<f32> = {};", vec3(shading.specular_color)),
        format!("const RIM_STRENGTH: f32 = {};", float(shading.rim_strength)),
        format!("const RIM_COLOR: vec3<f32> = {};", vec3(shading.rim_color)),
        format!("const BACKGROUND: vec3<f32> = {};", vec3(shading.background)),
        format!("const GRID_COLOR: vec3<f32> = {};", vec3(shading.grid_color)),
        format!("const GRID_SPACING: f32 = {};", float(shading.grid_spacing)),
        format!("const GRID_ALPHA: f32 = {};", float(shading.grid_alpha)),
        format!("const GRID_DECAY: f32 = {};", float(shading.grid_decay)),
        format!("const AXIS_X_COLOR: vec3<f32> = {};", vec3(shading.axis_x_color)),
        format!("const AXIS_Z_COLOR: vec3<f32> = {};", vec3(shading.axis_z_color)),
    ]
    .join("\n")
}

/// Shortest round-tripping decimal, always with a `.` or exponent.
fn float(v: f32) -> String {
    format!("{v:?}")
}

fn vec2(v: Vec2) -> String {
    format!("vec2<f32>({}, {})", float(v.x), float(v.y))
}

fn vec3(v: Vec3) -> String {
    format!("vec3<f32>({}, {}, {})", float(v.x), float(v.y), float(v.z))
}

#[derive(Default)]
struct Emitter {
    body: String,
    next: usize,
}

impl Emitter {
    fn bind(&mut self, prefix: char, expr: &str) -> String {
        self.next += 1;
        let name = format!("{prefix}{}", self.next);
        self.body.push_str(&format!("    let {name} = {expr};\n"));
        name
    }

    /// Emit `node` evaluated at point variable `p`; returns the result variable.
    fn node(&mut self, node: &SdfNode, p: &str) -> String {
        let default_color = vec3(DEFAULT_COLOR);
        match node {
            SdfNode::Sphere { radius } => self.bind(
                'r',
                &format!("SdfResult(sd_sphere({p}, {}), {default_color})", float(*radius)),
            ),
            SdfNode::Cuboid { size } => {
                self.bind('r', &format!("SdfResult(sd_box({p}, {}), {default_color})", vec3(*size)))
            }
            SdfNode::Cylinder { radius, height } => self.bind(
                'r',
                &format!(
                    "SdfResult(sd_cylinder({p}, {}, {}), {default_color})",
                    float(*radius),
                    float(*height)
                ),
            ),
            SdfNode::Torus {
                major_radius,
                minor_radius,
            } => self.bind(
                'r',
                &format!(
                    "SdfResult(sd_torus({p}, {}), {default_color})",
                    vec2(Vec2::new(*major_radius, *minor_radius))
                ),
            ),

            SdfNode::Union { a, b, smooth } => {
                let (a, b) = (self.node(a, p), self.node(b, p));
                if *smooth > 0.0 {
                    self.bind('r', &format!("op_union_smooth({a}, {b}, {})", float(*smooth)))
                } else {
                    self.bind('r', &format!("op_union({a}, {b})"))
                }
            }
            SdfNode::Subtract { a, b, smooth } => {
                let (a, b) = (self.node(a, p), self.node(b, p));
                if *smooth > 0.0 {
                    self.bind('r', &format!("op_subtract_smooth({a}, {b}, {})", float(*smooth)))
                } else {
                    self.bind('r', &format!("op_subtract({a}, {b})"))
                }
            }
            SdfNode::Intersect { a, b } => {
                let (a, b) = (self.node(a, p), self.node(b, p));
                self.bind('r', &format!("op_intersect({a}, {b})"))
            }

            SdfNode::Translate { target, offset } => {
                let q = self.bind('p', &format!("{p} - {}", vec3(*offset)));
                self.node(target, &q)
            }
            SdfNode::Rotate {
                target,
                axis,
                angle_deg,
            } => {
                let axis = Axis::dominant(*axis);
                let radians = (-angle_deg).to_radians();
                let q = self.bind('p', &format!("rotate_{}({p}, {})", axis.name(), float(radians)));
                self.node(target, &q)
            }
            SdfNode::Mirror { target, axis } => {
                let fold = |set: bool, c: &str| {
                    if set {
                        format!("abs({p}.{c})")
                    } else {
                        format!("{p}.{c}")
                    }
                };
                let q = self.bind(
                    'p',
                    &format!(
                        "vec3<f32>({}, {}, {})",
                        fold(axis.x > 0.9, "x"),
                        fold(axis.y > 0.9, "y"),
                        fold(axis.z > 0.9, "z")
                    ),
                );
                self.node(target, &q)
            }
            SdfNode::Color { target, color } => {
                let r = self.node(target, p);
                self.bind('r', &format!("set_color({r}, {})", vec3(*color)))
            }
        }
    }
}
