use glam::{BVec3, Vec3};
use sdf::{csg, primitives, transform, Scene, SdfNode, SdfSample, DEFAULT_COLOR};

const BODY: Vec3 = Vec3::new(0.8, 0.8, 0.8);
const TIRE: Vec3 = Vec3::new(0.2, 0.2, 0.2);

fn car_tree() -> SdfNode {
    let body = SdfNode::cuboid(Vec3::new(1.0, 0.2, 0.5)).color(BODY);
    let wheel = SdfNode::torus(0.4, 0.1).rotate_x(90.0).color(TIRE);
    let wheels = wheel.translate(Vec3::new(1.0, 0.0, 0.6)).mirror_x().mirror_z();
    body.union(wheels)
}

fn car_closure(p: Vec3) -> SdfSample {
    let body = csg::set_color(
        SdfSample::untagged(primitives::cuboid(p, Vec3::new(1.0, 0.2, 0.5))),
        BODY,
    );
    let q = transform::mirror(p, BVec3::new(false, false, true));
    let q = transform::mirror(q, BVec3::new(true, false, false));
    let q = transform::translate(q, Vec3::new(1.0, 0.0, 0.6));
    let q = transform::rotate_x(q, (-90.0_f32).to_radians());
    let wheels = csg::set_color(SdfSample::untagged(primitives::torus(q, 0.4, 0.1)), TIRE);
    csg::union(body, wheels)
}

#[test]
fn tree_matches_hand_written_closure() {
    let tree = car_tree();
    for i in 0..11 {
        for j in 0..5 {
            for k in 0..9 {
                let p = Vec3::new(i as f32 * 0.3 - 1.5, j as f32 * 0.25 - 0.5, k as f32 * 0.2 - 0.8);
                let a = tree.map(p);
                let b = car_closure(p);
                assert!((a.distance - b.distance).abs() < 1e-5, "{p:?}: {} vs {}", a.distance, b.distance);
                if (a.distance - b.distance).abs() < 1e-7 {
                    assert_eq!(a.color, b.color);
                }
            }
        }
    }
}

#[test]
fn smooth_tree_operators_use_smooth_combinators() {
    let tree = SdfNode::sphere(0.5).smooth_union(SdfNode::sphere(0.5).translate(Vec3::X), 0.3);
    let p = Vec3::new(0.5, 0.0, 0.0);
    let a = SdfSample::untagged(primitives::sphere(p, 0.5));
    let b = SdfSample::untagged(primitives::sphere(p - Vec3::X, 0.5));
    let expected = csg::smooth_union(a, b, 0.3);
    assert!((tree.eval(p).distance - expected.distance).abs() < 1e-6);
    assert!(tree.eval(p).distance < csg::union(a, b).distance);
}

#[test]
fn scene_file_json_parses() {
    let json = r#"{
        "op": "union",
        "a": { "op": "color", "color": [0.8, 0.8, 0.8],
               "target": { "op": "box", "size": [1.0, 0.2, 0.5] } },
        "b": { "op": "translate", "offset": [0.0, 1.0, 0.0],
               "target": { "op": "sphere", "radius": 0.3 } }
    }"#;
    let node: SdfNode = serde_json::from_str(json).expect("parse scene");
    assert_eq!(node.primitive_count(), 2);
    assert!(node.validate().is_ok());
    // Missing "smooth" defaults to a hard union.
    let SdfNode::Union { smooth, .. } = &node else {
        panic!("expected union root");
    };
    assert!(smooth.abs() < f32::EPSILON);
    assert_eq!(node.eval(Vec3::new(0.0, 1.0, 0.0)).color, DEFAULT_COLOR);
}

#[test]
fn scene_tree_survives_json_round_trip() {
    let tree = car_tree().smooth_subtract(SdfNode::cylinder(0.1, 2.0).rotate_z(90.0), 0.05);
    let text = serde_json::to_string(&tree).expect("serialize");
    let back: SdfNode = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, tree);
}

#[test]
fn cuboid_alias_is_accepted() {
    let node: SdfNode = serde_json::from_str(r#"{ "op": "cuboid", "size": [1.0, 1.0, 1.0] }"#).expect("parse");
    assert_eq!(node, SdfNode::cuboid(Vec3::ONE));
}
