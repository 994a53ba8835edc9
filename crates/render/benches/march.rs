use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Vec2, Vec3};
use render::{march, Camera, CameraBasis, Ray, RenderConfig, Renderer, SsaaLevel, ViewportRect};
use sdf::{SdfNode, Scene};

fn car() -> SdfNode {
    let body = SdfNode::cuboid(Vec3::new(1.0, 0.25, 0.5)).color(Vec3::new(0.8, 0.1, 0.1));
    let cabin = SdfNode::cuboid(Vec3::new(0.5, 0.2, 0.4))
        .translate(Vec3::new(-0.1, 0.4, 0.0))
        .color(Vec3::new(0.7, 0.7, 0.8));
    let wheel = SdfNode::cylinder(0.25, 0.1)
        .rotate_x(90.0)
        .translate(Vec3::new(0.6, -0.25, 0.5))
        .mirror_z()
        .color(Vec3::splat(0.1));
    body.smooth_union(cabin, 0.1).union(wheel.clone()).union(wheel.mirror_x())
}

fn bench_march(c: &mut Criterion) {
    let scene = car();
    let config = RenderConfig::default();
    let ray = Ray::new(Vec3::new(3.0, 2.0, 4.0), Vec3::new(-3.0, -2.0, -4.0).normalize());
    c.bench_function("march_car_center_ray", |b| {
        b.iter(|| march(black_box(&scene), black_box(&ray), &config));
    });
    c.bench_function("map_car", |b| b.iter(|| scene.map(black_box(Vec3::new(0.3, 0.1, 0.2)))));
}

fn bench_frame(c: &mut Criterion) {
    let renderer = Renderer::new(car(), RenderConfig::default().with_ssaa(SsaaLevel::X2)).expect("config");
    let camera = Camera::new(
        CameraBasis::new(Vec3::new(0.0, 0.5, 4.0), Vec3::X, Vec3::Y, Vec3::NEG_Z),
        ViewportRect::from_size(64, 48),
    );
    c.bench_function("render_64x48_x2", |b| b.iter(|| renderer.render(&camera, 64, 48)));
    c.bench_function("shade_pixel_x2", |b| {
        b.iter(|| renderer.shade_pixel(&camera, black_box(Vec2::new(32.5, 24.5))));
    });
}

criterion_group!(benches, bench_march, bench_frame);
criterion_main!(benches);
