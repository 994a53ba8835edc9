use glam::Vec3;

use crate::sample::SdfSample;

/// The scene function the renderer marches against.
///
/// Implementations must be deterministic and free of side effects for a
/// fixed parameter snapshot (for example an elapsed-time value captured by a
/// closure). The renderer never inspects how a scene is composed; swapping
/// scenes means passing a different implementor.
///
/// `Sync` is required because pixels are evaluated concurrently.
pub trait Scene: Sync {
    fn map(&self, p: Vec3) -> SdfSample;
}

impl<F> Scene for F
where
    F: Fn(Vec3) -> SdfSample + Sync,
{
    fn map(&self, p: Vec3) -> SdfSample {
        self(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    fn distance_at<S: Scene + ?Sized>(scene: &S, p: Vec3) -> f32 {
        scene.map(p).distance
    }

    #[test]
    fn closures_are_scenes() {
        let radius = 0.75;
        let scene = move |p: Vec3| SdfSample::untagged(primitives::sphere(p, radius));
        assert!((distance_at(&scene, Vec3::new(2.0, 0.0, 0.0)) - 1.25).abs() < 1e-6);
    }

    #[test]
    fn trait_objects_are_scenes() {
        let scene: Box<dyn Scene> = Box::new(|p: Vec3| SdfSample::untagged(p.y));
        assert!((distance_at(scene.as_ref(), Vec3::new(0.0, 3.0, 0.0)) - 3.0).abs() < 1e-6);
    }
}
