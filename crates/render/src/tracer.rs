//! Sphere tracing.

use sdf::{Scene, SdfSample};

use crate::camera::Ray;
use crate::config::RenderConfig;

/// Outcome of marching one ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum March {
    /// `sample.distance` is the distance travelled along the ray, not the
    /// residual field value; `sample.color` is the scene's color there.
    Hit { sample: SdfSample, steps: u32 },
    /// Left `max_distance` or ran out of steps.
    Miss { steps: u32 },
}

impl March {
    #[must_use]
    pub fn hit(&self) -> Option<SdfSample> {
        match self {
            Self::Hit { sample, .. } => Some(*sample),
            Self::Miss { .. } => None,
        }
    }

    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Scene evaluations spent on this ray.
    #[must_use]
    pub fn steps(&self) -> u32 {
        match self {
            Self::Hit { steps, .. } | Self::Miss { steps } => *steps,
        }
    }
}

/// Walk `ray` to the first surface crossing.
///
/// Advances by the unsigned field value so rays starting inside a solid
/// still make progress. Never takes more than `max_march_steps` steps.
#[must_use]
pub fn march<S: Scene + ?Sized>(scene: &S, ray: &Ray, config: &RenderConfig) -> March {
    let mut t = 0.0_f32;
    for step in 1..=config.max_march_steps {
        let sample = scene.map(ray.at(t));
        let d = sample.distance.abs();
        if d < config.hit_epsilon {
            return March::Hit {
                sample: SdfSample {
                    distance: t,
                    ..sample
                },
                steps: step,
            };
        }
        if t > config.max_distance {
            return March::Miss { steps: step };
        }
        t += d;
    }
    March::Miss {
        steps: config.max_march_steps,
    }
}
