//! Per-render tuning knobs.
//!
//! Values are fixed for the duration of a render call; nothing in the march
//! loop mutates them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Largest accepted sub-pixel grid; 256 rays per pixel.
pub const MAX_SUPERSAMPLE_GRID: u32 = 16;

/// Tracer termination and anti-aliasing density.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Hard cap on march iterations per ray. Running out is a miss.
    pub max_march_steps: u32,
    /// A step whose unsigned distance is below this counts as a hit.
    pub hit_epsilon: f32,
    /// Rays that travel past this are misses.
    pub max_distance: f32,
    /// Central-difference offset for normals.
    pub normal_epsilon: f32,
    /// Sub-pixel grid size `N`; each pixel averages `N * N` rays.
    pub supersample_grid: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_march_steps: 128,
            hit_epsilon: 1e-3,
            max_distance: 100.0,
            normal_epsilon: 5e-4,
            supersample_grid: SsaaLevel::X8.grid(),
        }
    }
}

impl RenderConfig {
    /// Cheaper variant used for interactive previews (2x2 supersampling).
    #[must_use]
    pub fn preview() -> Self {
        Self {
            supersample_grid: SsaaLevel::X2.grid(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ssaa(self, level: SsaaLevel) -> Self {
        Self {
            supersample_grid: level.grid(),
            ..self
        }
    }

    /// Effective grid size; zero is treated as a single sample and anything
    /// past [`MAX_SUPERSAMPLE_GRID`] is clamped to it.
    #[must_use]
    pub fn sample_grid(&self) -> u32 {
        self.supersample_grid.clamp(1, MAX_SUPERSAMPLE_GRID)
    }

    /// # Errors
    ///
    /// Returns [`RenderError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.max_march_steps == 0 {
            return Err(RenderError::InvalidConfig("max_march_steps must be at least 1"));
        }
        if !(self.hit_epsilon.is_finite() && self.hit_epsilon > 0.0) {
            return Err(RenderError::InvalidConfig("hit_epsilon must be finite and positive"));
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(RenderError::InvalidConfig("max_distance must be finite and positive"));
        }
        if !(self.normal_epsilon.is_finite() && self.normal_epsilon > 0.0) {
            return Err(RenderError::InvalidConfig("normal_epsilon must be finite and positive"));
        }
        if self.supersample_grid > MAX_SUPERSAMPLE_GRID {
            return Err(RenderError::InvalidConfig("supersample_grid must be at most 16"));
        }
        Ok(())
    }
}

/// Named supersampling presets. `X4` means a 4x4 grid, 16 rays per pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SsaaLevel {
    Off,
    #[default]
    X2,
    X4,
    X8,
}

impl SsaaLevel {
    #[must_use]
    pub const fn grid(self) -> u32 {
        match self {
            Self::Off => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }
}

impl FromStr for SsaaLevel {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "1" | "x1" => Ok(Self::Off),
            "2" | "x2" => Ok(Self::X2),
            "4" | "x4" => Ok(Self::X4),
            "8" | "x8" => Ok(Self::X8),
            _ => Err(RenderError::UnknownSsaa(s.to_string())),
        }
    }
}

impl fmt::Display for SsaaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            other => write!(f, "x{}", other.grid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(RenderConfig::preview().validate().is_ok());
        assert_eq!(RenderConfig::default().sample_grid(), 8);
        assert_eq!(RenderConfig::preview().sample_grid(), 2);
    }

    #[test]
    fn zero_grid_means_one_sample() {
        let config = RenderConfig {
            supersample_grid: 0,
            ..RenderConfig::default()
        };
        assert_eq!(config.sample_grid(), 1);
    }

    #[test]
    fn rejects_degenerate_values() {
        let no_steps = RenderConfig {
            max_march_steps: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(no_steps.validate(), Err(RenderError::InvalidConfig(_))));
        let zero_eps = RenderConfig {
            normal_epsilon: 0.0,
            ..RenderConfig::default()
        };
        assert!(zero_eps.validate().is_err());
        let nan_dist = RenderConfig {
            max_distance: f32::NAN,
            ..RenderConfig::default()
        };
        assert!(nan_dist.validate().is_err());
        let huge_grid = RenderConfig {
            supersample_grid: 70_000,
            ..RenderConfig::default()
        };
        assert!(matches!(huge_grid.validate(), Err(RenderError::InvalidConfig(_))));
        let largest = RenderConfig {
            supersample_grid: MAX_SUPERSAMPLE_GRID,
            ..RenderConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn oversized_grid_is_clamped() {
        let config = RenderConfig {
            supersample_grid: 70_000,
            ..RenderConfig::default()
        };
        assert_eq!(config.sample_grid(), MAX_SUPERSAMPLE_GRID);
    }

    #[test]
    fn ssaa_parses_and_displays() {
        assert_eq!("x4".parse::<SsaaLevel>().ok(), Some(SsaaLevel::X4));
        assert_eq!("8".parse::<SsaaLevel>().ok(), Some(SsaaLevel::X8));
        assert_eq!("Off".parse::<SsaaLevel>().ok(), Some(SsaaLevel::Off));
        assert!("3".parse::<SsaaLevel>().is_err());
        assert_eq!(SsaaLevel::X2.to_string(), "x2");
        assert_eq!(SsaaLevel::Off.to_string(), "off");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{ "max_march_steps": 64 }"#).expect("parse");
        assert_eq!(config.max_march_steps, 64);
        assert!((config.hit_epsilon - 1e-3).abs() < f32::EPSILON);
    }
}
