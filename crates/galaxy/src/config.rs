//! Generation settings.

use octree::OctreeConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inputs for one galaxy run.
///
/// Every field has a default, so a TOML document only needs the values it
/// overrides:
///
/// ```
/// use galaxy::GenerationConfig;
///
/// let config = GenerationConfig::from_toml_str("arm_count = 5\nstar_count = 2000").unwrap();
/// assert_eq!(config.arm_count, 5);
/// assert_eq!(config.star_per_point, 400);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed for the ChaCha random source
    pub seed: u64,
    /// Target number of systems across all arms
    pub star_count: usize,
    pub arm_count: usize,
    /// Systems placed around each arm point
    pub star_per_point: usize,
    /// Side of the square candidates are drawn from, around the target
    pub window: f64,
    /// Candidates drawn per system; the one closest to the target wins
    pub sample_count: usize,
    /// Random offset applied to arm points, and the disc thickness
    pub wander_distance: f64,
    /// Split thresholds of the galaxy index
    pub index: OctreeConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 123_135_464,
            star_count: 100_000,
            arm_count: 3,
            star_per_point: 400,
            window: 20.0,
            sample_count: 5,
            wander_distance: 35.0,
            index: OctreeConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arm_count", self.arm_count),
            ("star_per_point", self.star_per_point),
            ("sample_count", self.sample_count),
            ("index.max_objects", self.index.max_objects),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{} must be at least 1", name)));
        }

        for (name, value) in [("window", self.window), ("wander_distance", self.wander_distance)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Points sampled along each spiral arm, excluding the starting point.
    pub fn arm_iterations(&self) -> usize {
        self.star_count / self.star_per_point / self.arm_count
    }
}
