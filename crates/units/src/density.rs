use serde::{Deserialize, Serialize};

use crate::length::Length;
use crate::mass::Mass;

/// Bulk density in g/cm³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Density(f64);

impl Density {
    pub fn from_grams_per_cm3(value: f64) -> Self {
        Self(value)
    }

    pub fn to_grams_per_cm3(&self) -> f64 {
        self.0
    }

    pub fn to_kg_per_m3(&self) -> f64 {
        self.0 * 1000.0
    }

    /// Mass of a uniform sphere of this density.
    ///
    /// m = 4/3 π r³ ρ
    pub fn sphere_mass(&self, radius: Length) -> Mass {
        let volume_cm3 = 4.0 / 3.0 * std::f64::consts::PI * radius.to_cm().powi(3);
        Mass::from_grams(volume_cm3 * self.0)
    }
}
