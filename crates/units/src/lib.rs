//! Typed physical quantities used across the galaxy generator.
//!
//! Each quantity is a thin `f64` newtype with a fixed base unit, so values
//! cannot be mixed up between AU and kilometres or kilograms and solar masses.

pub mod density;
pub mod length;
pub mod mass;
pub mod time;

#[cfg(test)]
mod density_test;

pub use density::Density;
pub use length::{Length, AU_TO_KM, AU_TO_M, SOLAR_RADIUS_KM};
pub use mass::{Mass, EARTH_MASS_KG, SOLAR_MASS_KG};
pub use time::{Time, SECONDS_PER_DAY, SECONDS_PER_YEAR};

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const G_SI: f64 = 6.67408e-11;
