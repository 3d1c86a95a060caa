//! Procedural spiral-galaxy generator.
//!
//! A seeded [`GalaxyGenerator`] lays out spiral arms, then streams star
//! systems one by one: stars classified on the spectral/luminosity grid,
//! companion stars on nested orbits, planets and moons placed outward with
//! clearance between neighbours. Every system is inserted into an
//! [`octree::Octree`] for ray picking and proximity queries.
//!
//! Same seed, same configuration, same galaxy.

pub mod arms;
pub mod body;
pub mod config;
pub mod error;
pub mod generation;
pub mod generator;
pub mod names;
pub mod sampling;
pub mod spectral;
pub mod stellar;
pub mod system;

#[cfg(test)]
mod sampling_test;
#[cfg(test)]
mod system_test;

pub use body::{BodyInfo, Planet, PlanetDescriptor, PlanetType, Star};
pub use config::GenerationConfig;
pub use error::{ConfigError, GenerationError};
pub use generator::GalaxyGenerator;
pub use names::{NameGenerator, SyllableNames};
pub use spectral::{LuminosityClass, SpectralClass, StarType};
pub use system::{BodyKind, BodyPositions, Galaxy, IndexedBody, Sector, System, SystemId};
