//! Stars and planets of a generated system.
//!
//! Positions and bounding boxes are in the system frame, in AU, with the
//! root star at the origin.

use std::fmt;

use nalgebra::Point3;
use octree::Aabb;
use orbital::{BodyRef, OrbitalParameters};
use serde::{Deserialize, Serialize};
use units::{Density, Length, Mass};

use crate::spectral::StarType;
use crate::system::SystemId;

/// Physical and orbital data shared by every body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    /// System the body belongs to
    pub system: SystemId,
    pub orbit: OrbitalParameters,
    pub radius: Length,
    pub mass: Mass,
    pub density: Density,
    /// Seed for per-body procedural detail
    pub seed: u64,
}

impl BodyInfo {
    pub fn parent(&self) -> Option<BodyRef> {
        self.orbit.orbiting_body
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub bounds: Aabb,
    pub position: Point3<f64>,
    pub name: String,
    pub star_type: StarType,
    pub info: BodyInfo,
}

impl Star {
    pub fn is_root(&self) -> bool {
        self.info.orbit.is_root()
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} ({:.0} K, {:.3} M☉, {:.0} km), {}",
            self.name,
            self.star_type,
            self.star_type.temperature,
            self.info.mass.to_solar_masses(),
            self.info.radius.to_km(),
            self.info.orbit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    Rocky,
    Gaseous,
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlanetType::Rocky => write!(f, "rocky"),
            PlanetType::Gaseous => write!(f, "gaseous"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetDescriptor {
    pub planet_type: PlanetType,
}

/// A planet, or a moon when it orbits another planet.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub bounds: Aabb,
    pub position: Point3<f64>,
    pub name: String,
    pub descriptor: PlanetDescriptor,
    pub info: BodyInfo,
}

impl Planet {
    pub fn is_moon(&self) -> bool {
        matches!(self.info.parent(), Some(BodyRef::Planet(_)))
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({} {}, {:.0} km, {:.2} g/cm³), {}",
            self.name,
            self.descriptor.planet_type,
            if self.is_moon() { "moon" } else { "planet" },
            self.info.radius.to_km(),
            self.info.density.to_grams_per_cm3(),
            self.info.orbit
        )
    }
}

/// Box around a body of the given radius at `position`.
pub(crate) fn body_bounds(position: Point3<f64>, radius: Length) -> Aabb {
    Aabb::from_center(position, radius.to_au())
}
