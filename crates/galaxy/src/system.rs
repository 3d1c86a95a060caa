//! Systems, the galaxy shell and the handles stored in spatial indexes.

use std::fmt;

use nalgebra::{Point2, Point3, Vector3};
use octree::{Aabb, Octree, OctreeConfig, OctreeError, Spatial};
use orbital::{compute_position, BodyRef};
use serde::{Deserialize, Serialize};
use units::Time;

use crate::body::{BodyInfo, Planet, Star};

/// Padding around the bodies of a system when indexing them, in AU
const BODY_INDEX_MARGIN: f64 = 1.0;

/// Position of a system in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(pub u32);

impl SystemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A star system.
///
/// `position` and `bounds` are in the galaxy frame. Everything inside
/// (`barycenter`, body positions) is in the system frame, in AU, with the
/// root star at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub id: SystemId,
    pub name: String,
    pub bounds: Aabb,
    pub position: Point3<f64>,
    pub barycenter: Point3<f64>,
    /// Descending mass; the first star is the root of the orbit hierarchy
    pub stars: Vec<Star>,
    /// Generation order, each planet directly followed by its moons
    pub planets: Vec<Planet>,
    pub seed: u64,
}

/// Body positions at one instant, parallel to `System::stars` and
/// `System::planets`.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPositions {
    pub stars: Vec<Point3<f64>>,
    pub planets: Vec<Point3<f64>>,
}

impl System {
    pub fn root_star(&self) -> Option<&Star> {
        self.stars.first()
    }

    pub fn body(&self, body: BodyRef) -> Option<&BodyInfo> {
        match body {
            BodyRef::Star(i) => self.stars.get(i as usize).map(|s| &s.info),
            BodyRef::Planet(i) => self.planets.get(i as usize).map(|p| &p.info),
        }
    }

    /// Moons orbiting the planet at `planet`.
    pub fn moons_of(&self, planet: usize) -> impl Iterator<Item = &Planet> {
        let parent = Some(BodyRef::Planet(planet as u32));
        self.planets.iter().filter(move |p| p.info.parent() == parent)
    }

    /// Evaluates every orbit at `time` after the epoch.
    ///
    /// Positions are chained through the hierarchy, so a moon's position
    /// includes its planet's. `unit_scale` is the output unit per AU.
    pub fn positions_at(&self, time: Time, unit_scale: f64) -> BodyPositions {
        hierarchy_positions(&self.stars, &self.planets, time, unit_scale)
    }

    /// Builds an octree over the system's stars and planets (system frame).
    pub fn body_index(&self) -> Result<Octree<IndexedBody>, OctreeError> {
        let bounds = self
            .stars
            .iter()
            .map(|s| s.bounds)
            .chain(self.planets.iter().map(|p| p.bounds))
            .fold(Aabb::empty(), |acc, b| acc.union(&b))
            .expanded(BODY_INDEX_MARGIN);

        let mut index = Octree::new(bounds, OctreeConfig::default());
        for (i, star) in self.stars.iter().enumerate() {
            index.insert(IndexedBody::Star {
                system: self.id,
                index: i as u32,
                bounds: star.bounds,
            })?;
        }
        for (i, planet) in self.planets.iter().enumerate() {
            index.insert(IndexedBody::Planet {
                system: self.id,
                index: i as u32,
                bounds: planet.bounds,
            })?;
        }
        Ok(index)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} ({} stars, {} planets) at ({:.2}, {:.2}, {:.2})",
            self.id,
            self.name,
            self.stars.len(),
            self.planets.len(),
            self.position.x,
            self.position.y,
            self.position.z
        )
    }
}

/// Positions of every body, each offset by its parents' positions.
///
/// Stars are resolved by walking up their chain, since a companion may be
/// listed before the star it orbits. Planets rely on their parent coming
/// first, which generation guarantees: planets orbit the root star and moons
/// follow their planet.
pub(crate) fn hierarchy_positions(
    stars: &[Star],
    planets: &[Planet],
    time: Time,
    unit_scale: f64,
) -> BodyPositions {
    let offsets: Vec<Vector3<f64>> = stars
        .iter()
        .map(|star| compute_position(&star.info.orbit, time, unit_scale))
        .collect();

    let mut positions = BodyPositions {
        stars: (0..stars.len())
            .map(|i| Point3::origin() + chain_offset(stars, &offsets, i))
            .collect(),
        planets: Vec::with_capacity(planets.len()),
    };
    for planet in planets {
        let origin = parent_position(planet.info.parent(), &positions);
        let offset = compute_position(&planet.info.orbit, time, unit_scale);
        positions.planets.push(origin + offset);
    }
    positions
}

/// Sum of the orbital offsets from star `index` up to the root.
fn chain_offset(stars: &[Star], offsets: &[Vector3<f64>], index: usize) -> Vector3<f64> {
    let mut total = Vector3::zeros();
    let mut current = Some(index);
    for _ in 0..stars.len() {
        let Some(i) = current.filter(|&i| i < stars.len()) else {
            break;
        };
        total += offsets[i];
        current = match stars[i].info.parent() {
            Some(BodyRef::Star(p)) => Some(p as usize),
            _ => None,
        };
    }
    total
}

fn parent_position(parent: Option<BodyRef>, resolved: &BodyPositions) -> Point3<f64> {
    match parent {
        Some(BodyRef::Star(i)) => resolved.stars.get(i as usize).copied(),
        Some(BodyRef::Planet(i)) => resolved.planets.get(i as usize).copied(),
        None => None,
    }
    .unwrap_or_else(Point3::origin)
}

/// Region of the galaxy. Sectors are never generated; the list stays empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub bounds: Aabb,
    pub position: Point3<f64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Galaxy {
    pub name: String,
    /// One polyline per spiral arm
    pub arms: Vec<Vec<Point2<f64>>>,
    pub sectors: Vec<Sector>,
}

/// Kind tag of the entries of a spatial index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    System,
    Star,
    Planet,
}

/// Lightweight handle stored in spatial indexes.
///
/// Resolves against the generator's system list (`System`) or against the
/// owning system's body lists (`Star`, `Planet`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexedBody {
    System {
        id: SystemId,
        bounds: Aabb,
    },
    Star {
        system: SystemId,
        index: u32,
        bounds: Aabb,
    },
    Planet {
        system: SystemId,
        index: u32,
        bounds: Aabb,
    },
}

impl IndexedBody {
    pub fn system(&self) -> SystemId {
        match self {
            IndexedBody::System { id, .. } => *id,
            IndexedBody::Star { system, .. } | IndexedBody::Planet { system, .. } => *system,
        }
    }

    /// The body inside its system, `None` for a whole system.
    pub fn body(&self) -> Option<BodyRef> {
        match self {
            IndexedBody::System { .. } => None,
            IndexedBody::Star { index, .. } => Some(BodyRef::Star(*index)),
            IndexedBody::Planet { index, .. } => Some(BodyRef::Planet(*index)),
        }
    }
}

impl Spatial for IndexedBody {
    type Kind = BodyKind;

    fn bounding_box(&self) -> Aabb {
        match self {
            IndexedBody::System { bounds, .. }
            | IndexedBody::Star { bounds, .. }
            | IndexedBody::Planet { bounds, .. } => *bounds,
        }
    }

    fn kind(&self) -> BodyKind {
        match self {
            IndexedBody::System { .. } => BodyKind::System,
            IndexedBody::Star { .. } => BodyKind::Star,
            IndexedBody::Planet { .. } => BodyKind::Planet,
        }
    }
}
