//! Streaming galaxy generator.
//!
//! [`GalaxyGenerator`] is an [`Iterator`] of systems. Each `next()` call
//! places one system, synthesizes its bodies, inserts it into the galaxy
//! index and hands it back, so callers can consume a large galaxy
//! progressively or stop early.
//!
//! ```
//! use galaxy::{GalaxyGenerator, GenerationConfig};
//!
//! let config = GenerationConfig {
//!     star_count: 600,
//!     star_per_point: 20,
//!     ..GenerationConfig::default()
//! };
//! let mut generator = GalaxyGenerator::new(config).unwrap();
//! let first: Vec<_> = generator.by_ref().take(5).collect::<Result<_, _>>().unwrap();
//! assert_eq!(first.len(), 5);
//! assert_eq!(generator.systems().len(), 5);
//! ```

use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use octree::{Aabb, Octree, Ray};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use tracing::{debug, info};

use crate::arms::{build_arms, density_order, galaxy_bounds, ArmPoint};
use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::generation::generate_system;
use crate::names::{NameGenerator, SyllableNames};
use crate::sampling::centered;
use crate::system::{BodyKind, Galaxy, IndexedBody, System, SystemId};

const GALAXY_NAME: &str = "Milky Way";

/// Share of arm points that deviate at the rim
const DEVIATION_CHANCE: f64 = 0.8;

/// Deviation distance: scale · from_center + U(0, spread)
const DEVIATION_SCALE: f64 = 100.0;
const DEVIATION_SPREAD: f64 = 100.0;

/// Where the next `next()` call resumes.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    /// Index into the density-ordered arm points
    point: usize,
    /// Systems already placed around the current point
    repetition: usize,
    /// Deviation distance drawn for the current point
    deviation_distance: f64,
}

/// Deterministic, seed-driven galaxy builder.
pub struct GalaxyGenerator<N: NameGenerator = SyllableNames> {
    config: GenerationConfig,
    rng: ChaChaRng,
    names: N,
    index: Octree<IndexedBody>,
    systems: Vec<Arc<System>>,
    galaxy: Galaxy,
    points: Vec<ArmPoint>,
    cursor: Cursor,
    farthest_distance: f64,
}

impl GalaxyGenerator<SyllableNames> {
    /// Validates `config` and prepares the first run with the default names.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        Self::with_names(config, SyllableNames::new())
    }
}

impl<N: NameGenerator> GalaxyGenerator<N> {
    pub fn with_names(config: GenerationConfig, names: N) -> Result<Self, GenerationError> {
        config.validate()?;

        let mut generator = Self {
            rng: ChaChaRng::seed_from_u64(config.seed),
            names,
            index: Octree::new(Aabb::from_center(Point3::origin(), 1.0), config.index),
            systems: Vec::new(),
            galaxy: Galaxy {
                name: GALAXY_NAME.to_string(),
                arms: Vec::new(),
                sectors: Vec::new(),
            },
            points: Vec::new(),
            cursor: Cursor::default(),
            farthest_distance: 0.0,
            config,
        };
        generator.generate();
        Ok(generator)
    }

    /// Discards every generated system and rebuilds the arms and index
    /// bounds. The RNG is left where it is; pair with [`Self::reset_rng`] to
    /// replay the same galaxy.
    pub fn generate(&mut self) {
        let arms = build_arms(&self.config);
        let bounds = galaxy_bounds(&arms, &self.config);

        self.index.reset(bounds);
        self.systems.clear();
        self.farthest_distance = 0.0;
        self.points = density_order(&arms);
        self.galaxy.arms = arms;
        self.galaxy.sectors.clear();
        self.cursor = Cursor::default();

        info!(
            arms = self.config.arm_count,
            points = self.points.len(),
            expected_systems = self.points.len() * self.config.star_per_point,
            "galaxy layout ready"
        );
    }

    /// Reseeds the RNG from the configured seed and forgets used names.
    pub fn reset_rng(&mut self) {
        self.rng = ChaChaRng::seed_from_u64(self.config.seed);
        self.names.reset();
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Galaxy index holding one [`IndexedBody::System`] per generated system
    pub fn index(&self) -> &Octree<IndexedBody> {
        &self.index
    }

    pub fn system(&self, id: SystemId) -> Option<&Arc<System>> {
        self.systems.get(id.index())
    }

    pub fn systems(&self) -> &[Arc<System>] {
        &self.systems
    }

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    /// Distance from the galactic centre of the farthest placement so far
    pub fn farthest_distance(&self) -> f64 {
        self.farthest_distance
    }

    /// True once every arm point has been used up.
    pub fn is_finished(&self) -> bool {
        self.cursor.point >= self.points.len()
    }

    /// Nearest system along the ray, each system treated as a sphere of
    /// `radius` around its position.
    ///
    /// Candidates come from the populated leaves the ray crosses, plus any
    /// internal node holding systems that straddle a split plane.
    pub fn pick_system(&self, ray: &Ray, radius: f64) -> Option<Arc<System>> {
        let mut nodes = self.index.intersect_ray(ray);
        nodes.extend(self.index.select(|n| {
            !n.is_leaf() && n.object_count() > 0 && n.bounds().intersects_ray(ray)
        }));

        nodes
            .iter()
            .flat_map(|node| node.all_objects())
            .filter_map(|entry| self.system(entry.system()))
            .filter_map(|system| {
                ray.intersect_sphere(&system.position, radius)
                    .map(|t| (t, system))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, system)| Arc::clone(system))
    }

    /// Every system within `radius` of `center`, in emission order.
    pub fn systems_near(&self, center: Point3<f64>, radius: f64) -> Vec<Arc<System>> {
        let cube = Aabb::from_center(center, radius);
        let mut found: Vec<Arc<System>> = self
            .index
            .select(|n| n.object_count() > 0 && n.bounds().intersects(&cube))
            .into_iter()
            .flat_map(|node| node.objects(BodyKind::System))
            .filter_map(|entry| self.system(entry.system()))
            .filter(|system| (system.position - center).norm() <= radius)
            .cloned()
            .collect();
        found.sort_by_key(|system| system.id);
        found
    }

    /// Places, builds and indexes one system around `point`.
    fn place_system(&mut self, point: ArmPoint) -> Result<Arc<System>, GenerationError> {
        let wander = self.config.wander_distance;
        let window = self.config.window;

        let deviate = self.rng.random::<f64>() < DEVIATION_CHANCE * point.from_center;
        let mut target = Point3::new(
            point.position.x + centered(&mut self.rng, wander),
            point.position.y + centered(&mut self.rng, wander),
            0.0,
        );
        if deviate {
            let distance = self.cursor.deviation_distance;
            target += Vector3::new(
                centered(&mut self.rng, distance),
                centered(&mut self.rng, distance),
                0.0,
            );
        }

        let mut winner = target;
        let mut best = f64::INFINITY;
        for _ in 0..self.config.sample_count {
            let candidate = Point3::new(
                target.x + centered(&mut self.rng, window),
                target.y + centered(&mut self.rng, window),
                centered(&mut self.rng, wander),
            );
            let d2 = (candidate - target).norm_squared();
            if d2 < best {
                best = d2;
                winner = candidate;
            }
        }
        self.farthest_distance = self.farthest_distance.max(winner.coords.norm());

        let id = SystemId(self.systems.len() as u32);
        let system = generate_system(id, winner, &mut self.rng, &mut self.names);
        self.index.insert(IndexedBody::System {
            id,
            bounds: system.bounds,
        })?;

        let system = Arc::new(system);
        self.systems.push(Arc::clone(&system));
        Ok(system)
    }
}

impl<N: NameGenerator> Iterator for GalaxyGenerator<N> {
    type Item = Result<Arc<System>, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let point = *self.points.get(self.cursor.point)?;
        if self.cursor.repetition == 0 {
            self.cursor.deviation_distance =
                DEVIATION_SCALE * point.from_center + self.rng.random::<f64>() * DEVIATION_SPREAD;
            debug!(
                point = self.cursor.point,
                from_center = point.from_center,
                "next arm point"
            );
        }

        let result = self.place_system(point);

        self.cursor.repetition += 1;
        if self.cursor.repetition >= self.config.star_per_point {
            self.cursor.repetition = 0;
            self.cursor.point += 1;
            if self.is_finished() {
                info!(
                    systems = self.systems.len(),
                    farthest = self.farthest_distance,
                    "galaxy generation finished"
                );
                self.index.log_stats();
            }
        }

        Some(result)
    }
}
