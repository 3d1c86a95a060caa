//! Synthesis of a single star system.
//!
//! Draw order matters for reproducibility: every function here consumes the
//! shared RNG in a fixed sequence, so the same seed always yields the same
//! system.

use nalgebra::{Point3, Vector3};
use octree::Aabb;
use orbital::{
    distance_and_true_anomaly, orbital_period, sphere_of_influence, BodyRef, OrbitalParameters,
};
use rand::Rng;
use rand_chacha::ChaChaRng;
use tracing::{debug, warn};
use units::{Density, Length, Mass, Time};

use crate::body::{body_bounds, BodyInfo, Planet, PlanetDescriptor, PlanetType, Star};
use crate::names::NameGenerator;
use crate::sampling::{
    angle, distribute, log_uniform, moon_numeral, planet_radius_km, smoothstep, tilt, uniform,
};
use crate::stellar::{mass_from_luminosity, radius_from_luminosity, sample_star_type};
use crate::system::{hierarchy_positions, System, SystemId};

/// Hard cap on stars per system
pub const MAX_STARS: usize = 6;

/// Chance of a first companion star, multiplied by the decay per companion
const COMPANION_CHANCE: f64 = 0.45;
const COMPANION_DECAY: f64 = 0.6;

/// Minimum separation between two bodies, as a multiple of their radii sum
pub const CLEARANCE_FACTOR: f64 = 1.1;

/// Extra separation of companion stars, log-uniform in AU
const COMPANION_EXTRA_AU: (f64, f64) = (0.05, 50.0);

pub const MAX_PLANETS: usize = 11;

/// Planets stop once one lies this far (AU) beyond the reach of the stars
const PLANET_BAND_WIDTH: f64 = 50.0;

/// Planets larger than this (km) are always gaseous
const GAS_GIANT_RADIUS_KM: f64 = 13_000.0;

/// Bulk density range in g/cm³
const DENSITY_RANGE: (f64, f64) = (0.1, 20.0);

const MOON_CHANCE: f64 = 0.35;
const MOON_DECAY: f64 = 0.8;

/// Moon radius as a fraction of its planet's
const MOON_RADIUS_FRACTION: (f64, f64) = (0.05, 0.3);

/// Half-size of a system's box in the galaxy index
pub const SYSTEM_HALF_EXTENT: f64 = 1e-4;

/// Builds a complete system around a placement point (galaxy frame).
pub fn generate_system(
    id: SystemId,
    placement: Point3<f64>,
    rng: &mut ChaChaRng,
    names: &mut dyn NameGenerator,
) -> System {
    let mut stars = vec![generate_star(id, rng, names)];
    let mut chance = COMPANION_CHANCE;
    while stars.len() < MAX_STARS && rng.random::<f64>() < chance {
        stars.push(generate_star(id, rng, names));
        chance *= COMPANION_DECAY;
    }

    fix_star_orbitals(id, &mut stars, rng);
    let mut planets = generate_planets(id, &stars, rng, names);

    let positions = hierarchy_positions(&stars, &planets, Time::zero(), 1.0);
    for (star, position) in stars.iter_mut().zip(positions.stars) {
        star.position = position;
        star.bounds = body_bounds(position, star.info.radius);
    }
    for (planet, position) in planets.iter_mut().zip(positions.planets) {
        planet.position = position;
        planet.bounds = body_bounds(position, planet.info.radius);
    }

    let barycenter = barycenter(&stars);
    let name = match stars.first() {
        Some(root) => format!("{} ({})", root.name, stars.len()),
        None => String::new(),
    };
    let seed = rng.random();

    debug!(
        system = id.0,
        %name,
        stars = stars.len(),
        planets = planets.len(),
        "generated system"
    );

    System {
        id,
        name,
        bounds: Aabb::from_center(placement, SYSTEM_HALF_EXTENT),
        position: placement,
        barycenter,
        stars,
        planets,
        seed,
    }
}

/// A star with a fresh classification and a stationary orbit at the origin.
pub fn generate_star(
    system: SystemId,
    rng: &mut ChaChaRng,
    names: &mut dyn NameGenerator,
) -> Star {
    let star_type = sample_star_type(rng);
    let radius = Length::from_solar_radii(radius_from_luminosity(
        star_type.luminosity,
        star_type.temperature,
    ));
    let mass = Mass::from_solar_masses(mass_from_luminosity(star_type.luminosity));
    let name_len = rng.random_range(4..8);
    let name = names.generate(rng, name_len);
    let seed = rng.random();

    Star {
        bounds: body_bounds(Point3::origin(), radius),
        position: Point3::origin(),
        name,
        star_type,
        info: BodyInfo {
            system,
            orbit: OrbitalParameters::stationary(),
            radius,
            mass,
            density: mean_density(mass, radius),
            seed,
        },
    }
}

fn mean_density(mass: Mass, radius: Length) -> Density {
    let volume_cm3 = 4.0 / 3.0 * std::f64::consts::PI * radius.to_cm().powi(3);
    Density::from_grams_per_cm3(mass.to_kg() * 1000.0 / volume_cm3)
}

/// Arranges the stars of a system into an orbit chain.
///
/// Stars are sorted by descending mass (stable) and the first becomes the
/// root: no parent, zero semi-major axis, zero period. The others are then
/// fixed in the order they were generated, each orbiting the star fixed just
/// before it, outside both stars' radii and beyond that star's own orbit.
///
/// A companion's parent may therefore sit later in the sorted list than the
/// companion itself.
pub fn fix_star_orbitals(system: SystemId, stars: &mut [Star], rng: &mut ChaChaRng) {
    let heavier_first = |a: &Star, b: &Star| b.info.mass.to_kg().total_cmp(&a.info.mass.to_kg());

    // Both sorts are stable with the same key, so they apply the same permutation
    let mut generated_at: Vec<usize> = (0..stars.len()).collect();
    generated_at.sort_by(|&a, &b| heavier_first(&stars[a], &stars[b]));
    stars.sort_by(heavier_first);

    if let Some(root) = stars.first_mut() {
        root.info.orbit = OrbitalParameters::stationary();
    }

    let mut chain: Vec<usize> = (1..stars.len()).collect();
    chain.sort_by_key(|&i| generated_at[i]);

    let mut parent = 0;
    for current in chain {
        let (parent_radius, parent_mass, parent_axis) = {
            let info = &stars[parent].info;
            (info.radius, info.mass, info.orbit.semi_major_axis)
        };
        let star = &stars[current].info;

        let clearance = (star.radius + parent_radius) * CLEARANCE_FACTOR;
        let extra = Length::from_au(log_uniform(rng, COMPANION_EXTRA_AU.0, COMPANION_EXTRA_AU.1));
        let semi_major_axis = clearance + parent_axis + extra;
        let eccentricity = 0.5 * distribute(rng.random());
        let inclination = tilt(rng, 10.0);

        let orbit = orbit_around(
            system,
            BodyRef::Star(parent as u32),
            semi_major_axis,
            eccentricity,
            inclination,
            (star.mass, parent_mass),
            rng,
        );
        stars[current].info.orbit = orbit;
        parent = current;
    }
}

/// Farthest any star can get from the root, in AU: the largest sum of
/// apoapsides along a star's chain of parents.
pub fn outer_star_reach(stars: &[Star]) -> f64 {
    (0..stars.len())
        .map(|i| {
            let mut reach = 0.0;
            let mut current = Some(i);
            // A chain never holds more links than there are stars
            for _ in 0..stars.len() {
                let Some(star) = current.and_then(|c| stars.get(c)) else {
                    break;
                };
                reach += star.info.orbit.apoapsis().to_au();
                current = match star.info.parent() {
                    Some(BodyRef::Star(p)) => Some(p as usize),
                    _ => None,
                };
            }
            reach
        })
        .fold(0.0, f64::max)
}

/// Mass-weighted offset of all stars from the root star (system frame).
pub fn barycenter(stars: &[Star]) -> Point3<f64> {
    let Some(root) = stars.first() else {
        return Point3::origin();
    };
    let total: Mass = stars.iter().map(|s| s.info.mass).sum();
    let weighted = stars
        .iter()
        .fold(Vector3::zeros(), |acc, s| {
            acc + (s.position - root.position) * s.info.mass.to_kg()
        });
    root.position + weighted / total.to_kg()
}

/// Planets around the root star, each followed by its moons.
pub fn generate_planets(
    system: SystemId,
    stars: &[Star],
    rng: &mut ChaChaRng,
    names: &mut dyn NameGenerator,
) -> Vec<Planet> {
    let Some(root) = stars.first() else {
        return Vec::new();
    };
    let band_start = outer_star_reach(stars);

    let count = rng.random_range(0..=MAX_PLANETS);
    let mut planets = Vec::new();
    let mut last = band_start;

    for _ in 0..count {
        let planet = generate_planet(system, root, band_start, last, rng, names);
        last = planet.info.orbit.semi_major_axis.to_au();

        let moons = generate_moons(system, &planet, planets.len(), rng);
        planets.push(planet);
        planets.extend(moons);

        if last > band_start + PLANET_BAND_WIDTH {
            break;
        }
    }
    planets
}

fn generate_planet(
    system: SystemId,
    root: &Star,
    band_start: f64,
    last: f64,
    rng: &mut ChaChaRng,
    names: &mut dyn NameGenerator,
) -> Planet {
    let eccentricity = distribute(rng.random());
    let spread = match eccentricity {
        e if e < 0.1 => 10.0,
        e if e < 0.3 => 20.0,
        _ => 45.0,
    };
    let inclination = tilt(rng, spread);

    let radius = Length::from_km(planet_radius_km(rng));
    let density = Density::from_grams_per_cm3(uniform(rng, DENSITY_RANGE.0, DENSITY_RANGE.1));
    let mass = density.sphere_mass(radius);

    let step = 0.1 + rng.random::<f64>() * (1.0 + 10.0 * smoothstep(0.0, 10.0, last));
    let clearance = band_start + ((radius + root.info.radius) * CLEARANCE_FACTOR).to_au();
    let semi_major_axis = Length::from_au((last + step).max(clearance));

    let orbit = orbit_around(
        system,
        BodyRef::Star(0),
        semi_major_axis,
        eccentricity,
        inclination,
        (mass, root.info.mass),
        rng,
    );

    let a = semi_major_axis.to_au();
    let planet_type = if radius.to_km() > GAS_GIANT_RADIUS_KM
        || rng.random::<f64>() < (0.5 * ((a + 0.5) / 50.0).ln() + 1.0).min(0.75)
    {
        PlanetType::Gaseous
    } else {
        PlanetType::Rocky
    };

    let name = names.generate(rng, 4);
    let seed = rng.random();

    Planet {
        bounds: body_bounds(Point3::origin(), radius),
        position: Point3::origin(),
        name,
        descriptor: PlanetDescriptor { planet_type },
        info: BodyInfo {
            system,
            orbit,
            radius,
            mass,
            density,
            seed,
        },
    }
}

/// Moons of the planet stored at `planet_index`, innermost first.
///
/// Each moon sits between the previous one (plus clearance) and half the
/// planet's sphere of influence; generation stops when that window closes.
fn generate_moons(
    system: SystemId,
    planet: &Planet,
    planet_index: usize,
    rng: &mut ChaChaRng,
) -> Vec<Planet> {
    let limit = 0.5 * planet.info.orbit.sphere_of_influence.to_au();
    let mut moons = Vec::new();
    let mut chance = MOON_CHANCE;
    let mut last = 0.0;

    while rng.random::<f64>() < chance {
        let radius =
            planet.info.radius * uniform(rng, MOON_RADIUS_FRACTION.0, MOON_RADIUS_FRACTION.1);
        let inner = last + ((radius + planet.info.radius) * CLEARANCE_FACTOR).to_au();
        if inner >= limit {
            break;
        }

        let semi_major_axis = Length::from_au(uniform(rng, inner, limit));
        let eccentricity = 0.5 * distribute(rng.random());
        let inclination = tilt(rng, 10.0);
        let density = Density::from_grams_per_cm3(uniform(rng, DENSITY_RANGE.0, DENSITY_RANGE.1));
        let mass = density.sphere_mass(radius);

        let orbit = orbit_around(
            system,
            BodyRef::Planet(planet_index as u32),
            semi_major_axis,
            eccentricity,
            inclination,
            (mass, planet.info.mass),
            rng,
        );

        moons.push(Planet {
            bounds: body_bounds(Point3::origin(), radius),
            position: Point3::origin(),
            name: format!("{} {}", planet.name, moon_numeral(moons.len())),
            descriptor: PlanetDescriptor {
                planet_type: PlanetType::Rocky,
            },
            info: BodyInfo {
                system,
                orbit,
                radius,
                mass,
                density,
                seed: rng.random(),
            },
        });

        last = semi_major_axis.to_au();
        chance *= MOON_DECAY;
    }
    moons
}

/// Completes an orbit with random angles and the two-body period and sphere
/// of influence. `masses` is (body, parent).
fn orbit_around(
    system: SystemId,
    parent: BodyRef,
    semi_major_axis: Length,
    eccentricity: f64,
    inclination: f64,
    masses: (Mass, Mass),
    rng: &mut ChaChaRng,
) -> OrbitalParameters {
    let (mass, parent_mass) = masses;
    let mut orbit = OrbitalParameters {
        eccentricity,
        semi_major_axis,
        inclination,
        ascending_node: angle(rng),
        periapsis_arg: angle(rng),
        mean_anomaly_at_epoch: angle(rng),
        true_anomaly: 0.0,
        period: orbital_period(semi_major_axis, mass + parent_mass),
        orbiting_body: Some(parent),
        sphere_of_influence: sphere_of_influence(semi_major_axis, mass, parent_mass),
    };
    orbit.true_anomaly = distance_and_true_anomaly(&orbit, orbit.mean_anomaly_at_epoch).0;

    if orbit.has_degenerate_period() {
        warn!(
            system = system.0,
            ?parent,
            semi_major_axis = semi_major_axis.to_au(),
            period = orbit.period.to_seconds(),
            "degenerate orbit: non-finite period"
        );
    }
    orbit
}
