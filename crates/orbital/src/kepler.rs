//! Kepler's equation and orbital-to-Cartesian conversion.
//!
//! Follows the low-precision recipe from Paul Schlyter's "How to compute
//! planetary positions": a one-step eccentric anomaly for nearly circular
//! orbits, Newton-Raphson otherwise, then rotation of the in-plane position
//! through ω, Ω and i.

use nalgebra::Vector3;
use tracing::{error, warn};
use units::{Length, Mass, Time, G_SI};

use crate::elements::OrbitalParameters;

/// Eccentricities at or above this have no solution path (no parabolic or
/// hyperbolic branch).
pub const MAX_SUPPORTED_ECCENTRICITY: f64 = 0.98;

/// Below this eccentricity the first-order estimate is used directly
const CLOSED_FORM_ECCENTRICITY: f64 = 0.05;

/// Newton-Raphson stops once a step is smaller than this (radians)
const ANOMALY_TOLERANCE: f64 = 1e-3;

const MAX_ITERATIONS: usize = 50;

/// Solve Kepler's equation M = E − e·sin(E) for the eccentric anomaly E.
///
/// # Arguments
/// * `eccentricity` - Orbital eccentricity e
/// * `mean_anomaly` - Mean anomaly M (radians)
///
/// # Returns
/// Eccentric anomaly E in radians, or exactly `0.0` when
/// `eccentricity >= 0.98` (logged as an error).
///
/// # Examples
/// ```
/// use orbital::solve_eccentric_anomaly;
///
/// let e = 0.5;
/// let m = 1.0;
/// let ecc_anomaly = solve_eccentric_anomaly(e, m);
/// assert!((ecc_anomaly - e * ecc_anomaly.sin() - m).abs() < 1e-3);
/// ```
pub fn solve_eccentric_anomaly(eccentricity: f64, mean_anomaly: f64) -> f64 {
    if eccentricity >= MAX_SUPPORTED_ECCENTRICITY {
        error!(
            eccentricity,
            "unsupported eccentricity: cannot solve eccentric anomaly for e >= {}",
            MAX_SUPPORTED_ECCENTRICITY
        );
        return 0.0;
    }

    let e = eccentricity;
    let m = mean_anomaly;
    let mut ecc_anomaly = m + e * m.sin() * (1.0 + e * m.cos());
    if e < CLOSED_FORM_ECCENTRICITY {
        return ecc_anomaly;
    }

    for _ in 0..MAX_ITERATIONS {
        let delta = (ecc_anomaly - e * ecc_anomaly.sin() - m) / (1.0 - e * ecc_anomaly.cos());
        ecc_anomaly -= delta;
        if delta.is_nan() || delta.abs() < ANOMALY_TOLERANCE {
            return ecc_anomaly;
        }
    }

    warn!(
        eccentricity,
        mean_anomaly, "eccentric anomaly did not converge after {} iterations", MAX_ITERATIONS
    );
    ecc_anomaly
}

/// True anomaly and distance from the parent for a given mean anomaly.
///
/// # Returns
/// `(true_anomaly, distance)` with the angle in radians and the distance in
/// the unit of `semi_major_axis` (AU).
pub fn distance_and_true_anomaly(orbit: &OrbitalParameters, mean_anomaly: f64) -> (f64, f64) {
    let e = orbit.eccentricity;
    let a = orbit.semi_major_axis.to_au();
    let ecc_anomaly = solve_eccentric_anomaly(e, mean_anomaly);

    let xv = a * (ecc_anomaly.cos() - e);
    let yv = a * ((1.0 - e * e).sqrt() * ecc_anomaly.sin());

    let true_anomaly = yv.atan2(xv);
    let distance = (xv * xv + yv * yv).sqrt();
    (true_anomaly, distance)
}

/// Position of a body relative to its parent at `time` after the epoch.
///
/// # Arguments
/// * `orbit` - Orbital elements (semi-major axis in AU)
/// * `time` - Time since the epoch
/// * `unit_scale` - Output units per AU (1.0 keeps AU)
///
/// # Examples
/// ```
/// use orbital::{compute_position, OrbitalParameters};
/// use units::{Length, Time};
///
/// let mut orbit = OrbitalParameters::stationary();
/// orbit.semi_major_axis = Length::from_au(1.0);
/// orbit.period = Time::from_years(1.0);
///
/// let pos = compute_position(&orbit, Time::zero(), 1.0);
/// assert!((pos.x - 1.0).abs() < 1e-12);
/// ```
pub fn compute_position(orbit: &OrbitalParameters, time: Time, unit_scale: f64) -> Vector3<f64> {
    let mean_anomaly = orbit.mean_anomaly_at(time);
    let (true_anomaly, distance) = distance_and_true_anomaly(orbit, mean_anomaly);

    let (sin_node, cos_node) = orbit.ascending_node.sin_cos();
    let (sin_arg, cos_arg) = (true_anomaly + orbit.periapsis_arg).sin_cos();
    let (sin_inc, cos_inc) = orbit.inclination.sin_cos();

    let x = distance * (cos_node * cos_arg - sin_node * sin_arg * cos_inc);
    let y = distance * (sin_node * cos_arg + cos_node * sin_arg * cos_inc);
    let z = distance * (sin_arg * sin_inc);

    Vector3::new(x, y, z) * unit_scale
}

/// Orbital period from Kepler's third law: T = 2π√(a³ / (G·M)).
///
/// `total_mass` is the combined mass of both bodies. A zero or negative mass
/// or distance yields a NaN or infinite period, which is returned unchanged.
pub fn orbital_period(semi_major_axis: Length, total_mass: Mass) -> Time {
    let a = semi_major_axis.to_m();
    let mu = G_SI * total_mass.to_kg();
    Time::from_seconds(std::f64::consts::TAU * (a.powi(3) / mu).sqrt())
}

/// Sphere-of-influence radius: r = a · (m / M)^(2/5)
pub fn sphere_of_influence(semi_major_axis: Length, mass: Mass, parent_mass: Mass) -> Length {
    semi_major_axis * (mass / parent_mass).powf(0.4)
}
