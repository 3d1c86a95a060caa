//! Keplerian orbit evaluation.
//!
//! Stateless conversion of orbital elements plus an epoch time into a
//! Cartesian position, and the two-body laws used while building systems
//! (orbital period, sphere of influence).

pub mod elements;
pub mod kepler;


pub use elements::{BodyRef, OrbitalParameters};
pub use kepler::{
    compute_position, distance_and_true_anomaly, orbital_period, solve_eccentric_anomaly,
    sphere_of_influence, MAX_SUPPORTED_ECCENTRICITY,
};
