//! Orbital element types.

use std::fmt;

use serde::{Deserialize, Serialize};
use units::{Length, Time};

/// Handle to the body an orbit is centred on.
///
/// Indexes into the star or planet list of the system that owns both bodies,
/// so a hierarchy can only point at bodies of the same system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRef {
    Star(u32),
    Planet(u32),
}

impl BodyRef {
    pub fn index(&self) -> usize {
        match self {
            BodyRef::Star(i) | BodyRef::Planet(i) => *i as usize,
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self, BodyRef::Star(_))
    }

    pub fn is_planet(&self) -> bool {
        matches!(self, BodyRef::Planet(_))
    }
}

/// Keplerian elements of a body around its parent.
///
/// Angles are in radians. A body without a parent is the root of its system
/// and carries a zero semi-major axis and a zero period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalParameters {
    /// Orbital eccentricity, 0 ≤ e < 1
    pub eccentricity: f64,

    /// Semi-major axis (AU during generation)
    pub semi_major_axis: Length,

    /// Inclination relative to the system reference plane
    pub inclination: f64,

    /// Longitude of the ascending node
    pub ascending_node: f64,

    /// Argument of periapsis
    pub periapsis_arg: f64,

    /// Mean anomaly at the epoch (t = 0)
    pub mean_anomaly_at_epoch: f64,

    /// True anomaly at the epoch, filled in when the body is first placed
    pub true_anomaly: f64,

    /// Orbital period
    pub period: Time,

    /// Parent body, `None` for the root of the hierarchy
    pub orbiting_body: Option<BodyRef>,

    /// Radius within which this body's gravity dominates its parent's
    pub sphere_of_influence: Length,
}

impl OrbitalParameters {
    /// Elements of a body that does not move: the root of a hierarchy.
    pub fn stationary() -> Self {
        Self {
            eccentricity: 0.0,
            semi_major_axis: Length::zero(),
            inclination: 0.0,
            ascending_node: 0.0,
            periapsis_arg: 0.0,
            mean_anomaly_at_epoch: 0.0,
            true_anomaly: 0.0,
            period: Time::zero(),
            orbiting_body: None,
            sphere_of_influence: Length::zero(),
        }
    }

    /// Mean anomaly at `time` after the epoch.
    ///
    /// M = M₀ + 2π t / P, or M₀ when the period is zero.
    pub fn mean_anomaly_at(&self, time: Time) -> f64 {
        let period = self.period.to_seconds();
        if period == 0.0 {
            return self.mean_anomaly_at_epoch;
        }
        self.mean_anomaly_at_epoch + std::f64::consts::TAU * time.to_seconds() / period
    }

    /// Closest approach to the parent body
    pub fn periapsis(&self) -> Length {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest separation from the parent body
    pub fn apoapsis(&self) -> Length {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    pub fn is_root(&self) -> bool {
        self.orbiting_body.is_none()
    }

    /// True when the period came out NaN or infinite.
    pub fn has_degenerate_period(&self) -> bool {
        !self.period.is_finite()
    }
}

impl fmt::Display for OrbitalParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.orbiting_body {
            Some(BodyRef::Star(i)) => write!(f, "orbiting star #{}", i)?,
            Some(BodyRef::Planet(i)) => write!(f, "orbiting planet #{}", i)?,
            None => write!(f, "orbiting none")?,
        }
        write!(
            f,
            " a={:.4} AU e={:.3} i={:.2}° period={:.2} days",
            self.semi_major_axis.to_au(),
            self.eccentricity,
            self.inclination.to_degrees(),
            self.period.to_days()
        )
    }
}
