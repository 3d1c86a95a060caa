//! Random draws and shaping curves shared by the body generators.

use std::f64::consts::TAU;

use rand::Rng;
use rand_chacha::ChaChaRng;

/// Uniform sample in [min, max)
pub fn uniform(rng: &mut ChaChaRng, min: f64, max: f64) -> f64 {
    min + rng.random::<f64>() * (max - min)
}

/// Uniform sample in [-width/2, width/2)
pub fn centered(rng: &mut ChaChaRng, width: f64) -> f64 {
    rng.random::<f64>() * width - 0.5 * width
}

/// Log-uniform sample in [min, max)
pub fn log_uniform(rng: &mut ChaChaRng, min: f64, max: f64) -> f64 {
    uniform(rng, min.ln(), max.ln()).exp()
}

/// Uniform angle in [0, 2π)
pub fn angle(rng: &mut ChaChaRng) -> f64 {
    rng.random::<f64>() * TAU
}

/// Uniform angle in [-degrees, degrees), returned in radians
pub fn tilt(rng: &mut ChaChaRng, degrees: f64) -> f64 {
    uniform(rng, -degrees, degrees).to_radians()
}

/// Hermite interpolation between 0 at `edge0` and 1 at `edge1`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Reshapes a uniform draw into an eccentricity-like value.
///
/// Mostly small with a steep tail close to 1; never exceeds 0.9.
pub fn distribute(x: f64) -> f64 {
    0.3 * x.powi(3) + 0.6 * smoothstep(0.92, 1.0, x)
}

/// Planet radius in km, bucketed after the observed exoplanet size
/// distribution.
pub fn planet_radius_km(rng: &mut ChaChaRng) -> f64 {
    let (min, max) = match rng.random::<f64>() {
        r if r < 0.03 => (98_000.0, 130_000.0),
        r if r < 0.10 => (39_000.0, 98_000.0),
        r if r < 0.30 => (2_000.0, 8_000.0),
        r if r < 0.60 => (8_000.0, 13_000.0),
        _ => (13_000.0, 39_000.0),
    };
    uniform(rng, min, max)
}

/// Roman numeral for a zero-based moon index (0 → "I").
pub fn moon_numeral(index: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    NUMERALS
        .iter()
        .fold(
            (String::new(), index + 1),
            |(acc, remaining), &(value, numeral)| {
                let count = remaining / value;
                (acc + &numeral.repeat(count), remaining % value)
            },
        )
        .0
}
