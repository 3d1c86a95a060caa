//! Star classification and bulk properties.

use rand_chacha::ChaChaRng;

use crate::sampling::uniform;
use crate::spectral::{LuminosityClass, SpectralClass, StarType};

/// Solar effective temperature in Kelvin
pub const SOLAR_TEMPERATURE: f64 = 5778.0;

/// Luminosity bracket in solar luminosities.
///
/// Giants and dwarfs are bracketed by luminosity class alone, main-sequence
/// stars by spectral class.
pub fn luminosity_range(
    spectral_class: SpectralClass,
    luminosity_class: LuminosityClass,
) -> (f64, f64) {
    match luminosity_class {
        LuminosityClass::Ia => (1e5, 1e7),
        LuminosityClass::Ib => (1e4, 1e5),
        LuminosityClass::II => (100.0, 1e4),
        LuminosityClass::III => (10.0, 100.0),
        LuminosityClass::IV => (1.0, 10.0),
        LuminosityClass::VI => (0.1, 1.0),
        LuminosityClass::VII => (0.01, 0.1),
        LuminosityClass::V => match spectral_class {
            SpectralClass::O => (100.0, 1e7),
            SpectralClass::B => (10.0, 1000.0),
            SpectralClass::A => (5.0, 300.0),
            SpectralClass::F => (3.0, 50.0),
            SpectralClass::G => (0.5, 2.0),
            SpectralClass::K => (0.1, 0.8),
            _ => (0.001, 0.01),
        },
    }
}

/// Radius in solar radii from the Stefan-Boltzmann law: R = √L · (T☉/T)²
pub fn radius_from_luminosity(luminosity: f64, temperature: f64) -> f64 {
    luminosity.sqrt() * (SOLAR_TEMPERATURE / temperature).powi(2)
}

/// Mass in solar masses from a broken power-law mass-luminosity relation.
///
/// | Luminosity (L☉)  | Mass (M☉)         |
/// |------------------|-------------------|
/// | > 1.76e6         | L / 32000         |
/// | 15 – 1.76e6      | (L / 1.4)^(1/3.5) |
/// | 0.03 – 15        | L^(1/4)           |
/// | < 0.03           | (L / 0.23)^(1/2.3)|
pub fn mass_from_luminosity(luminosity: f64) -> f64 {
    match luminosity {
        l if l > 1.76e6 => l / 32_000.0,
        l if l > 15.0 => (l / 1.4).powf(1.0 / 3.5),
        l if l > 0.03 => l.powf(0.25),
        l => (l / 0.23).powf(1.0 / 2.3),
    }
}

/// Draws a full star classification.
///
/// Draw order: spectral class, temperature, luminosity class, luminosity.
pub fn sample_star_type(rng: &mut ChaChaRng) -> StarType {
    let spectral_class = SpectralClass::sample(rng);
    let (t_min, t_max) = spectral_class.temperature_range();
    let temperature = uniform(rng, t_min, t_max);
    let luminosity_class = LuminosityClass::sample(rng, spectral_class);
    let (l_min, l_max) = luminosity_range(spectral_class, luminosity_class);
    let luminosity = uniform(rng, l_min, l_max);

    StarType {
        spectral_class,
        subclass: spectral_class.subclass(temperature),
        luminosity_class,
        temperature,
        luminosity,
    }
}
