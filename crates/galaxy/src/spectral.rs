use std::fmt;

use rand::Rng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    W, // Wolf-Rayet
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    L,
    T,
    Y, // Brown dwarfs
    C, // Carbon stars
}

impl SpectralClass {
    pub const ALL: [SpectralClass; 12] = [
        SpectralClass::W,
        SpectralClass::O,
        SpectralClass::B,
        SpectralClass::A,
        SpectralClass::F,
        SpectralClass::G,
        SpectralClass::K,
        SpectralClass::M,
        SpectralClass::L,
        SpectralClass::T,
        SpectralClass::Y,
        SpectralClass::C,
    ];

    /// Effective temperature range in Kelvin
    pub fn temperature_range(&self) -> (f64, f64) {
        match self {
            SpectralClass::W => (50_000.0, 200_000.0),
            SpectralClass::O => (30_000.0, 50_000.0),
            SpectralClass::B => (10_000.0, 30_000.0),
            SpectralClass::A => (7_500.0, 10_000.0),
            SpectralClass::F => (6_000.0, 7_500.0),
            SpectralClass::G => (5_200.0, 6_000.0),
            SpectralClass::K => (3_700.0, 5_200.0),
            SpectralClass::M => (2_400.0, 3_700.0),
            SpectralClass::L => (1_300.0, 2_400.0),
            SpectralClass::T => (550.0, 1_300.0),
            SpectralClass::Y => (250.0, 550.0),
            SpectralClass::C => (3_000.0, 10_000.0),
        }
    }

    /// Declared weight of the class in the sampling table
    pub fn probability(&self) -> f64 {
        match self {
            SpectralClass::W => 0.01,
            SpectralClass::O => 0.04,
            SpectralClass::M => 0.4,
            SpectralClass::C => 0.001,
            _ => 0.1,
        }
    }

    /// Luminosity classes that never occur with this spectral class.
    pub fn excluded_luminosity_classes(&self) -> &'static [LuminosityClass] {
        use LuminosityClass::*;
        match self {
            SpectralClass::W => &[II, III, IV, V, VI, VII],
            SpectralClass::L | SpectralClass::T | SpectralClass::Y => &[Ia, Ib, II, III, IV, VII],
            _ => &[],
        }
    }

    pub fn allows(&self, luminosity_class: LuminosityClass) -> bool {
        !self.excluded_luminosity_classes().contains(&luminosity_class)
    }

    /// Subclass digit 0-9: which tenth of the temperature range `temperature`
    /// falls in, counted from the cool end.
    pub fn subclass(&self, temperature: f64) -> u8 {
        let (min, max) = self.temperature_range();
        let decile = ((temperature - min) / (max - min) * 10.0).floor();
        decile.clamp(0.0, 9.0) as u8
    }

    /// Classes ordered by ascending probability, ties in declaration order.
    pub fn low_to_high() -> [SpectralClass; 12] {
        let mut classes = Self::ALL;
        classes.sort_by(|a, b| a.probability().total_cmp(&b.probability()));
        classes
    }

    /// Draws a class by walking [`Self::low_to_high`] and returning the first
    /// entry whose probability exceeds a uniform draw, redrawing when none does.
    ///
    /// Only O, W, C, B and M can come out of this walk: a class sharing its
    /// probability with an earlier entry is always shadowed by it.
    pub fn sample(rng: &mut ChaChaRng) -> Self {
        let ordered = Self::low_to_high();
        loop {
            let roll: f64 = rng.random();
            if let Some(class) = ordered.iter().find(|c| roll < c.probability()) {
                return *class;
            }
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            SpectralClass::W => "W",
            SpectralClass::O => "O",
            SpectralClass::B => "B",
            SpectralClass::A => "A",
            SpectralClass::F => "F",
            SpectralClass::G => "G",
            SpectralClass::K => "K",
            SpectralClass::M => "M",
            SpectralClass::L => "L",
            SpectralClass::T => "T",
            SpectralClass::Y => "Y",
            SpectralClass::C => "C",
        };
        write!(f, "{}", str)
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LuminosityClass {
    Ia,  // Hypergiants
    Ib,  // Supergiants
    II,  // Bright giants
    III, // Giants
    IV,  // Subgiants
    V,   // Main sequence
    VI,  // Subdwarfs
    VII, // White dwarfs
}

impl LuminosityClass {
    pub const ALL: [LuminosityClass; 8] = [
        LuminosityClass::Ia,
        LuminosityClass::Ib,
        LuminosityClass::II,
        LuminosityClass::III,
        LuminosityClass::IV,
        LuminosityClass::V,
        LuminosityClass::VI,
        LuminosityClass::VII,
    ];

    pub fn class_name(&self) -> &'static str {
        match self {
            LuminosityClass::Ia => "Hypergiant",
            LuminosityClass::Ib => "Supergiant",
            LuminosityClass::II => "Bright Giant",
            LuminosityClass::III => "Giant",
            LuminosityClass::IV => "Subgiant",
            LuminosityClass::V => "Main Sequence Star",
            LuminosityClass::VI => "Subdwarf",
            LuminosityClass::VII => "White Dwarf",
        }
    }

    pub fn probability(&self) -> f64 {
        match self {
            LuminosityClass::Ia => 0.001,
            LuminosityClass::Ib => 0.02,
            LuminosityClass::II => 0.1,
            LuminosityClass::III => 0.135,
            LuminosityClass::IV => 0.12,
            LuminosityClass::V => 0.4,
            LuminosityClass::VI => 0.1,
            LuminosityClass::VII => 0.08,
        }
    }

    pub fn low_to_high() -> [LuminosityClass; 8] {
        let mut classes = Self::ALL;
        classes.sort_by(|a, b| a.probability().total_cmp(&b.probability()));
        classes
    }

    /// Same walk as [`SpectralClass::sample`], skipping classes the spectral
    /// class excludes.
    pub fn sample(rng: &mut ChaChaRng, spectral_class: SpectralClass) -> Self {
        let ordered = Self::low_to_high();
        loop {
            let roll: f64 = rng.random();
            if let Some(class) = ordered
                .iter()
                .find(|c| roll < c.probability() && spectral_class.allows(**c))
            {
                return *class;
            }
        }
    }
}

impl fmt::Display for LuminosityClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            LuminosityClass::Ia => "Ia",
            LuminosityClass::Ib => "Ib",
            LuminosityClass::II => "II",
            LuminosityClass::III => "III",
            LuminosityClass::IV => "IV",
            LuminosityClass::V => "V",
            LuminosityClass::VI => "VI",
            LuminosityClass::VII => "VII",
        };
        write!(f, "{}", str)
    }
}

/// Full classification of a generated star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarType {
    pub spectral_class: SpectralClass,
    pub subclass: u8,
    pub luminosity_class: LuminosityClass,
    /// Effective temperature in Kelvin
    pub temperature: f64,
    /// Luminosity in solar luminosities
    pub luminosity: f64,
}

impl fmt::Display for StarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            self.spectral_class, self.subclass, self.luminosity_class
        )
    }
}
