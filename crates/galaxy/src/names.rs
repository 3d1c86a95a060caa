//! Procedural names for stars, planets and systems.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand_chacha::ChaChaRng;

/// Produces display names for generated bodies.
///
/// Implementations must draw randomness only from the `rng` they are handed,
/// so a galaxy's names are reproducible from its seed.
pub trait NameGenerator {
    /// A new name whose core is at least `min_len` characters long.
    fn generate(&mut self, rng: &mut ChaChaRng, min_len: usize) -> String;

    /// Forgets every name handed out so far.
    fn reset(&mut self);
}

/// Syllable-split star names the chain is learned from.
const SOURCE_NAMES: &[&[&str]] = &[
    &["al", "de", "ba", "ran"],
    &["al", "ta", "ir"],
    &["an", "ta", "res"],
    &["arc", "tu", "rus"],
    &["bel", "la", "trix"],
    &["be", "tel", "geu", "se"],
    &["ca", "no", "pus"],
    &["ca", "pel", "la"],
    &["cas", "tor"],
    &["de", "neb"],
    &["fo", "mal", "haut"],
    &["mi", "ra"],
    &["mi", "mo", "sa"],
    &["pol", "lux"],
    &["pro", "cy", "on"],
    &["re", "gu", "lus"],
    &["ri", "gel"],
    &["si", "ri", "us"],
    &["spi", "ca"],
    &["ve", "ga"],
    &["ze", "ni", "th"],
    &["sa", "dal", "mel", "ik"],
    &["al", "na", "ir"],
    &["men", "ka", "li", "nan"],
    &["mir", "fak"],
    &["ha", "mal"],
    &["dub", "he"],
    &["el", "nath"],
    &["a", "chen", "nar"],
    &["sha", "ula"],
    &["tha", "ban"],
    &["ko", "chab"],
    &["ras", "al", "ha", "gue"],
    &["nun", "ki"],
    &["sa", "iph"],
    &["e", "nif"],
    &["di", "phda"],
    &["an", "ka", "a"],
    &["mar", "kab"],
    &["ve", "ro", "ni"],
];

const GREEK_LETTERS: &[&str] = &[
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

const ROMAN_NUMERALS: &[&str] = &[
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV", "XV",
];

const DECORATORS: &[&str] = &[
    "Major", "Majoris", "Minor", "Minoris", "Prime", "Secundus", "Tertium", "System",
];

/// Each decoration is applied with this probability, first match wins.
const DECORATION_CHANCE: f64 = 0.1;

/// Collisions tolerated before a name gets a numeric suffix
const MAX_ATTEMPTS: usize = 32;

fn pick<'a>(rng: &mut ChaChaRng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Names from a first-order Markov chain over syllables of real star names,
/// with optional catalogue-style decorations.
///
/// ```
/// use galaxy::{NameGenerator, SyllableNames};
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
///
/// let mut names = SyllableNames::new();
/// let mut rng = ChaChaRng::seed_from_u64(1);
/// let name = names.generate(&mut rng, 5);
/// assert!(name.len() >= 5);
/// ```
#[derive(Debug, Clone)]
pub struct SyllableNames {
    starts: Vec<&'static str>,
    chain: HashMap<&'static str, Vec<&'static str>>,
    used: HashSet<String>,
}

impl Default for SyllableNames {
    fn default() -> Self {
        Self::new()
    }
}

impl SyllableNames {
    pub fn new() -> Self {
        let mut starts = Vec::new();
        let mut chain: HashMap<&'static str, Vec<&'static str>> = HashMap::new();

        for syllables in SOURCE_NAMES {
            starts.push(syllables[0]);
            for pair in syllables.windows(2) {
                chain.entry(pair[0]).or_default().push(pair[1]);
            }
        }

        Self {
            starts,
            chain,
            used: HashSet::new(),
        }
    }

    /// Number of distinct names handed out since the last reset
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    fn prefix(rng: &mut ChaChaRng) -> String {
        if rng.random::<f64>() < DECORATION_CHANCE {
            return format!("{} ", pick(rng, GREEK_LETTERS));
        }
        if rng.random::<f64>() < DECORATION_CHANCE {
            let letter = char::from(rng.random_range(b'A'..=b'Z'));
            return format!("{}-", letter);
        }
        String::new()
    }

    fn suffix(rng: &mut ChaChaRng) -> String {
        for table in [GREEK_LETTERS, ROMAN_NUMERALS, DECORATORS] {
            if rng.random::<f64>() < DECORATION_CHANCE {
                return format!(" {}", pick(rng, table));
            }
        }
        String::new()
    }

    /// Walks the chain until the name is long enough, restarting on dead ends.
    fn chain_name(&self, rng: &mut ChaChaRng, min_len: usize) -> String {
        loop {
            let mut syllable = pick(rng, &self.starts);
            let mut name = syllable.to_string();

            while name.len() < min_len {
                match self.chain.get(syllable) {
                    Some(next) if !next.is_empty() => {
                        syllable = pick(rng, next);
                        name.push_str(syllable);
                    }
                    _ => syllable = pick(rng, &self.starts),
                }
            }

            if is_pronounceable(&name) {
                return capitalize(&name);
            }
        }
    }
}

impl NameGenerator for SyllableNames {
    fn generate(&mut self, rng: &mut ChaChaRng, min_len: usize) -> String {
        let mut name = String::new();
        for _ in 0..MAX_ATTEMPTS {
            let prefix = Self::prefix(rng);
            let core = self.chain_name(rng, min_len);
            let suffix = Self::suffix(rng);
            name = format!("{}{}{}", prefix, core, suffix);
            if self.used.insert(name.clone()) {
                return name;
            }
        }

        // The chain is exhausted for this length; fall back to a catalogue number
        let numbered = format!("{}-{}", name, self.used.len());
        self.used.insert(numbered.clone());
        numbered
    }

    fn reset(&mut self) {
        self.used.clear();
    }
}

/// At least three letters, no doubled first letter, and no run of more than
/// three consonants.
fn is_pronounceable(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() <= 2 || bytes[0] == bytes[1] {
        return false;
    }
    name.split(|c: char| "aeiouyw".contains(c.to_ascii_lowercase()))
        .all(|run| run.len() <= 3)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
