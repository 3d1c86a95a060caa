use octree::OctreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse generation config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid generation config: {0}")]
    Invalid(String),
}

/// Failure while building a galaxy.
///
/// Numeric degeneracies are never reported here; they are logged and kept in
/// the generated data.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("spatial index rejected a system: {0}")]
    Index(#[from] OctreeError),
}
