//! Crate error type.

use crate::core::startup::MissingEnvError;
use crate::core::validator::ConfigurationError;
use thiserror::Error;

/// Result alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a synthesis run.
#[derive(Debug, Error)]
pub enum Error {
    /// Required process variables absent
    #[error(transparent)]
    MissingEnv(#[from] MissingEnvError),

    /// Resolved configuration broke one or more rules
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Context file or inline context could not be read
    #[error("{0}")]
    Context(String),

    /// File system failure
    #[error("{0}")]
    Io(String),

    /// Manifest or schema could not be rendered
    #[error("serialize error: {0}")]
    Serialize(String),
}
