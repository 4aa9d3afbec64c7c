//! Error types for config document operations.
//!
//! Provides a unified error type covering all failure modes: I/O, YAML
//! serialization, and config migration.

use thiserror::Error;

/// Errors that can occur during config document operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A document shape problem that serde cannot express as a YAML error
    /// (e.g., a v1 config missing its `packages` list).
    #[error("malformed config: {0}")]
    Malformed(String),

    /// The source document's version is not one migration understands.
    #[error("unsupported config version '{0}': expected \"1\" or \"2\"")]
    UnsupportedVersion(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
