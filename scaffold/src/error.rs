//! Error types for project scaffolding.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scaffolding a project.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Filesystem failure while creating directories or writing files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The generated configuration could not be serialized or written.
    #[error("config error: {0}")]
    Config(#[from] sqlc_scaffold_config::ConfigError),

    /// Project name is empty or contains path separators.
    #[error("invalid project name '{0}': use a non-empty name without path separators")]
    InvalidProjectName(String),

    /// The target directory already has contents and `force` was not set.
    #[error("directory {0} is not empty; pass --force to scaffold anyway")]
    DirectoryNotEmpty(PathBuf),
}

/// Convenience alias for results with [`ScaffoldError`].
pub type Result<T> = std::result::Result<T, ScaffoldError>;
