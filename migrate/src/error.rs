//! Error types for migration file management and the SQLite runner.

use thiserror::Error;

/// Errors that can occur while creating, listing, or applying migrations.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Filesystem access failure while reading or writing migration files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite database operation failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration name contains characters outside `[a-z0-9_]` or does not
    /// start with a letter.
    #[error("invalid migration name '{0}': use lowercase letters, digits, and underscores")]
    InvalidName(String),

    /// An up file exists without its matching down file, or vice versa.
    #[error("orphaned migration file for version {version}: missing {missing} counterpart")]
    OrphanedFile {
        /// Version whose pair is incomplete.
        version: i64,
        /// Which direction is missing, `"up"` or `"down"`.
        missing: &'static str,
    },

    /// A previous migration run failed partway through and left the
    /// database marked dirty.
    #[error("database is dirty at version {0}: resolve manually, then clear the dirty flag")]
    Dirty(i64),

    /// The requested migration version does not exist on disk.
    #[error("no migration found for version {0}")]
    UnknownVersion(i64),

    /// The runner only manages SQLite databases.
    #[error("engine '{0}' is not supported by the built-in runner; use an external migration tool")]
    NotSupported(String),
}

/// Convenience alias for results with [`MigrateError`].
pub type Result<T> = std::result::Result<T, MigrateError>;
