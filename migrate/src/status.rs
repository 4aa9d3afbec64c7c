//! Migration state reported by the runner.

use std::fmt;

/// Where a database stands relative to its migration history.
///
/// `NoVersion` and `At` are the only states from which further
/// migrations may run. A failure partway through a step leaves the
/// database `DirtyAt` the attempted version, which must be repaired
/// manually before the runner will touch it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    /// No migration has ever been applied.
    NoVersion,
    /// The database is cleanly at the given version.
    At(i64),
    /// A migration to the given version failed partway through.
    DirtyAt(i64),
}

impl MigrationStatus {
    /// Returns the recorded version, if any.
    pub fn version(&self) -> Option<i64> {
        match self {
            MigrationStatus::NoVersion => None,
            MigrationStatus::At(v) | MigrationStatus::DirtyAt(v) => Some(*v),
        }
    }

    /// Returns true if the database needs manual repair.
    pub fn is_dirty(&self) -> bool {
        matches!(self, MigrationStatus::DirtyAt(_))
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationStatus::NoVersion => write!(f, "no version"),
            MigrationStatus::At(v) => write!(f, "at version {v}"),
            MigrationStatus::DirtyAt(v) => write!(f, "dirty at version {v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_accessor() {
        assert_eq!(MigrationStatus::NoVersion.version(), None);
        assert_eq!(MigrationStatus::At(42).version(), Some(42));
        assert_eq!(MigrationStatus::DirtyAt(42).version(), Some(42));
    }

    #[test]
    fn test_dirty_flag() {
        assert!(!MigrationStatus::NoVersion.is_dirty());
        assert!(!MigrationStatus::At(1).is_dirty());
        assert!(MigrationStatus::DirtyAt(1).is_dirty());
    }

    #[test]
    fn test_display() {
        assert_eq!(MigrationStatus::At(7).to_string(), "at version 7");
        assert_eq!(MigrationStatus::DirtyAt(7).to_string(), "dirty at version 7");
    }
}
