//! SQLite migration runner.
//!
//! A thin adapter over `rusqlite` that tracks applied versions in a
//! single-row `schema_migrations` table and applies each migration file
//! inside its own transaction. The version row is marked dirty before a
//! step runs and cleared afterwards, so a crash mid-step is visible on
//! the next invocation instead of silently corrupting state.
//!
//! Only SQLite is managed directly. PostgreSQL and MySQL projects are
//! expected to use an external migration tool; [`Runner::for_engine`]
//! makes that explicit by refusing anything but `sqlite`.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::{MigrateError, Result};
use crate::files::MigrationPair;
use crate::status::MigrationStatus;

const VERSION_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER NOT NULL,
    dirty INTEGER NOT NULL
)";

/// Applies migration pairs to a SQLite database.
#[derive(Debug)]
pub struct Runner {
    conn: Connection,
}

impl Runner {
    /// Opens (or creates) a SQLite database file and prepares the
    /// version-tracking table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Opens an in-memory database. Used by tests and the environment
    /// doctor, where no state should persist.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Opens a database file, first checking that `engine` is one the
    /// runner manages.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::NotSupported`] for any engine other than
    /// `sqlite`.
    pub fn for_engine(engine: &str, path: impl AsRef<Path>) -> Result<Self> {
        if engine != "sqlite" {
            return Err(MigrateError::NotSupported(engine.to_string()));
        }
        Self::open(path)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(VERSION_TABLE_SQL, [])?;
        Ok(Runner { conn })
    }

    /// Reads the current migration state.
    pub fn status(&self) -> Result<MigrationStatus> {
        let row: Option<(i64, bool)> = self
            .conn
            .query_row(
                "SELECT version, dirty FROM schema_migrations LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(match row {
            None => MigrationStatus::NoVersion,
            Some((version, true)) => MigrationStatus::DirtyAt(version),
            Some((version, false)) => MigrationStatus::At(version),
        })
    }

    /// Applies every pair with a version greater than the current one,
    /// in ascending order. Returns the number of migrations applied.
    ///
    /// Each step executes in its own transaction. The version row is set
    /// dirty before the step and cleared after it commits, so a failure
    /// surfaces as [`MigrateError::Dirty`] on the next run.
    pub fn up(&mut self, pairs: &[MigrationPair]) -> Result<usize> {
        let current = self.require_clean()?;

        let mut applied = 0;
        for pair in pairs {
            if current.is_some_and(|v| pair.version <= v) {
                continue;
            }
            let sql = pair.read_up()?;
            self.set_version(pair.version, true)?;
            self.run_step(&sql)?;
            self.set_version(pair.version, false)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Rolls back the most recent `steps` migrations. Returns the number
    /// actually rolled back, which may be fewer if history runs out.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::UnknownVersion`] if the recorded version
    /// has no matching pair on disk, so the down SQL cannot be found.
    pub fn rollback(&mut self, pairs: &[MigrationPair], steps: usize) -> Result<usize> {
        let Some(current) = self.require_clean()? else {
            return Ok(0);
        };

        // Applied history, newest first.
        let mut applied: Vec<&MigrationPair> =
            pairs.iter().filter(|p| p.version <= current).collect();
        applied.sort_by_key(|p| std::cmp::Reverse(p.version));

        if applied.first().is_none_or(|p| p.version != current) {
            return Err(MigrateError::UnknownVersion(current));
        }

        let mut rolled_back = 0;
        for (idx, pair) in applied.iter().take(steps).enumerate() {
            let sql = pair.read_down()?;
            self.set_version(pair.version, true)?;
            self.run_step(&sql)?;
            match applied.get(idx + 1) {
                Some(prev) => self.set_version(prev.version, false)?,
                None => self.clear_version()?,
            }
            rolled_back += 1;
        }
        Ok(rolled_back)
    }

    /// Overwrites the recorded version and clears the dirty flag.
    ///
    /// This is the manual-repair escape hatch for a dirty database:
    /// after fixing the schema by hand, force the version the database
    /// actually matches.
    pub fn force_version(&mut self, version: i64) -> Result<()> {
        self.set_version(version, false)
    }

    /// Returns the underlying connection, e.g. for ad-hoc inspection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Errors out if dirty, otherwise returns the current version.
    fn require_clean(&self) -> Result<Option<i64>> {
        match self.status()? {
            MigrationStatus::DirtyAt(v) => Err(MigrateError::Dirty(v)),
            MigrationStatus::At(v) => Ok(Some(v)),
            MigrationStatus::NoVersion => Ok(None),
        }
    }

    fn run_step(&mut self, sql: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.commit()?;
        Ok(())
    }

    fn set_version(&mut self, version: i64, dirty: bool) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM schema_migrations", [])?;
        tx.execute(
            "INSERT INTO schema_migrations (version, dirty) VALUES (?1, ?2)",
            rusqlite::params![version, dirty],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn clear_version(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM schema_migrations", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_has_no_version() {
        let runner = Runner::open_in_memory().unwrap();
        assert_eq!(runner.status().unwrap(), MigrationStatus::NoVersion);
    }

    #[test]
    fn test_for_engine_rejects_non_sqlite() {
        let err = Runner::for_engine("postgresql", ":memory:").unwrap_err();
        assert!(matches!(err, MigrateError::NotSupported(_)));
    }

    #[test]
    fn test_force_version_clears_dirty() {
        let mut runner = Runner::open_in_memory().unwrap();
        runner.set_version(5, true).unwrap();
        assert_eq!(runner.status().unwrap(), MigrationStatus::DirtyAt(5));

        runner.force_version(5).unwrap();
        assert_eq!(runner.status().unwrap(), MigrationStatus::At(5));
    }

    #[test]
    fn test_up_refuses_dirty_database() {
        let mut runner = Runner::open_in_memory().unwrap();
        runner.set_version(3, true).unwrap();
        let err = runner.up(&[]).unwrap_err();
        assert!(matches!(err, MigrateError::Dirty(3)));
    }
}
