//! On-disk migration pairs.
//!
//! Each migration is a pair of sibling SQL files sharing a Unix-timestamp
//! version prefix:
//!
//! ```text
//! 1714060800_create_users.up.sql
//! 1714060800_create_users.down.sql
//! ```
//!
//! Both files start with a two-line header identifying the migration and
//! when it was generated. [`create_pair`] writes a fresh pair and
//! [`list_pairs`] reads a directory back into version-sorted order,
//! rejecting orphaned halves.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MigrateError, Result};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("static regex must compile"));

static FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)_([a-z][a-z0-9_]*)\.(up|down)\.sql$").expect("static regex must compile")
});

/// A matched up/down migration file pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPair {
    /// Unix timestamp (seconds) used as the version number.
    pub version: i64,
    /// Human-readable migration name.
    pub name: String,
    /// Path to the `.up.sql` file.
    pub up_path: PathBuf,
    /// Path to the `.down.sql` file.
    pub down_path: PathBuf,
}

impl MigrationPair {
    /// Reads the up-migration SQL, header included.
    pub fn read_up(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.up_path)?)
    }

    /// Reads the down-migration SQL, header included.
    pub fn read_down(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.down_path)?)
    }
}

/// Returns true if `name` is a valid migration name.
///
/// Names must start with a lowercase letter and contain only lowercase
/// letters, digits, and underscores, so they survive as file name stems
/// on every platform.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Creates a new timestamped up/down migration pair in `dir`.
///
/// The directory is created if it does not exist. Both files receive the
/// standard two-line header:
///
/// ```text
/// -- Migration: <name>
/// -- Generated at: <unix-timestamp-seconds>
/// ```
///
/// # Errors
///
/// Returns [`MigrateError::InvalidName`] if the name fails
/// [`is_valid_name`], or [`MigrateError::Io`] on filesystem failure.
pub fn create_pair(dir: impl AsRef<Path>, name: &str) -> Result<MigrationPair> {
    let dir = dir.as_ref();
    if !is_valid_name(name) {
        return Err(MigrateError::InvalidName(name.to_string()));
    }
    fs::create_dir_all(dir)?;

    let version = chrono::Utc::now().timestamp();
    let header = format!("-- Migration: {name}\n-- Generated at: {version}\n");

    let up_path = dir.join(format!("{version}_{name}.up.sql"));
    let down_path = dir.join(format!("{version}_{name}.down.sql"));

    fs::write(&up_path, format!("{header}\n-- Write your up migration here.\n"))?;
    fs::write(&down_path, format!("{header}\n-- Write your down migration here.\n"))?;

    Ok(MigrationPair {
        version,
        name: name.to_string(),
        up_path,
        down_path,
    })
}

/// Scans `dir` for migration pairs, sorted ascending by version.
///
/// Files that do not match the `<version>_<name>.up.sql` /
/// `<version>_<name>.down.sql` pattern are ignored.
///
/// # Errors
///
/// Returns [`MigrateError::OrphanedFile`] if an up file has no matching
/// down file or vice versa, or [`MigrateError::Io`] if the directory
/// cannot be read. A missing directory yields an empty list.
pub fn list_pairs(dir: impl AsRef<Path>) -> Result<Vec<MigrationPair>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    // version -> (name, up path, down path)
    let mut halves: BTreeMap<i64, (String, Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
            continue;
        };
        let Some(caps) = FILE_RE.captures(file_name) else {
            continue;
        };
        let Ok(version) = caps[1].parse::<i64>() else {
            continue;
        };
        let name = caps[2].to_string();
        let slot = halves.entry(version).or_insert_with(|| (name, None, None));
        match &caps[3] {
            "up" => slot.1 = Some(path),
            _ => slot.2 = Some(path),
        }
    }

    let mut pairs = Vec::with_capacity(halves.len());
    for (version, (name, up, down)) in halves {
        match (up, down) {
            (Some(up_path), Some(down_path)) => pairs.push(MigrationPair {
                version,
                name,
                up_path,
                down_path,
            }),
            (Some(_), None) => {
                return Err(MigrateError::OrphanedFile {
                    version,
                    missing: "down",
                });
            }
            (None, _) => {
                return Err(MigrateError::OrphanedFile {
                    version,
                    missing: "up",
                });
            }
        }
    }
    Ok(pairs)
}
