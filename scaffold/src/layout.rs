//! Archetype directory layouts.
//!
//! Every archetype has an explicit directory table; none fall back to
//! another archetype's layout. All layouts share the `db/migrations` and
//! `db/queries` pair that the generated configuration points at, plus
//! `internal/db` for generated code.

use std::fs;
use std::path::{Path, PathBuf};

use sqlc_scaffold_core::ProjectArchetype;
use tracing::debug;

use crate::error::Result;

/// Directory list scaffolded for `archetype`, relative to the project
/// root.
pub fn directories(archetype: ProjectArchetype) -> &'static [&'static str] {
    match archetype {
        ProjectArchetype::Microservice => &[
            "cmd/server",
            "internal/api",
            "internal/service",
            "internal/db",
            "db/migrations",
            "db/queries",
            "deploy",
        ],
        ProjectArchetype::Hobby => &["cmd", "internal/db", "db/migrations", "db/queries"],
        ProjectArchetype::Enterprise => &[
            "cmd/server",
            "internal/api",
            "internal/domain",
            "internal/service",
            "internal/repository",
            "internal/db",
            "db/migrations",
            "db/queries",
            "deploy",
            "docs",
        ],
        ProjectArchetype::ApiFirst => &[
            "api",
            "cmd/server",
            "internal/api",
            "internal/db",
            "db/migrations",
            "db/queries",
        ],
        ProjectArchetype::Library => &["pkg", "internal/db", "db/migrations", "db/queries"],
        ProjectArchetype::Analytics => &[
            "cmd/etl",
            "internal/reports",
            "internal/db",
            "db/migrations",
            "db/queries",
        ],
        ProjectArchetype::Fullstack => &[
            "cmd/server",
            "internal/api",
            "internal/db",
            "web/src",
            "db/migrations",
            "db/queries",
        ],
        ProjectArchetype::Cli => &["cmd", "internal/db", "db/migrations", "db/queries"],
        ProjectArchetype::Plugin => &["plugin", "internal/db", "db/migrations", "db/queries"],
    }
}

/// Creates the archetype's directory skeleton under `root`.
///
/// Returns the absolute paths created. Existing directories are left in
/// place.
pub fn create_layout(root: impl AsRef<Path>, archetype: ProjectArchetype) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut created = Vec::new();
    for dir in directories(archetype) {
        let path = root.join(dir);
        fs::create_dir_all(&path)?;
        debug!(archetype = %archetype, dir = %path.display(), "created directory");
        created.push(path);
    }
    Ok(created)
}
