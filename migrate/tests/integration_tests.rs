//! Integration tests exercising the full migration lifecycle: create
//! pairs on disk, apply them to a database, inspect status, roll back.

use sqlc_scaffold_migrate::{
    MigrateError, MigrationPair, MigrationStatus, Runner, create_pair, list_pairs,
};
use tempfile::tempdir;

/// Writes a migration pair with fixed version and SQL bodies, bypassing
/// the wall-clock timestamp so tests get distinct, ordered versions.
fn write_pair(dir: &std::path::Path, version: i64, name: &str, up: &str, down: &str) {
    let header = format!("-- Migration: {name}\n-- Generated at: {version}\n");
    std::fs::write(
        dir.join(format!("{version}_{name}.up.sql")),
        format!("{header}\n{up}\n"),
    )
    .unwrap();
    std::fs::write(
        dir.join(format!("{version}_{name}.down.sql")),
        format!("{header}\n{down}\n"),
    )
    .unwrap();
}

fn table_exists(runner: &Runner, name: &str) -> bool {
    let count: i64 = runner
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [name],
            |row| row.get(0),
        )
        .unwrap();
    count > 0
}

#[test]
fn test_up_applies_pending_in_order() {
    let dir = tempdir().unwrap();
    write_pair(
        dir.path(),
        100,
        "create_users",
        "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL);",
        "DROP TABLE users;",
    );
    write_pair(
        dir.path(),
        200,
        "create_posts",
        "CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER REFERENCES users(id));",
        "DROP TABLE posts;",
    );

    let pairs = list_pairs(dir.path()).unwrap();
    let mut runner = Runner::open_in_memory().unwrap();

    let applied = runner.up(&pairs).unwrap();
    assert_eq!(applied, 2);
    assert_eq!(runner.status().unwrap(), MigrationStatus::At(200));
    assert!(table_exists(&runner, "users"));
    assert!(table_exists(&runner, "posts"));

    // Re-running is a no-op.
    assert_eq!(runner.up(&pairs).unwrap(), 0);
    assert_eq!(runner.status().unwrap(), MigrationStatus::At(200));
}

#[test]
fn test_rollback_steps_down_history() {
    let dir = tempdir().unwrap();
    write_pair(
        dir.path(),
        100,
        "create_users",
        "CREATE TABLE users (id INTEGER PRIMARY KEY);",
        "DROP TABLE users;",
    );
    write_pair(
        dir.path(),
        200,
        "create_posts",
        "CREATE TABLE posts (id INTEGER PRIMARY KEY);",
        "DROP TABLE posts;",
    );

    let pairs = list_pairs(dir.path()).unwrap();
    let mut runner = Runner::open_in_memory().unwrap();
    runner.up(&pairs).unwrap();

    assert_eq!(runner.rollback(&pairs, 1).unwrap(), 1);
    assert_eq!(runner.status().unwrap(), MigrationStatus::At(100));
    assert!(!table_exists(&runner, "posts"));
    assert!(table_exists(&runner, "users"));

    assert_eq!(runner.rollback(&pairs, 5).unwrap(), 1);
    assert_eq!(runner.status().unwrap(), MigrationStatus::NoVersion);
    assert!(!table_exists(&runner, "users"));
}

#[test]
fn test_failed_step_leaves_database_dirty() {
    let dir = tempdir().unwrap();
    write_pair(
        dir.path(),
        100,
        "broken",
        "THIS IS NOT SQL;",
        "SELECT 1;",
    );

    let pairs = list_pairs(dir.path()).unwrap();
    let mut runner = Runner::open_in_memory().unwrap();

    assert!(runner.up(&pairs).is_err());
    assert_eq!(runner.status().unwrap(), MigrationStatus::DirtyAt(100));

    // Further runs refuse to touch the database until repaired.
    let err = runner.up(&pairs).unwrap_err();
    assert!(matches!(err, MigrateError::Dirty(100)));

    runner.force_version(100).unwrap();
    assert_eq!(runner.status().unwrap(), MigrationStatus::At(100));
}

#[test]
fn test_rollback_without_matching_file() {
    let mut runner = Runner::open_in_memory().unwrap();
    runner.force_version(999).unwrap();

    let err = runner.rollback(&[], 1).unwrap_err();
    assert!(matches!(err, MigrateError::UnknownVersion(999)));
}

#[test]
fn test_create_then_apply_roundtrip_on_disk() {
    let dir = tempdir().unwrap();
    let migrations = dir.path().join("db").join("migrations");
    let pair: MigrationPair = create_pair(&migrations, "create_users").unwrap();

    // Replace the placeholder body with real SQL, keeping the header.
    std::fs::write(
        &pair.up_path,
        format!(
            "-- Migration: {0}\n-- Generated at: {1}\nCREATE TABLE users (id INTEGER PRIMARY KEY);\n",
            pair.name, pair.version
        ),
    )
    .unwrap();

    let pairs = list_pairs(&migrations).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0], pair);

    let db_path = dir.path().join("app.db");
    let mut runner = Runner::for_engine("sqlite", &db_path).unwrap();
    assert_eq!(runner.up(&pairs).unwrap(), 1);
    assert_eq!(runner.status().unwrap(), MigrationStatus::At(pair.version));

    // Reopening sees the persisted version.
    let reopened = Runner::open(&db_path).unwrap();
    assert_eq!(reopened.status().unwrap(), MigrationStatus::At(pair.version));
}
