//! Database migration files and a built-in SQLite runner.
//!
//! This crate owns the on-disk shape of migrations (timestamped
//! `.up.sql` / `.down.sql` pairs) and a minimal runner that applies them
//! to SQLite databases with single-row version tracking and dirty-state
//! detection.
//!
//! # Quick start
//!
//! ```no_run
//! use sqlc_scaffold_migrate::{create_pair, list_pairs, Runner};
//!
//! create_pair("db/migrations", "create_users").unwrap();
//!
//! let pairs = list_pairs("db/migrations").unwrap();
//! let mut runner = Runner::open("app.db").unwrap();
//! let applied = runner.up(&pairs).unwrap();
//! println!("applied {applied} migration(s), now {}", runner.status().unwrap());
//! ```
//!
//! PostgreSQL and MySQL migrations are created and listed the same way,
//! but applying them is delegated to external tooling; the runner only
//! manages SQLite.

mod error;
mod files;
mod runner;
mod status;

pub use error::{MigrateError, Result};
pub use files::{MigrationPair, create_pair, is_valid_name, list_pairs};
pub use runner::Runner;
pub use status::MigrationStatus;
