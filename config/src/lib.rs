//! Config document model, validation, and migration for sqlc scaffolding.
//!
//! This crate owns the on-disk YAML representation of the external codegen
//! tool's config:
//!
//! - [`ConfigDocument`] / [`SqlBlock`] / [`GenConfig`] — the document
//!   model, round-tripping through YAML with path shapes and unknown
//!   fields preserved.
//! - [`validate_document`] — aggregating validation returning a
//!   [`ValidationResult`] with path-addressed findings.
//! - [`migrate_document`] / [`switch_engine`] — conversion of legacy v1
//!   documents to the v2 shape and engine retargeting.
//!
//! # Quick start
//!
//! ```no_run
//! use sqlc_scaffold_config::{ConfigDocument, validate_document};
//!
//! let doc = ConfigDocument::load("sqlc.yaml").unwrap();
//! let result = validate_document(&doc);
//! for finding in &result.errors {
//!     eprintln!("{}: {}", finding.field, finding.message);
//! }
//! ```

mod document;
mod error;
mod migrate;
mod validate;

pub use document::{
    ConfigDocument, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_VERSION, DatabaseConnection, GenConfig,
    PathOrPaths, SqlBlock, TypeOverride,
};
pub use error::{ConfigError, Result};
pub use migrate::{MigrationOutcome, migrate_document, switch_engine};
pub use validate::{FieldError, ValidationResult, validate_document};
