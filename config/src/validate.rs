//! Aggregating validation for config documents.
//!
//! Unlike the first-error validators in the core crate, document validation
//! collects every problem it finds into a [`ValidationResult`] so the user
//! can fix a config in one pass. A document is valid iff the error list is
//! empty; warnings never fail validation on their own (the CLI's `--strict`
//! flag promotes them).
//!
//! # Examples
//!
//! ```
//! use sqlc_scaffold_config::{ConfigDocument, validate_document};
//!
//! let doc = ConfigDocument::from_yaml(r#"
//! version: "2"
//! sql:
//!   - engine: oracle
//!     schema: "schema.sql"
//!     queries: "queries.sql"
//!     gen:
//!       go:
//!         out: "db"
//! "#).unwrap();
//!
//! let result = validate_document(&doc);
//! assert!(!result.is_valid());
//! assert_eq!(result.errors[0].field, "sql[0].engine");
//! ```

use serde::{Deserialize, Serialize};
use sqlc_scaffold_core::{
    GO_SOURCE_EXTENSION, validate_custom_rules, validate_legacy_options_for_extension,
};

use crate::document::{ConfigDocument, SqlBlock};

/// A single validation finding, addressed by a path-style field name such
/// as `sql[0].gen.go.out`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path of the offending field.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a finding.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collected validation findings.
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_config::ValidationResult;
///
/// let mut result = ValidationResult::default();
/// assert!(result.is_valid());
/// result.error("version", "version must not be empty");
/// assert!(!result.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationResult {
    /// Findings that make the document invalid.
    pub errors: Vec<FieldError>,
    /// Advisory findings.
    pub warnings: Vec<FieldError>,
}

impl ValidationResult {
    /// Valid iff no errors were collected.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error finding.
    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Records a warning finding.
    pub fn warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(FieldError::new(field, message));
    }

    /// Moves all warnings into the error list (`--strict` semantics).
    pub fn promote_warnings(&mut self) {
        self.errors.append(&mut self.warnings);
    }
}

/// Source-file extension expected for a generation target language.
///
/// Unknown languages fall back to the Go extension; their file names are
/// rarely customized and a wrong extension surfaces as a warning upstream.
fn extension_for_language(language: &str) -> &'static str {
    match language {
        "go" => GO_SOURCE_EXTENSION,
        "kotlin" => ".kt",
        "python" => ".py",
        "typescript" => ".ts",
        _ => GO_SOURCE_EXTENSION,
    }
}

/// Validates a whole document, collecting every finding.
///
/// Document-level invariants are checked first (non-empty version, at
/// least one `sql` block), then each block in order.
pub fn validate_document(doc: &ConfigDocument) -> ValidationResult {
    let mut result = ValidationResult::default();

    if doc.version.trim().is_empty() {
        result.error("version", "version must not be empty");
    }
    if doc.sql.is_empty() {
        result.error("sql", "at least one sql block is required");
    }

    for (index, block) in doc.sql.iter().enumerate() {
        validate_block(block, &format!("sql[{index}]"), &mut result);
    }

    result
}

fn validate_block(block: &SqlBlock, path: &str, result: &mut ValidationResult) {
    if block.parsed_engine().is_none() {
        result.error(
            format!("{path}.engine"),
            format!(
                "unknown engine '{}': expected postgresql, mysql, or sqlite",
                block.engine
            ),
        );
    }

    if block.schema.is_empty() {
        result.error(format!("{path}.schema"), "schema path must not be empty");
    }
    if block.queries.is_empty() {
        result.error(format!("{path}.queries"), "queries path must not be empty");
    }

    if block.targets.is_empty() {
        result.warning(
            format!("{path}.gen"),
            "no generation targets: the codegen tool will produce nothing",
        );
    }
    for (language, target) in &block.targets {
        let gen_path = format!("{path}.gen.{language}");
        if target.out.is_empty() {
            result.error(format!("{gen_path}.out"), "output directory must not be empty");
        }
        if let Err(err) =
            validate_legacy_options_for_extension(&target.options, extension_for_language(language))
        {
            result.error(gen_path, err.to_string());
        }
    }

    if let Some(database) = &block.database {
        if database.uri.is_empty() {
            result.warning(
                format!("{path}.database.uri"),
                "empty database uri: connection-dependent checks will be skipped",
            );
        }
    }

    if let Err(err) = validate_custom_rules(&block.rules) {
        result.error(format!("{path}.rules"), err.to_string());
    }

    if !block.extra.is_empty() {
        let keys: Vec<&str> = block.extra.keys().map(String::as_str).collect();
        result.warning(
            path.to_string(),
            format!("unrecognized fields preserved verbatim: {}", keys.join(", ")),
        );
    }
}
