//! Structural validation of option and safety records.
//!
//! Pure functions returning the first error found. Aggregating validation
//! (collect-everything semantics) lives at the config-document level in the
//! config crate; these checks are its building blocks.
//!
//! # Examples
//!
//! ```
//! use sqlc_scaffold_core::*;
//!
//! let legacy = LegacyOptions::default();
//! assert!(validate_legacy_options(&legacy).is_ok());
//!
//! let bad = LegacyOptions {
//!     json_tags_case_style: "upper".to_string(),
//!     ..LegacyOptions::default()
//! };
//! assert!(matches!(
//!     validate_legacy_options(&bad),
//!     Err(OptionsError::InvalidCaseStyle(_))
//! ));
//! ```

use thiserror::Error;

use crate::{
    CustomRule, DatabaseEngine, DestructiveOperationPolicy, LegacyOptions, ProjectArchetype,
    TypeSafeSafetyRules, options::GO_SOURCE_EXTENSION,
};

/// Largest number of tables an example schema may declare.
pub const MAX_TABLES: usize = 1000;

/// Largest number of columns a single table may declare.
pub const MAX_COLUMNS: usize = 500;

/// Structural validation errors for option and safety records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// An enum-valued field holds a value outside its closed set.
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidEnum { field: String, value: String },

    /// The JSON tag case style string is unrecognized.
    #[error("invalid json_tags_case_style '{0}': expected camel, snake, pascal, kebab, or none")]
    InvalidCaseStyle(String),

    /// A file name is empty when required or lacks the expected extension.
    #[error("invalid file name '{value}' for field '{field}'")]
    InvalidFileName { field: String, value: String },

    /// The destructive-operation policy string is unrecognized.
    #[error("invalid destructive operation policy '{0}'")]
    InvalidPolicy(String),

    /// A custom rule has an empty name or empty rule expression.
    #[error("invalid custom rule at index {index}: {reason}")]
    InvalidCustomRule { index: usize, reason: String },

    /// A schema-level invariant does not hold.
    #[error("schema invariant violated ({code}): {detail}")]
    SchemaInvariantViolated { code: String, detail: String },
}

/// Validates the legacy wire record against the Go output target.
///
/// Equivalent to
/// [`validate_legacy_options_for_extension`] with `".go"`.
pub fn validate_legacy_options(options: &LegacyOptions) -> Result<(), OptionsError> {
    validate_legacy_options_for_extension(options, GO_SOURCE_EXTENSION)
}

/// Validates the legacy wire record for a given output-language extension.
///
/// Checks:
/// - `json_tags_case_style` is one of `camel|snake|pascal|kebab|none`.
/// - `output_db_file_name`, `output_models_file_name`, and
///   `output_querier_file_name` are non-empty and end with `extension`.
/// - The optional copyfrom/batch file names, when non-empty, end with
///   `extension`.
///
/// # Errors
///
/// Returns the first [`OptionsError::InvalidCaseStyle`] or
/// [`OptionsError::InvalidFileName`] found.
pub fn validate_legacy_options_for_extension(
    options: &LegacyOptions,
    extension: &str,
) -> Result<(), OptionsError> {
    if !LegacyOptions::is_valid_case_style(&options.json_tags_case_style) {
        return Err(OptionsError::InvalidCaseStyle(
            options.json_tags_case_style.clone(),
        ));
    }

    let required = [
        ("output_db_file_name", &options.output_db_file_name),
        ("output_models_file_name", &options.output_models_file_name),
        ("output_querier_file_name", &options.output_querier_file_name),
    ];
    for (field, value) in required {
        if value.is_empty() || !value.ends_with(extension) {
            return Err(OptionsError::InvalidFileName {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    let optional = [
        ("output_copyfrom_file_name", &options.output_copyfrom_file_name),
        ("output_batch_file_name", &options.output_batch_file_name),
    ];
    for (field, value) in optional {
        if !value.is_empty() && !value.ends_with(extension) {
            return Err(OptionsError::InvalidFileName {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a list of custom rules.
///
/// # Errors
///
/// Returns [`OptionsError::InvalidCustomRule`] for the first rule with an
/// empty name or empty rule expression. Messages may be empty.
pub fn validate_custom_rules(rules: &[CustomRule]) -> Result<(), OptionsError> {
    for (index, rule) in rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            return Err(OptionsError::InvalidCustomRule {
                index,
                reason: "empty rule name".to_string(),
            });
        }
        if rule.rule.trim().is_empty() {
            return Err(OptionsError::InvalidCustomRule {
                index,
                reason: "empty rule expression".to_string(),
            });
        }
    }
    Ok(())
}

/// Validates the semantic safety record.
///
/// The policy enums are closed sets at the type level, so the only runtime
/// check is the custom-rule list.
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_core::*;
///
/// let mut rules = TypeSafeSafetyRules::production();
/// rules.custom_rules.push(CustomRule::new("x", "", "m"));
/// let err = validate_safety_rules(&rules).unwrap_err();
/// assert_eq!(
///     err,
///     OptionsError::InvalidCustomRule { index: 0, reason: "empty rule expression".into() }
/// );
/// ```
pub fn validate_safety_rules(rules: &TypeSafeSafetyRules) -> Result<(), OptionsError> {
    validate_custom_rules(&rules.custom_rules)
}

/// Parses a database-engine wire string, naming the offending field.
///
/// The enum's own [`parse`](DatabaseEngine::parse) returns `Option`; this
/// is the checked boundary for raw string inputs such as CLI flags.
pub fn parse_engine_value(field: &str, value: &str) -> Result<DatabaseEngine, OptionsError> {
    DatabaseEngine::parse(value).ok_or_else(|| OptionsError::InvalidEnum {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parses a project-archetype wire string, naming the offending field.
pub fn parse_archetype_value(field: &str, value: &str) -> Result<ProjectArchetype, OptionsError> {
    ProjectArchetype::parse(value).ok_or_else(|| OptionsError::InvalidEnum {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parses a destructive-operation policy wire string.
pub fn parse_destructive_policy(value: &str) -> Result<DestructiveOperationPolicy, OptionsError> {
    DestructiveOperationPolicy::parse(value)
        .ok_or_else(|| OptionsError::InvalidPolicy(value.to_string()))
}

/// Validates example-schema table names against the schema invariants:
/// non-empty names and at most [`MAX_TABLES`] tables.
pub fn validate_table_names<S: AsRef<str>>(tables: &[S]) -> Result<(), OptionsError> {
    if tables.len() > MAX_TABLES {
        return Err(OptionsError::SchemaInvariantViolated {
            code: "table_limit".to_string(),
            detail: format!("{} tables exceeds the limit of {MAX_TABLES}", tables.len()),
        });
    }
    for table in tables {
        if table.as_ref().trim().is_empty() {
            return Err(OptionsError::SchemaInvariantViolated {
                code: "empty_table_name".to_string(),
                detail: "table names must be non-empty".to_string(),
            });
        }
    }
    Ok(())
}

/// Validates the column names of one table: non-empty names and at most
/// [`MAX_COLUMNS`] columns.
pub fn validate_column_names<S: AsRef<str>>(
    table: &str,
    columns: &[S],
) -> Result<(), OptionsError> {
    if columns.len() > MAX_COLUMNS {
        return Err(OptionsError::SchemaInvariantViolated {
            code: "column_limit".to_string(),
            detail: format!(
                "table '{table}' has {} columns, more than the limit of {MAX_COLUMNS}",
                columns.len()
            ),
        });
    }
    for column in columns {
        if column.as_ref().trim().is_empty() {
            return Err(OptionsError::SchemaInvariantViolated {
                code: "empty_column_name".to_string(),
                detail: format!("table '{table}' has a column with an empty name"),
            });
        }
    }
    Ok(())
}
