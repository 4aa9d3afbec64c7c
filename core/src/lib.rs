//! Core option model for sqlc project scaffolding.
//!
//! This crate defines the strongly-typed domain model for code-generation
//! options and query-safety policies:
//!
//! - The enum vocabulary ([`NullHandlingMode`], [`EnumGenerationMode`],
//!   [`StructPointerMode`], [`JsonTagStyle`], the safety policy enums,
//!   [`DatabaseEngine`], and [`ProjectArchetype`]).
//! - [`LegacyOptions`] / [`LegacySafetyRules`] — the external tool's
//!   flat-boolean wire shapes.
//! - [`TypeSafeOptions`] / [`TypeSafeSafetyRules`] — the semantic shapes
//!   used internally.
//! - Converters between the two shapes ([`TypeSafeOptions::from_legacy`]
//!   and friends), with the lossy mappings documented on the converters.
//! - The rule transformer ([`transform_rules`]) lowering safety policies
//!   into the tool's rule-expression list.
//! - Structural validators ([`validate_legacy_options`],
//!   [`validate_safety_rules`], [`validate_custom_rules`]).
//!
//! Everything here is a value: records are created by constructors or
//! parsers, freely copied, and never shared mutably. All functions are
//! pure; I/O lives in the sibling crates.
//!
//! # Example
//!
//! ```
//! use sqlc_scaffold_core::*;
//!
//! // Semantic options for a production project.
//! let opts = TypeSafeOptions::production();
//! let safety = TypeSafeSafetyRules::production();
//!
//! // Lower the safety policy into rule triples for the config document.
//! let rules = transform_rules(Some(&safety));
//! assert_eq!(rules[0].name, "no-select-star");
//!
//! // Project onto the wire shape at the serialization boundary.
//! let legacy = opts.to_legacy();
//! assert!(validate_legacy_options(&legacy).is_ok());
//! ```

mod convert;
mod enums;
mod options;
mod safety;
mod transform;
mod validate;

pub use enums::{
    ColumnExplicitness, DatabaseEngine, DestructiveOperationPolicy, EnumGenerationMode,
    JsonTagStyle, LimitClauseRequirement, NullHandlingMode, ProjectArchetype, SelectStarPolicy,
    StructPointerMode, WhereClauseRequirement,
};
pub use options::{GO_SOURCE_EXTENSION, GenerationFeatures, LegacyOptions, TypeSafeOptions};
pub use safety::{CustomRule, LegacySafetyRules, SafetyChecks, StyleRules, TypeSafeSafetyRules};
pub use transform::transform_rules;
pub use validate::{
    MAX_COLUMNS, MAX_TABLES, OptionsError, parse_archetype_value, parse_destructive_policy,
    parse_engine_value, validate_column_names, validate_custom_rules, validate_legacy_options,
    validate_legacy_options_for_extension, validate_safety_rules, validate_table_names,
};
