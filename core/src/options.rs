//! Code-generation option records.
//!
//! Two shapes exist for the same information:
//!
//! - [`LegacyOptions`] — the flat-boolean wire format the external codegen
//!   tool consumes. Serde field names match the tool's YAML keys exactly.
//! - [`TypeSafeOptions`] — the semantic shape used everywhere else: four
//!   policy enums plus a small set of independent feature flags.
//!
//! New code constructs [`TypeSafeOptions`]; the legacy record only appears
//! at the serialization boundary (see [`TypeSafeOptions::to_legacy`]).
//!
//! # Examples
//!
//! ```
//! use sqlc_scaffold_core::{TypeSafeOptions, NullHandlingMode, EnumGenerationMode};
//!
//! let opts = TypeSafeOptions::production();
//! assert_eq!(opts.null_handling, NullHandlingMode::Pointers);
//! assert_eq!(opts.enum_mode, EnumGenerationMode::Complete);
//! assert!(opts.features.generate_json_tags);
//! ```

use serde::{Deserialize, Serialize};

use crate::{EnumGenerationMode, JsonTagStyle, NullHandlingMode, StructPointerMode};

/// Source-file extension for generated Go code, the tool's primary target.
pub const GO_SOURCE_EXTENSION: &str = ".go";

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_empty(v: &str) -> bool {
    v.is_empty()
}

/// Flat-boolean option record in the external tool's wire format.
///
/// This is what older on-disk configs contain and what the `gen` block of
/// the emitted config document embeds. Field names serialize to the exact
/// YAML keys the tool expects (`emit_json_tags`, `json_tags_case_style`, …).
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_core::LegacyOptions;
///
/// let legacy = LegacyOptions::default();
/// assert!(legacy.emit_json_tags);
/// assert_eq!(legacy.json_tags_case_style, "camel");
/// assert_eq!(legacy.output_db_file_name, "db.go");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyOptions {
    /// Emit JSON struct tags on generated models.
    #[serde(default)]
    pub emit_json_tags: bool,
    /// Emit prepared-statement variants of queries.
    #[serde(default)]
    pub emit_prepared_queries: bool,
    /// Emit a Querier interface over the generated methods.
    #[serde(default)]
    pub emit_interface: bool,
    /// Emit empty slices instead of nil for empty result sets.
    #[serde(default)]
    pub emit_empty_slices: bool,
    /// Emit result structs behind pointers.
    #[serde(default)]
    pub emit_result_struct_pointers: bool,
    /// Emit parameter structs behind pointers.
    #[serde(default)]
    pub emit_params_struct_pointers: bool,
    /// Emit a `Valid()` method on generated enum types.
    #[serde(default)]
    pub emit_enum_valid_method: bool,
    /// Emit an all-values constant for generated enum types.
    #[serde(default)]
    pub emit_all_enum_values: bool,
    /// Emit `db:` struct tags on generated models.
    #[serde(default)]
    pub emit_db_tags: bool,
    /// Case style for JSON tags: `camel|snake|pascal|kebab|none`.
    #[serde(default = "LegacyOptions::default_case_style")]
    pub json_tags_case_style: String,
    /// File name for generated connection plumbing. Required.
    #[serde(default = "LegacyOptions::default_db_file_name")]
    pub output_db_file_name: String,
    /// File name for generated models. Required.
    #[serde(default = "LegacyOptions::default_models_file_name")]
    pub output_models_file_name: String,
    /// File name for the generated querier. Required.
    #[serde(default = "LegacyOptions::default_querier_file_name")]
    pub output_querier_file_name: String,
    /// File name for generated COPY FROM support. Empty disables it.
    #[serde(default, skip_serializing_if = "is_empty")]
    pub output_copyfrom_file_name: String,
    /// File name for generated batch support. Empty disables it.
    #[serde(default, skip_serializing_if = "is_empty")]
    pub output_batch_file_name: String,
    /// Skip structs not referenced by any query.
    #[serde(default, skip_serializing_if = "is_false")]
    pub omit_unused_structs: bool,
    /// Export query constant strings.
    #[serde(default, skip_serializing_if = "is_false")]
    pub emit_exported_queries: bool,
    /// Emit pointers rather than sql.Null* wrappers for nullable columns.
    #[serde(default, skip_serializing_if = "is_false")]
    pub emit_pointers_for_null_types: bool,
}

impl LegacyOptions {
    fn default_case_style() -> String {
        "camel".to_string()
    }

    fn default_db_file_name() -> String {
        "db.go".to_string()
    }

    fn default_models_file_name() -> String {
        "models.go".to_string()
    }

    fn default_querier_file_name() -> String {
        "querier.go".to_string()
    }

    /// Case styles the wire format accepts. The legacy `none` value has no
    /// type-safe counterpart and falls back to `camel` on conversion.
    pub const CASE_STYLES: [&'static str; 5] = ["camel", "snake", "pascal", "kebab", "none"];

    /// Whether `style` is an accepted wire case style.
    pub fn is_valid_case_style(style: &str) -> bool {
        Self::CASE_STYLES.contains(&style)
    }
}

impl Default for LegacyOptions {
    fn default() -> Self {
        Self {
            emit_json_tags: true,
            emit_prepared_queries: true,
            emit_interface: true,
            emit_empty_slices: false,
            emit_result_struct_pointers: false,
            emit_params_struct_pointers: false,
            emit_enum_valid_method: true,
            emit_all_enum_values: true,
            emit_db_tags: false,
            json_tags_case_style: Self::default_case_style(),
            output_db_file_name: Self::default_db_file_name(),
            output_models_file_name: Self::default_models_file_name(),
            output_querier_file_name: Self::default_querier_file_name(),
            output_copyfrom_file_name: String::new(),
            output_batch_file_name: String::new(),
            omit_unused_structs: false,
            emit_exported_queries: false,
            emit_pointers_for_null_types: false,
        }
    }
}

/// Independent feature flags with no policy interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFeatures {
    /// Emit JSON struct tags on generated models.
    pub generate_json_tags: bool,
    /// Emit prepared-statement variants of queries.
    pub generate_prepared_queries: bool,
    /// Emit a Querier interface over the generated methods.
    pub generate_interface: bool,
    /// Keep table names exactly as written instead of singularizing.
    pub use_exact_table_names: bool,
}

impl Default for GenerationFeatures {
    fn default() -> Self {
        Self {
            generate_json_tags: true,
            generate_prepared_queries: true,
            generate_interface: true,
            use_exact_table_names: false,
        }
    }
}

/// Semantic option record: four policy enums plus independent features.
///
/// All fields are plain values; the record is freely copied and never
/// shared mutably. Conversions to and from [`LegacyOptions`] live on this
/// type ([`Self::from_legacy`], [`Self::to_legacy`]).
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_core::*;
///
/// let opts = TypeSafeOptions {
///     null_handling: NullHandlingMode::EmptySlices,
///     ..TypeSafeOptions::production()
/// };
/// let legacy = opts.to_legacy();
/// assert!(legacy.emit_empty_slices);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TypeSafeOptions {
    /// Strategy for nullable columns.
    pub null_handling: NullHandlingMode,
    /// How much enum support code is generated.
    pub enum_mode: EnumGenerationMode,
    /// Which generated structs are emitted behind pointers.
    pub struct_pointers: StructPointerMode,
    /// Case style for JSON tags.
    pub tag_style: JsonTagStyle,
    /// Independent feature flags.
    pub features: GenerationFeatures,
}

impl TypeSafeOptions {
    /// Production defaults: pointer null handling, complete enum support,
    /// value structs, camel tags, JSON tags/prepared queries/interface on.
    pub fn production() -> Self {
        Self {
            null_handling: NullHandlingMode::Pointers,
            enum_mode: EnumGenerationMode::Complete,
            struct_pointers: StructPointerMode::Never,
            tag_style: JsonTagStyle::Camel,
            features: GenerationFeatures::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_defaults() {
        let opts = TypeSafeOptions::production();
        assert_eq!(opts.null_handling, NullHandlingMode::Pointers);
        assert_eq!(opts.enum_mode, EnumGenerationMode::Complete);
        assert_eq!(opts.struct_pointers, StructPointerMode::Never);
        assert_eq!(opts.tag_style, JsonTagStyle::Camel);
        assert!(opts.features.generate_json_tags);
        assert!(opts.features.generate_prepared_queries);
        assert!(opts.features.generate_interface);
        assert!(!opts.features.use_exact_table_names);
    }

    #[test]
    fn test_legacy_serde_field_names_match_wire_format() {
        let legacy = LegacyOptions::default();
        let json = serde_json::to_value(&legacy).unwrap();
        assert_eq!(json["emit_json_tags"], true);
        assert_eq!(json["json_tags_case_style"], "camel");
        assert_eq!(json["output_db_file_name"], "db.go");
        // Empty optional file names are omitted from the wire form.
        assert!(json.get("output_copyfrom_file_name").is_none());
    }

    #[test]
    fn test_legacy_deserializes_sparse_documents() {
        let legacy: LegacyOptions =
            serde_json::from_str(r#"{"emit_json_tags": true, "emit_db_tags": true}"#).unwrap();
        assert!(legacy.emit_json_tags);
        assert!(legacy.emit_db_tags);
        assert!(!legacy.emit_interface);
        assert_eq!(legacy.output_models_file_name, "models.go");
    }

    #[test]
    fn test_case_style_membership() {
        assert!(LegacyOptions::is_valid_case_style("camel"));
        assert!(LegacyOptions::is_valid_case_style("none"));
        assert!(!LegacyOptions::is_valid_case_style("Camel"));
        assert!(!LegacyOptions::is_valid_case_style("upper"));
    }
}
