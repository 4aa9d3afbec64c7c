//! On-disk YAML model of the external tool's config document.
//!
//! The document round-trips through [`ConfigDocument::load`] and
//! [`ConfigDocument::save`]: `schema`/`queries` keep whichever single-path
//! or path-list shape the input used, and unknown fields inside a `sql`
//! block are preserved verbatim on re-emission.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "2"
//! sql:
//!   - engine: postgresql
//!     schema: "db/schema.sql"
//!     queries: ["db/queries.sql", "db/reports.sql"]
//!     database:
//!       uri: "postgresql://localhost:5432/app"
//!     gen:
//!       go:
//!         out: "internal/db"
//!         package: "db"
//!         emit_json_tags: true
//!     rules:
//!       - name: no-select-star
//!         rule: "!query.contains('SELECT *')"
//!         message: "SELECT * is not allowed"
//! ```

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sqlc_scaffold_core::{
    CustomRule, DatabaseEngine, LegacyOptions, TypeSafeOptions, TypeSafeSafetyRules,
    transform_rules,
};

use crate::error::Result;

/// Config document version emitted by default. Older documents may carry
/// other versions; see [`crate::migrate_document`].
pub const DEFAULT_CONFIG_VERSION: &str = "2";

/// Conventional config file name.
pub const DEFAULT_CONFIG_FILE: &str = "sqlc.yaml";

fn is_false(v: &bool) -> bool {
    !*v
}

/// Either a single path or an ordered sequence of paths.
///
/// The parser accepts both YAML shapes and the serializer re-emits the
/// shape that was parsed.
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_config::PathOrPaths;
///
/// let one = PathOrPaths::from("db/schema.sql");
/// assert_eq!(one.iter().collect::<Vec<_>>(), ["db/schema.sql"]);
///
/// let many: PathOrPaths = vec!["a.sql".to_string(), "b.sql".to_string()].into();
/// assert_eq!(many.iter().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathOrPaths {
    /// A single path.
    One(String),
    /// An ordered sequence of paths.
    Many(Vec<String>),
}

impl PathOrPaths {
    /// Iterates the contained paths in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            Self::One(path) => std::slice::from_ref(path).iter(),
            Self::Many(paths) => paths.iter(),
        }
        .map(String::as_str)
    }

    /// Whether no usable path is present (empty string or empty list).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(path) => path.is_empty(),
            Self::Many(paths) => paths.is_empty() || paths.iter().all(String::is_empty),
        }
    }
}

impl From<&str> for PathOrPaths {
    fn from(path: &str) -> Self {
        Self::One(path.to_string())
    }
}

impl From<String> for PathOrPaths {
    fn from(path: String) -> Self {
        Self::One(path)
    }
}

impl From<Vec<String>> for PathOrPaths {
    fn from(paths: Vec<String>) -> Self {
        Self::Many(paths)
    }
}

/// A database-type to generated-type override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOverride {
    /// Fully qualified generated type (e.g., `github.com/shopspring/decimal.Decimal`).
    pub go_type: String,
    /// Database type name this override applies to.
    pub db_type: String,
}

/// Connection info for engines the tool can introspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConnection {
    /// Opaque connection URI.
    pub uri: String,
}

/// One language target inside a `gen` block.
///
/// The generation options are the flat legacy wire shape, flattened so the
/// emitted YAML keys match the external tool exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Output directory for generated code.
    pub out: String,
    /// Package/module name for generated code.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,
    /// Flat generation options in the tool's wire format.
    #[serde(flatten)]
    pub options: LegacyOptions,
    /// Type overrides, in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<TypeOverride>,
}

impl GenConfig {
    /// Creates a target with default wire options.
    pub fn new(out: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            out: out.into(),
            package: package.into(),
            options: LegacyOptions::default(),
            overrides: Vec::new(),
        }
    }
}

/// One `sql` block: an engine, schema/query paths, generation targets, and
/// the rule list.
///
/// `engine` is kept as a raw string so that documents with unknown engines
/// still parse; membership is checked during validation (and available via
/// [`SqlBlock::parsed_engine`]). Unknown fields land in `extra` and are
/// re-emitted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlBlock {
    /// Database engine: `postgresql`, `mysql`, or `sqlite`.
    pub engine: String,
    /// Schema file path(s).
    pub schema: PathOrPaths,
    /// Query file path(s).
    pub queries: PathOrPaths,
    /// Optional block name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional connection info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConnection>,
    /// Reject queries calling functions the tool cannot check.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strict_function_checks: bool,
    /// Reject ORDER BY on columns absent from the select list.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strict_order_by: bool,
    /// Language targets, keyed by language name (`gen` in the wire
    /// format; renamed because `gen` is a reserved word in Rust 2024).
    #[serde(rename = "gen")]
    pub targets: BTreeMap<String, GenConfig>,
    /// Safety and custom rules, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<CustomRule>,
    /// Unknown fields, preserved verbatim on re-emission.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl SqlBlock {
    /// Parses the engine string against the supported set.
    pub fn parsed_engine(&self) -> Option<DatabaseEngine> {
        DatabaseEngine::parse(&self.engine)
    }
}

/// The top-level config document: a version string and one or more `sql`
/// blocks, in input order.
///
/// # Examples
///
/// ```
/// use sqlc_scaffold_config::ConfigDocument;
/// use sqlc_scaffold_core::*;
///
/// let doc = ConfigDocument::single_target(
///     DatabaseEngine::PostgreSql,
///     "db/schema.sql",
///     "db/queries.sql",
///     "internal/db",
///     "db",
///     &TypeSafeOptions::production(),
///     Some(&TypeSafeSafetyRules::production()),
/// );
/// assert_eq!(doc.version, "2");
/// assert_eq!(doc.sql[0].rules[0].name, "no-select-star");
///
/// let yaml = doc.to_yaml().unwrap();
/// let reparsed = ConfigDocument::from_yaml(&yaml).unwrap();
/// assert_eq!(reparsed, doc);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Document format version (`"2"` by default).
    pub version: String,
    /// SQL blocks, in input order.
    pub sql: Vec<SqlBlock>,
}

impl ConfigDocument {
    /// Creates an empty document at the default version.
    pub fn new() -> Self {
        Self {
            version: DEFAULT_CONFIG_VERSION.to_string(),
            sql: Vec::new(),
        }
    }

    /// Builds a single-block document for one Go target from semantic
    /// options.
    ///
    /// The options are projected onto the legacy wire shape and the safety
    /// policy (when given) is lowered into the block's rule list, generated
    /// rules first, the policy's custom rules after them.
    #[allow(clippy::too_many_arguments)]
    pub fn single_target(
        engine: DatabaseEngine,
        schema: impl Into<PathOrPaths>,
        queries: impl Into<PathOrPaths>,
        out: impl Into<String>,
        package: impl Into<String>,
        options: &TypeSafeOptions,
        safety: Option<&TypeSafeSafetyRules>,
    ) -> Self {
        let target = GenConfig {
            options: options.to_legacy(),
            ..GenConfig::new(out, package)
        };
        let mut targets = BTreeMap::new();
        targets.insert("go".to_string(), target);

        Self {
            version: DEFAULT_CONFIG_VERSION.to_string(),
            sql: vec![SqlBlock {
                engine: engine.as_str().to_string(),
                schema: schema.into(),
                queries: queries.into(),
                name: None,
                database: None,
                strict_function_checks: false,
                strict_order_by: false,
                targets,
                rules: transform_rules(safety),
                extra: BTreeMap::new(),
            }],
        }
    }

    /// Parses a document from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serializes the document to YAML text.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Loads a document from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConfigError::Io) if the file cannot be read,
    /// or [`Yaml`](crate::ConfigError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Saves the document as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConfigError::Io) if the file cannot be
    /// written, or [`Yaml`](crate::ConfigError::Yaml) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}
