//! Migration of existing config documents between schema versions and
//! database engines.
//!
//! Two operations exist:
//!
//! - [`migrate_document`] — converts a legacy v1 document (a `packages`
//!   list with flat per-package options) into the v2 `sql`-block shape.
//! - [`switch_engine`] — retargets every block of a v2 document at a
//!   different engine. The SQL files themselves are not rewritten; the
//!   returned warnings say so explicitly.
//!
//! Both are pure text-in/value-out transformations; writing the result
//! back to disk (or printing it for a dry run) is the caller's job.

use serde::Deserialize;
use serde_yaml::Value;
use sqlc_scaffold_core::{DatabaseEngine, LegacyOptions};

use crate::document::{ConfigDocument, GenConfig, PathOrPaths, SqlBlock};
use crate::error::{ConfigError, Result};

/// A migrated document plus human-readable notes about what the migration
/// could not carry over.
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    /// The resulting v2 document.
    pub document: ConfigDocument,
    /// Notes for the user, one line each.
    pub warnings: Vec<String>,
}

/// One package entry in the legacy v1 document shape.
#[derive(Debug, Deserialize)]
struct V1Package {
    #[serde(default)]
    name: Option<String>,
    path: String,
    queries: PathOrPaths,
    schema: PathOrPaths,
    #[serde(default)]
    engine: Option<String>,
    #[serde(flatten)]
    options: LegacyOptions,
}

#[derive(Debug, Deserialize)]
struct V1Config {
    #[allow(dead_code)]
    version: String,
    packages: Vec<V1Package>,
}

/// Migrates a config document to `target_version`.
///
/// Accepts v1 (`packages` list) and v2 (`sql` list) inputs. A v2 input is
/// passed through with its version relabeled, which covers the tool's
/// forward-compatible point releases; the only structural rewrite is
/// v1 to v2. The target version is not restricted to `"2"`: the external
/// tool accepts other version strings and so does this migration.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedVersion`] when the source document's
/// version is neither `"1"` nor `"2"`, and [`ConfigError::Malformed`] when
/// the version field is missing or the v1 `packages` list is absent.
pub fn migrate_document(yaml: &str, target_version: &str) -> Result<MigrationOutcome> {
    let value: Value = serde_yaml::from_str(yaml)?;
    let version = value
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| ConfigError::Malformed("missing version field".to_string()))?
        .to_string();

    match version.as_str() {
        "1" => migrate_v1(yaml, target_version),
        "2" => {
            let mut document = ConfigDocument::from_yaml(yaml)?;
            let mut warnings = Vec::new();
            if document.version == target_version {
                warnings.push(format!("config is already at version {target_version}"));
            }
            document.version = target_version.to_string();
            Ok(MigrationOutcome { document, warnings })
        }
        other => Err(ConfigError::UnsupportedVersion(other.to_string())),
    }
}

fn migrate_v1(yaml: &str, target_version: &str) -> Result<MigrationOutcome> {
    let v1: V1Config = serde_yaml::from_str(yaml)?;
    if v1.packages.is_empty() {
        return Err(ConfigError::Malformed(
            "v1 config has no packages to migrate".to_string(),
        ));
    }

    let mut warnings = Vec::new();
    let mut sql = Vec::new();

    for (index, package) in v1.packages.into_iter().enumerate() {
        let engine = match package.engine.as_deref() {
            Some(engine) if DatabaseEngine::parse(engine).is_some() => engine.to_string(),
            Some(other) => {
                warnings.push(format!(
                    "packages[{index}]: unknown engine '{other}' kept as-is; \
                     validation will flag it"
                ));
                other.to_string()
            }
            None => {
                warnings.push(format!(
                    "packages[{index}]: no engine specified, defaulting to postgresql"
                ));
                DatabaseEngine::PostgreSql.as_str().to_string()
            }
        };

        let package_name = package.name.unwrap_or_else(|| "db".to_string());
        let gen_config = GenConfig {
            options: package.options,
            ..GenConfig::new(package.path, package_name.clone())
        };
        let mut targets = std::collections::BTreeMap::new();
        targets.insert("go".to_string(), gen_config);

        sql.push(SqlBlock {
            engine,
            schema: package.schema,
            queries: package.queries,
            name: Some(package_name),
            database: None,
            strict_function_checks: false,
            strict_order_by: false,
            targets,
            rules: Vec::new(),
            extra: std::collections::BTreeMap::new(),
        });
    }

    Ok(MigrationOutcome {
        document: ConfigDocument {
            version: target_version.to_string(),
            sql,
        },
        warnings,
    })
}

/// Retargets every block of a document at `engine`.
///
/// Returns one warning per block whose engine actually changed: schema and
/// query files stay written in the old dialect and the connection URI (if
/// any) keeps pointing at the old engine.
pub fn switch_engine(document: &mut ConfigDocument, engine: DatabaseEngine) -> Vec<String> {
    let mut warnings = Vec::new();
    for (index, block) in document.sql.iter_mut().enumerate() {
        if block.engine == engine.as_str() {
            continue;
        }
        let previous = std::mem::replace(&mut block.engine, engine.as_str().to_string());
        warnings.push(format!(
            "sql[{index}]: engine changed from '{previous}' to '{engine}'; \
             SQL files are not rewritten for the new dialect"
        ));
        if block.database.is_some() {
            warnings.push(format!(
                "sql[{index}].database.uri still points at a {previous} instance"
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1_yaml() -> &'static str {
        r#"
version: "1"
packages:
  - name: "authdb"
    path: "internal/authdb"
    queries: "./sql/query/"
    schema: "./sql/schema/"
    engine: "postgresql"
    emit_json_tags: true
    emit_interface: true
    json_tags_case_style: camel
"#
    }

    #[test]
    fn test_v1_packages_become_sql_blocks() {
        let outcome = migrate_document(v1_yaml(), "2").unwrap();
        let doc = &outcome.document;
        assert_eq!(doc.version, "2");
        assert_eq!(doc.sql.len(), 1);

        let block = &doc.sql[0];
        assert_eq!(block.engine, "postgresql");
        assert_eq!(block.name.as_deref(), Some("authdb"));
        assert_eq!(block.schema, PathOrPaths::One("./sql/schema/".into()));

        let go = &block.targets["go"];
        assert_eq!(go.out, "internal/authdb");
        assert_eq!(go.package, "authdb");
        assert!(go.options.emit_json_tags);
        assert!(go.options.emit_interface);
    }

    #[test]
    fn test_v1_without_engine_defaults_with_warning() {
        let yaml = r#"
version: "1"
packages:
  - path: "db"
    queries: "query.sql"
    schema: "schema.sql"
"#;
        let outcome = migrate_document(yaml, "2").unwrap();
        assert_eq!(outcome.document.sql[0].engine, "postgresql");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("defaulting to postgresql"));
    }

    #[test]
    fn test_v2_input_passes_through() {
        let yaml = r#"
version: "2"
sql:
  - engine: sqlite
    schema: "schema.sql"
    queries: "queries.sql"
    gen:
      go:
        out: "db"
"#;
        let outcome = migrate_document(yaml, "2").unwrap();
        assert_eq!(outcome.document.sql[0].engine, "sqlite");
        assert!(outcome.warnings[0].contains("already at version 2"));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let yaml = "version: \"7\"\nsql: []\n";
        assert!(matches!(
            migrate_document(yaml, "2"),
            Err(ConfigError::UnsupportedVersion(v)) if v == "7"
        ));
    }

    #[test]
    fn test_missing_version_rejected() {
        assert!(matches!(
            migrate_document("sql: []\n", "2"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_switch_engine_warns_about_dialect() {
        let mut doc = migrate_document(v1_yaml(), "2").unwrap().document;
        let warnings = switch_engine(&mut doc, DatabaseEngine::MySql);
        assert_eq!(doc.sql[0].engine, "mysql");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not rewritten"));

        // Switching to the same engine is a no-op.
        assert!(switch_engine(&mut doc, DatabaseEngine::MySql).is_empty());
    }
}
