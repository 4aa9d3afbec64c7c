//! Wizard answers and the project plan derived from them.
//!
//! Interactive prompting lives in the CLI; this module owns the
//! non-interactive path: a fixed answer set, the archetype-driven choice
//! of options and safety tier, and the writer that turns a plan into
//! files on disk.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use sqlc_scaffold_config::{ConfigDocument, DEFAULT_CONFIG_FILE};
use sqlc_scaffold_core::{
    DatabaseEngine, ProjectArchetype, TypeSafeOptions, TypeSafeSafetyRules,
};
use tracing::{debug, info};

use crate::error::{Result, ScaffoldError};
use crate::layout::create_layout;
use crate::sql::{auth_schema, example_queries, example_schema};
use crate::templates::{
    docker_compose, env_example, frontend_stub, gitignore, makefile, readme,
};

/// What the wizard asked (or was told via flags).
#[derive(Debug, Clone)]
pub struct WizardAnswers {
    /// Project and Go module name.
    pub project_name: String,
    /// Selected archetype; drives layout and safety tier.
    pub archetype: ProjectArchetype,
    /// Target database engine.
    pub engine: DatabaseEngine,
    /// Go package name for generated code.
    pub package: String,
    /// Whether to append the auth tables to the example schema.
    pub include_auth: bool,
    /// Whether to scaffold a frontend stub (forced on for fullstack).
    pub include_frontend: bool,
}

impl WizardAnswers {
    /// Builds the answer set the wizard would produce with all defaults
    /// accepted.
    pub fn non_interactive(
        project_name: impl Into<String>,
        archetype: ProjectArchetype,
        engine: DatabaseEngine,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            archetype,
            engine,
            package: "db".to_string(),
            include_auth: false,
            include_frontend: archetype == ProjectArchetype::Fullstack,
        }
    }
}

/// A fully resolved scaffolding plan: answers plus the option and safety
/// tier they imply.
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    pub answers: WizardAnswers,
    pub options: TypeSafeOptions,
    pub safety: TypeSafeSafetyRules,
}

impl ProjectPlan {
    /// Resolves an answer set into a plan.
    ///
    /// Hobby projects get the permissive development tier, enterprise
    /// projects the strict tier, everything else production defaults.
    pub fn from_answers(answers: WizardAnswers) -> Result<Self> {
        let name = answers.project_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(ScaffoldError::InvalidProjectName(
                answers.project_name.clone(),
            ));
        }
        let safety = match answers.archetype {
            ProjectArchetype::Hobby => TypeSafeSafetyRules::development(),
            ProjectArchetype::Enterprise => TypeSafeSafetyRules::strict(),
            _ => TypeSafeSafetyRules::production(),
        };
        Ok(Self {
            answers,
            options: TypeSafeOptions::production(),
            safety,
        })
    }

    /// Builds the codegen configuration document for this plan.
    pub fn build_config(&self) -> ConfigDocument {
        ConfigDocument::single_target(
            self.answers.engine,
            "db/schema.sql",
            "db/queries",
            "internal/db",
            self.answers.package.clone(),
            &self.options,
            Some(&self.safety),
        )
    }
}

/// Files written by a scaffolding run, for reporting back to the user.
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Returns true if `root` does not exist or contains no entries.
pub fn is_empty_dir(root: impl AsRef<Path>) -> bool {
    match fs::read_dir(root.as_ref()) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

/// Writes the example `db/schema.sql` and `db/queries/users.sql` pair.
///
/// Used on its own by `generate` and as part of [`scaffold_project`].
pub fn emit_examples(
    root: impl AsRef<Path>,
    engine: DatabaseEngine,
    include_auth: bool,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    fs::create_dir_all(root.join("db/queries"))?;

    let schema_path = root.join("db/schema.sql");
    let mut schema = fs::File::create(&schema_path)?;
    schema.write_all(example_schema(engine).as_bytes())?;
    if include_auth {
        schema.write_all(auth_schema(engine).as_bytes())?;
    }

    let queries_path = root.join("db/queries/users.sql");
    fs::write(&queries_path, example_queries(engine))?;

    debug!(engine = %engine, root = %root.display(), "wrote example sql");
    Ok(vec![schema_path, queries_path])
}

/// Scaffolds a complete project under `root`.
///
/// Creates the archetype layout, writes the configuration document,
/// example SQL, and the auxiliary artifacts (Makefile, .gitignore,
/// README, .env.example, Docker Compose for server engines, frontend
/// stub when requested).
///
/// # Errors
///
/// Returns [`ScaffoldError::DirectoryNotEmpty`] if `root` has contents
/// and `force` is false.
pub fn scaffold_project(
    root: impl AsRef<Path>,
    plan: &ProjectPlan,
    force: bool,
) -> Result<ScaffoldReport> {
    let root = root.as_ref();
    if !force && !is_empty_dir(root) {
        return Err(ScaffoldError::DirectoryNotEmpty(root.to_path_buf()));
    }

    let mut report = ScaffoldReport {
        directories: create_layout(root, plan.answers.archetype)?,
        files: Vec::new(),
    };

    let config_path = root.join(DEFAULT_CONFIG_FILE);
    plan.build_config().save(&config_path)?;
    report.files.push(config_path);

    report
        .files
        .extend(emit_examples(root, plan.answers.engine, plan.answers.include_auth)?);

    let engine = plan.answers.engine;
    let name = plan.answers.project_name.as_str();
    let mut write = |rel: &str, contents: String| -> Result<()> {
        let path = root.join(rel);
        fs::write(&path, contents)?;
        report.files.push(path);
        Ok(())
    };

    write("Makefile", makefile(engine))?;
    write(".gitignore", gitignore(engine))?;
    write("README.md", readme(name, engine))?;
    write(".env.example", env_example(engine))?;
    if let Some(compose) = docker_compose(engine) {
        write("docker-compose.yml", compose)?;
    }
    if plan.answers.include_frontend {
        fs::create_dir_all(root.join("web/src"))?;
        write("web/src/index.html", frontend_stub(name))?;
    }

    info!(
        project = name,
        archetype = %plan.answers.archetype,
        engine = %engine,
        files = report.files.len(),
        "scaffolded project"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlc_scaffold_config::validate_document;
    use tempfile::tempdir;

    #[test]
    fn test_plan_rejects_bad_names() {
        for bad in ["", "   ", "a/b", "a\\b"] {
            let answers = WizardAnswers::non_interactive(
                bad,
                ProjectArchetype::Microservice,
                DatabaseEngine::PostgreSql,
            );
            assert!(ProjectPlan::from_answers(answers).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_archetype_selects_safety_tier() {
        let plan = |archetype| {
            ProjectPlan::from_answers(WizardAnswers::non_interactive(
                "app",
                archetype,
                DatabaseEngine::PostgreSql,
            ))
            .unwrap()
        };
        assert_eq!(plan(ProjectArchetype::Hobby).safety, TypeSafeSafetyRules::development());
        assert_eq!(plan(ProjectArchetype::Enterprise).safety, TypeSafeSafetyRules::strict());
        assert_eq!(plan(ProjectArchetype::Analytics).safety, TypeSafeSafetyRules::production());
    }

    #[test]
    fn test_plan_config_is_valid() {
        for archetype in ProjectArchetype::ALL {
            for engine in DatabaseEngine::ALL {
                let plan = ProjectPlan::from_answers(WizardAnswers::non_interactive(
                    "app", archetype, engine,
                ))
                .unwrap();
                let result = validate_document(&plan.build_config());
                assert!(result.is_valid(), "{archetype}/{engine}: {:?}", result.errors);
            }
        }
    }

    #[test]
    fn test_scaffold_refuses_non_empty_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("existing.txt"), "hello").unwrap();

        let plan = ProjectPlan::from_answers(WizardAnswers::non_interactive(
            "app",
            ProjectArchetype::Hobby,
            DatabaseEngine::Sqlite,
        ))
        .unwrap();

        let err = scaffold_project(dir.path(), &plan, false).unwrap_err();
        assert!(matches!(err, ScaffoldError::DirectoryNotEmpty(_)));

        // force overrides
        scaffold_project(dir.path(), &plan, true).unwrap();
    }

    #[test]
    fn test_scaffold_writes_full_project() {
        let dir = tempdir().unwrap();
        let mut answers = WizardAnswers::non_interactive(
            "shop",
            ProjectArchetype::Fullstack,
            DatabaseEngine::PostgreSql,
        );
        answers.include_auth = true;
        let plan = ProjectPlan::from_answers(answers).unwrap();

        let report = scaffold_project(dir.path(), &plan, false).unwrap();
        assert!(!report.directories.is_empty());

        assert!(dir.path().join("sqlc.yaml").is_file());
        assert!(dir.path().join("docker-compose.yml").is_file());
        assert!(dir.path().join("web/src/index.html").is_file());

        let schema = fs::read_to_string(dir.path().join("db/schema.sql")).unwrap();
        assert!(schema.contains("CREATE TABLE users"));
        assert!(schema.contains("CREATE TABLE sessions"));

        // The written config loads back and validates.
        let doc = ConfigDocument::load(dir.path().join("sqlc.yaml")).unwrap();
        assert!(validate_document(&doc).is_valid());
        assert_eq!(doc.sql[0].engine, "postgresql");
    }

    #[test]
    fn test_sqlite_project_has_no_compose_file() {
        let dir = tempdir().unwrap();
        let plan = ProjectPlan::from_answers(WizardAnswers::non_interactive(
            "notes",
            ProjectArchetype::Cli,
            DatabaseEngine::Sqlite,
        ))
        .unwrap();

        scaffold_project(dir.path(), &plan, false).unwrap();
        assert!(!dir.path().join("docker-compose.yml").exists());
        assert!(dir.path().join("Makefile").is_file());
    }
}
