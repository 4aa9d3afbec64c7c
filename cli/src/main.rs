use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use sqlc_scaffold_config::{
    ConfigDocument, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_VERSION, migrate_document, switch_engine,
    validate_document,
};
use sqlc_scaffold_core::{
    DatabaseEngine, LegacyOptions, ProjectArchetype, parse_archetype_value, parse_engine_value,
};
use sqlc_scaffold_gen::{
    CheckStatus, ProjectPlan, ScaffoldError, WizardAnswers, emit_examples, has_failures,
    is_empty_dir, run_checks, scaffold_project,
};
use sqlc_scaffold_migrate::{Runner, create_pair, list_pairs};

#[derive(Debug, Parser)]
#[command(name = "sqlc-scaffold")]
#[command(about = "Scaffold and maintain sqlc-based projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a new sqlc.yaml configuration.
    Init(InitArgs),
    /// Validate a configuration file.
    Validate(ValidateArgs),
    /// Write example schema and query files.
    Generate(GenerateArgs),
    /// Scaffold a complete project directory.
    Create(CreateArgs),
    /// Migrate configurations and manage database migrations.
    Migrate(MigrateArgs),
    /// Check that the environment can run the codegen workflow.
    Doctor,
}

#[derive(Debug, Args)]
struct InitArgs {
    /// Project archetype (microservice, hobby, enterprise, api_first,
    /// library, analytics, fullstack, cli, plugin).
    #[arg(long, default_value = "microservice")]
    project_type: String,
    /// Database engine (postgresql, mysql, sqlite).
    #[arg(long, default_value = "postgresql")]
    database: String,
    /// Go package name for generated code.
    #[arg(long, default_value = "db")]
    package: String,
    /// Directory to write the configuration into.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Accept all defaults without prompting.
    #[arg(long)]
    non_interactive: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Configuration file to check.
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    file: PathBuf,
    /// Treat warnings as errors.
    #[arg(long)]
    strict: bool,
    /// Rewrite the file with known fixes applied.
    #[arg(long)]
    fix: bool,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Configuration file naming the target engine.
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Directory to write example SQL into.
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,
    /// Overwrite existing example files.
    #[arg(short = 'f', long)]
    force: bool,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Project name.
    name: String,
    /// Project archetype.
    #[arg(long = "type", default_value = "microservice")]
    project_type: String,
    /// Database engine.
    #[arg(long, default_value = "postgresql")]
    database: String,
    /// Target directory (defaults to ./<name>).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Add auth tables to the example schema.
    #[arg(long)]
    include_auth: bool,
    /// Scaffold a frontend stub.
    #[arg(long)]
    include_frontend: bool,
    /// Accept all defaults without prompting.
    #[arg(long)]
    non_interactive: bool,
    /// Scaffold into a non-empty directory.
    #[arg(short = 'f', long)]
    force: bool,
}

#[derive(Debug, Args)]
struct MigrateArgs {
    #[command(subcommand)]
    operation: Option<MigrateOperation>,

    /// Source configuration file.
    #[arg(short = 's', long, default_value = DEFAULT_CONFIG_FILE)]
    source: PathBuf,
    /// Destination file (defaults to rewriting the source).
    #[arg(short = 'd', long)]
    dest: Option<PathBuf>,
    /// Switch the configuration to this database engine.
    #[arg(short = 'b', long)]
    database: Option<String>,
    /// Target configuration schema version.
    #[arg(long, default_value = DEFAULT_CONFIG_VERSION)]
    sqlc_version: String,
    /// Overwrite an existing destination file.
    #[arg(short = 'f', long)]
    force: bool,
    /// Print the migrated configuration instead of writing it.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
enum MigrateOperation {
    /// Report the database's migration state.
    Status(MigrateStatusArgs),
    /// Create a timestamped up/down migration pair.
    Create(MigrateCreateArgs),
}

#[derive(Debug, Args)]
struct MigrateStatusArgs {
    /// Directory holding migration pairs.
    #[arg(short = 's', long, default_value = "db/migrations")]
    source: PathBuf,
    /// Database URL or file path (SQLite only).
    #[arg(short = 'd', long)]
    database: String,
}

#[derive(Debug, Args)]
struct MigrateCreateArgs {
    /// Migration name (lowercase letters, digits, underscores).
    #[arg(short = 'n', long)]
    name: Option<String>,
    /// Directory to create the pair in.
    #[arg(long, default_value = "db/migrations")]
    path: PathBuf,
}

/// A CLI failure: a single-line message plus the process exit code.
#[derive(Debug)]
struct CliError {
    code: i32,
    message: String,
}

impl CliError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }
}

impl From<ScaffoldError> for CliError {
    fn from(err: ScaffoldError) -> Self {
        match err {
            // Refusing a non-empty directory is its own exit code.
            ScaffoldError::DirectoryNotEmpty(_) => CliError::new(2, err.to_string()),
            other => CliError::failure(other.to_string()),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Init(args) => run_init(args),
        Command::Validate(args) => run_validate(args),
        Command::Generate(args) => run_generate(args),
        Command::Create(args) => run_create(args),
        Command::Migrate(args) => run_migrate(args),
        Command::Doctor => run_doctor(),
    };

    if let Err(err) = result {
        eprintln!("❌ {}", err.message);
        std::process::exit(err.code);
    }
}

/// Resolves archetype and engine flags. Failures exit with
/// `wizard_code`, which differs between `init` (2) and `create` (1).
fn resolve_answers(
    name: &str,
    project_type: &str,
    database: &str,
    wizard_code: i32,
) -> Result<WizardAnswers, CliError> {
    let archetype = parse_archetype_value("project type", project_type).map_err(|err| {
        CliError::new(
            wizard_code,
            format!(
                "{err}; expected one of: {}",
                list_options(ProjectArchetype::ALL.iter().map(|a| a.as_str())),
            ),
        )
    })?;
    let engine = parse_engine_value("database", database).map_err(|err| {
        CliError::new(
            wizard_code,
            format!(
                "{err}; expected one of: {}",
                list_options(DatabaseEngine::ALL.iter().map(|e| e.as_str())),
            ),
        )
    })?;
    Ok(WizardAnswers::non_interactive(name, archetype, engine))
}

fn list_options<'a>(options: impl Iterator<Item = &'a str>) -> String {
    options.collect::<Vec<_>>().join(", ")
}

fn run_init(args: InitArgs) -> Result<(), CliError> {
    let config_path = args.output_dir.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        return Err(CliError::failure(format!(
            "{} already exists; remove it or run `sqlc-scaffold validate` instead",
            config_path.display()
        )));
    }

    let mut answers = resolve_answers("app", &args.project_type, &args.database, 2)?;
    answers.package = args.package;
    let plan = ProjectPlan::from_answers(answers).map_err(|e| CliError::new(2, e.to_string()))?;

    fs::create_dir_all(&args.output_dir)
        .map_err(|e| CliError::failure(format!("could not create output directory: {e}")))?;
    plan.build_config()
        .save(&config_path)
        .map_err(|e| CliError::failure(format!("could not write config: {e}")))?;

    println!("✅ wrote {}", config_path.display());
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let mut doc = ConfigDocument::load(&args.file)
        .map_err(|e| CliError::failure(format!("could not load {}: {e}", args.file.display())))?;

    if args.fix {
        let fixed = apply_fixes(&mut doc);
        if fixed > 0 {
            doc.save(&args.file).map_err(|e| {
                CliError::failure(format!("could not write {}: {e}", args.file.display()))
            })?;
            println!("✅ applied {fixed} fix(es) to {}", args.file.display());
        }
    }

    let mut result = validate_document(&doc);
    if args.strict {
        result.promote_warnings();
    }

    for warning in &result.warnings {
        println!("⚠️  {}: {}", warning.field, warning.message);
    }
    for error in &result.errors {
        println!("❌ {}: {}", error.field, error.message);
    }

    if result.is_valid() {
        println!("✅ {} is valid", args.file.display());
        Ok(())
    } else {
        Err(CliError::failure(format!(
            "{} has {} error(s)",
            args.file.display(),
            result.errors.len()
        )))
    }
}

/// Normalizes recoverable mistakes in place: unknown JSON tag case
/// styles become `camel`, and required output file names fall back to
/// their defaults. Returns the number of fields changed.
fn apply_fixes(doc: &mut ConfigDocument) -> usize {
    let mut fixed = 0;
    for block in &mut doc.sql {
        for target in block.targets.values_mut() {
            let options = &mut target.options;
            if !LegacyOptions::is_valid_case_style(&options.json_tags_case_style) {
                options.json_tags_case_style = "camel".to_string();
                fixed += 1;
            }
            let defaults = LegacyOptions::default();
            for (value, default) in [
                (&mut options.output_db_file_name, &defaults.output_db_file_name),
                (
                    &mut options.output_models_file_name,
                    &defaults.output_models_file_name,
                ),
                (
                    &mut options.output_querier_file_name,
                    &defaults.output_querier_file_name,
                ),
            ] {
                if value.trim().is_empty() {
                    *value = default.clone();
                    fixed += 1;
                }
            }
        }
    }
    fixed
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let doc = ConfigDocument::load(&args.config).map_err(|e| {
        CliError::failure(format!("could not load {}: {e}", args.config.display()))
    })?;
    let engine = doc
        .sql
        .first()
        .and_then(|block| block.parsed_engine())
        .ok_or_else(|| {
            CliError::failure(format!(
                "{} has no sql block with a known engine",
                args.config.display()
            ))
        })?;

    if !args.force && args.output.join("db").join("schema.sql").exists() {
        return Err(CliError::failure(format!(
            "{} already has example SQL; pass --force to overwrite",
            args.output.display()
        )));
    }

    let files = emit_examples(&args.output, engine, false)?;
    for file in files {
        println!("✅ wrote {}", file.display());
    }
    Ok(())
}

fn run_create(args: CreateArgs) -> Result<(), CliError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::failure("project name must not be empty"));
    }

    let mut answers = resolve_answers(name, &args.project_type, &args.database, 1)?;
    answers.include_auth = args.include_auth;
    answers.include_frontend = answers.include_frontend || args.include_frontend;
    let plan = ProjectPlan::from_answers(answers).map_err(|e| CliError::failure(e.to_string()))?;

    let target = args.output.unwrap_or_else(|| PathBuf::from(".").join(name));
    if !args.force && !is_empty_dir(&target) {
        return Err(CliError::new(
            2,
            format!("{} is not empty; pass -f to scaffold anyway", target.display()),
        ));
    }
    fs::create_dir_all(&target)
        .map_err(|e| CliError::failure(format!("could not create {}: {e}", target.display())))?;

    let report = scaffold_project(&target, &plan, args.force)?;
    println!(
        "✅ scaffolded {} ({} directories, {} files) in {}",
        name,
        report.directories.len(),
        report.files.len(),
        target.display()
    );
    Ok(())
}

fn run_migrate(args: MigrateArgs) -> Result<(), CliError> {
    match args.operation {
        Some(MigrateOperation::Status(status_args)) => run_migrate_status(status_args),
        Some(MigrateOperation::Create(create_args)) => run_migrate_create(create_args),
        None => run_migrate_config(args),
    }
}

fn run_migrate_config(args: MigrateArgs) -> Result<(), CliError> {
    let yaml = fs::read_to_string(&args.source)
        .map_err(|e| CliError::failure(format!("could not read {}: {e}", args.source.display())))?;

    let outcome = migrate_document(&yaml, &args.sqlc_version)
        .map_err(|e| CliError::failure(format!("migration failed: {e}")))?;
    let mut doc = outcome.document;
    for warning in &outcome.warnings {
        println!("⚠️  {warning}");
    }

    if let Some(database) = &args.database {
        let engine = parse_engine_value("database", database).map_err(|err| {
            CliError::failure(format!(
                "{err}; expected one of: {}",
                list_options(DatabaseEngine::ALL.iter().map(|e| e.as_str())),
            ))
        })?;
        for warning in switch_engine(&mut doc, engine) {
            println!("⚠️  {warning}");
        }
    }

    if args.dry_run {
        let rendered = doc
            .to_yaml()
            .map_err(|e| CliError::failure(format!("could not render config: {e}")))?;
        print!("{rendered}");
        return Ok(());
    }

    let dest = args.dest.unwrap_or_else(|| args.source.clone());
    if dest != args.source && dest.exists() && !args.force {
        return Err(CliError::failure(format!(
            "{} already exists; pass -f to overwrite",
            dest.display()
        )));
    }
    doc.save(&dest)
        .map_err(|e| CliError::failure(format!("could not write {}: {e}", dest.display())))?;
    println!("✅ wrote {}", dest.display());
    Ok(())
}

fn run_migrate_status(args: MigrateStatusArgs) -> Result<(), CliError> {
    let pairs = list_pairs(&args.source)
        .map_err(|e| CliError::failure(format!("could not list migrations: {e}")))?;

    let path = sqlite_path(&args.database)?;
    let runner = Runner::open(path)
        .map_err(|e| CliError::failure(format!("could not open database: {e}")))?;
    let status = runner
        .status()
        .map_err(|e| CliError::failure(format!("could not read status: {e}")))?;

    let applied = status
        .version()
        .map(|v| pairs.iter().filter(|p| p.version <= v).count())
        .unwrap_or(0);
    println!("Database: {status}");
    println!("Applied: {applied} of {} migration(s)", pairs.len());
    if status.is_dirty() {
        return Err(CliError::failure(
            "database is dirty; repair it manually before migrating further",
        ));
    }
    Ok(())
}

fn run_migrate_create(args: MigrateCreateArgs) -> Result<(), CliError> {
    let name = args
        .name
        .ok_or_else(|| CliError::failure("migration name is required (-n <name>)"))?;
    let pair = create_pair(&args.path, &name)
        .map_err(|e| CliError::failure(format!("could not create migration: {e}")))?;
    println!("✅ wrote {}", pair.up_path.display());
    println!("✅ wrote {}", pair.down_path.display());
    Ok(())
}

/// Extracts the file path from a SQLite database URL.
///
/// Accepts bare paths plus `file:` and `sqlite://` prefixes; anything
/// with another scheme is not managed by the built-in runner.
fn sqlite_path(url: &str) -> Result<&Path, CliError> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("file:"))
        .unwrap_or(url);
    if path.contains("://") {
        return Err(CliError::failure(format!(
            "'{url}' is not a SQLite database; the built-in runner only manages SQLite"
        )));
    }
    Ok(Path::new(path))
}

fn run_doctor() -> Result<(), CliError> {
    let results = run_checks(Some(Path::new(DEFAULT_CONFIG_FILE)));

    for result in &results {
        let icon = match result.status {
            CheckStatus::Pass => "✅",
            CheckStatus::Warn => "⚠️ ",
            CheckStatus::Fail => "❌",
        };
        match result.remedy {
            Some(remedy) if result.status != CheckStatus::Pass => {
                println!("{icon} {}: {} ({remedy})", result.name, result.detail);
            }
            _ => println!("{icon} {}: {}", result.name, result.detail),
        }
    }

    if has_failures(&results) {
        Err(CliError::failure("environment checks failed"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_path_accepts_plain_and_prefixed() {
        assert_eq!(sqlite_path("app.db").unwrap(), Path::new("app.db"));
        assert_eq!(sqlite_path("file:app.db").unwrap(), Path::new("app.db"));
        assert_eq!(
            sqlite_path("sqlite:///tmp/app.db").unwrap(),
            Path::new("/tmp/app.db")
        );
    }

    #[test]
    fn test_sqlite_path_rejects_other_schemes() {
        assert!(sqlite_path("postgresql://localhost/app").is_err());
        assert!(sqlite_path("mysql://root@localhost/app").is_err());
    }

    #[test]
    fn test_resolve_answers_reports_wizard_code() {
        let err = resolve_answers("app", "spaceship", "postgresql", 2).unwrap_err();
        assert_eq!(err.code, 2);
        assert!(err.message.contains("project type"));
        assert!(err.message.contains("spaceship"));
        let err = resolve_answers("app", "hobby", "oracle", 1).unwrap_err();
        assert_eq!(err.code, 1);
        assert!(err.message.contains("database"));
        assert!(resolve_answers("app", "hobby", "sqlite", 2).is_ok());
    }

    #[test]
    fn test_apply_fixes_normalizes_options() {
        let mut doc = ConfigDocument::single_target(
            DatabaseEngine::PostgreSql,
            "db/schema.sql",
            "db/queries",
            "internal/db",
            "db",
            &sqlc_scaffold_core::TypeSafeOptions::production(),
            None,
        );
        {
            let target = doc.sql[0].targets.get_mut("go").unwrap();
            target.options.json_tags_case_style = "screaming".to_string();
            target.options.output_db_file_name = String::new();
        }

        assert_eq!(apply_fixes(&mut doc), 2);
        let target = &doc.sql[0].targets["go"];
        assert_eq!(target.options.json_tags_case_style, "camel");
        assert_eq!(target.options.output_db_file_name, "db.go");
        assert!(validate_document(&doc).is_valid());
    }
}
