//! Project scaffolding for sqlc-based codebases.
//!
//! This crate turns a resolved wizard plan into files on disk: an
//! archetype-specific directory skeleton, a codegen configuration,
//! dialect-correct example schema and queries, and auxiliary artifacts
//! (Makefile, Docker Compose, README, env file). It also hosts the
//! `doctor` environment checks.
//!
//! # Example
//!
//! ```no_run
//! use sqlc_scaffold_core::{DatabaseEngine, ProjectArchetype};
//! use sqlc_scaffold_gen::{ProjectPlan, WizardAnswers, scaffold_project};
//!
//! let answers = WizardAnswers::non_interactive(
//!     "shop",
//!     ProjectArchetype::Microservice,
//!     DatabaseEngine::PostgreSql,
//! );
//! let plan = ProjectPlan::from_answers(answers).unwrap();
//! let report = scaffold_project("shop/", &plan, false).unwrap();
//! println!("wrote {} files", report.files.len());
//! ```

mod doctor;
mod error;
mod layout;
mod sql;
mod templates;
mod wizard;

pub use doctor::{CheckResult, CheckStatus, has_failures, run_checks};
pub use error::{Result, ScaffoldError};
pub use layout::{create_layout, directories};
pub use sql::{auth_schema, example_queries, example_schema};
pub use templates::{docker_compose, env_example, frontend_stub, gitignore, makefile, readme};
pub use wizard::{
    ProjectPlan, ScaffoldReport, WizardAnswers, emit_examples, is_empty_dir, scaffold_project,
};
