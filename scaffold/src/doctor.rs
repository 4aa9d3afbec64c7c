//! Environment checks behind the `doctor` command.
//!
//! Each check reports pass, warn, or fail with a human-readable detail
//! line and, where a fix is known, a remedy hint. Missing optional
//! tooling warns; anything the codegen workflow cannot function without
//! fails.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use sqlc_scaffold_config::{ConfigDocument, validate_document};
use sqlc_scaffold_migrate::Runner;
use tracing::debug;
use wait_timeout::ChildExt;

/// Deadline for probing external binaries.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a single environment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// One entry in the doctor's report.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Short check name, e.g. `"sqlc binary"`.
    pub name: &'static str,
    pub status: CheckStatus,
    /// What was observed.
    pub detail: String,
    /// How to fix it, when known.
    pub remedy: Option<&'static str>,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Pass,
            detail: detail.into(),
            remedy: None,
        }
    }

    fn warn(name: &'static str, detail: impl Into<String>, remedy: &'static str) -> Self {
        Self {
            name,
            status: CheckStatus::Warn,
            detail: detail.into(),
            remedy: Some(remedy),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>, remedy: &'static str) -> Self {
        Self {
            name,
            status: CheckStatus::Fail,
            detail: detail.into(),
            remedy: Some(remedy),
        }
    }
}

/// Returns true if any check in the report failed.
pub fn has_failures(results: &[CheckResult]) -> bool {
    results.iter().any(|r| r.status == CheckStatus::Fail)
}

/// Runs the full check suite.
///
/// `config_path` is the configuration file the project is expected to
/// carry; pass the default `sqlc.yaml` location when running inside a
/// project directory.
pub fn run_checks(config_path: Option<&Path>) -> Vec<CheckResult> {
    let mut results = vec![
        check_sqlc_binary(),
        check_sqlite_driver(),
        check_client_binary("psql", "psql client", "install postgresql-client to apply migrations against PostgreSQL"),
        check_client_binary("mysql", "mysql client", "install mysql-client to apply migrations against MySQL"),
    ];
    if let Some(path) = config_path {
        results.push(check_config(path));
    }
    results
}

/// Probes whether a binary resolves on PATH.
fn command_exists(command: &str) -> bool {
    Command::new("which")
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Runs `<command> version` under the probe deadline and returns the
/// first output line.
fn probe_version(command: &str) -> Option<String> {
    let mut child = Command::new(command)
        .arg("version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    match child.wait_timeout(PROBE_TIMEOUT) {
        Ok(Some(status)) if status.success() => {}
        Ok(Some(_)) | Err(_) => return None,
        Ok(None) => {
            debug!(command, "version probe timed out");
            let _ = child.kill();
            let _ = child.wait();
            return None;
        }
    }

    let output = child.wait_with_output().ok()?;
    let line = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()?
        .trim()
        .to_string();
    (!line.is_empty()).then_some(line)
}

fn check_sqlc_binary() -> CheckResult {
    if !command_exists("sqlc") {
        return CheckResult::fail(
            "sqlc binary",
            "sqlc not found on PATH",
            "install sqlc from https://sqlc.dev or your package manager",
        );
    }
    match probe_version("sqlc") {
        Some(version) => CheckResult::pass("sqlc binary", version),
        None => CheckResult::warn(
            "sqlc binary",
            "sqlc found but `sqlc version` did not respond",
            "reinstall sqlc or check that the binary is not corrupted",
        ),
    }
}

fn check_sqlite_driver() -> CheckResult {
    match Runner::open_in_memory() {
        Ok(_) => CheckResult::pass("sqlite driver", "in-memory database opened"),
        Err(e) => CheckResult::fail(
            "sqlite driver",
            format!("could not open in-memory database: {e}"),
            "rebuild with the bundled sqlite feature enabled",
        ),
    }
}

fn check_client_binary(binary: &str, name: &'static str, remedy: &'static str) -> CheckResult {
    if command_exists(binary) {
        CheckResult::pass(name, format!("{binary} found on PATH"))
    } else {
        CheckResult::warn(name, format!("{binary} not found on PATH"), remedy)
    }
}

fn check_config(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::warn(
            "config file",
            format!("{} not found", path.display()),
            "run `sqlc-scaffold init` to generate one",
        );
    }
    match ConfigDocument::load(path) {
        Ok(doc) => {
            let result = validate_document(&doc);
            if result.is_valid() {
                CheckResult::pass("config file", format!("{} is valid", path.display()))
            } else {
                CheckResult::fail(
                    "config file",
                    format!("{} has {} error(s)", path.display(), result.errors.len()),
                    "run `sqlc-scaffold validate` for details",
                )
            }
        }
        Err(e) => CheckResult::fail(
            "config file",
            format!("could not parse {}: {e}", path.display()),
            "run `sqlc-scaffold validate` for details",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_driver_check_passes() {
        let result = check_sqlite_driver();
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn test_missing_config_warns() {
        let dir = tempdir().unwrap();
        let result = check_config(&dir.path().join("sqlc.yaml"));
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.remedy.is_some());
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sqlc.yaml");
        std::fs::write(&path, "version: \"2\"\nsql: []\n").unwrap();
        let result = check_config(&path);
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn test_has_failures() {
        let pass = CheckResult::pass("x", "ok");
        let warn = CheckResult::warn("y", "meh", "fix it");
        assert!(!has_failures(&[pass.clone(), warn.clone()]));

        let fail = CheckResult::fail("z", "bad", "fix it");
        assert!(has_failures(&[pass, warn, fail]));
    }
}
