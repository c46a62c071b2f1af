//! Environment health checks.
//!
//! The `doctor` command reports which configuration files were found and
//! whether a dependency database could be loaded, so users can tell why
//! unknown dependencies are being ignored.

use std::path::PathBuf;

use crate::core::Environment;
use crate::ops::load::{
    database_disabled, database_sources, open_environment, EnvironmentOptions,
};
use crate::util::GlobalContext;

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Related file (if applicable)
    pub path: Option<PathBuf>,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the related path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Add a check result.
    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Get the count of passed checks.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get the count of failed checks.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

/// Run the health checks.
pub fn doctor(ctx: &GlobalContext, options: &EnvironmentOptions) -> DoctorReport {
    let mut report = DoctorReport::default();
    let config = ctx.load_config();

    for (name, path) in [
        ("Global config", ctx.config_path()),
        ("Project config", ctx.project_config_path()),
    ] {
        let check = if path.exists() {
            CheckResult::pass(name, "found")
        } else {
            CheckResult::fail(name, "not present, using defaults")
        };
        report.add(check.optional().with_path(path));
    }

    let sources = database_sources(&config, options);
    for source in &sources {
        let check = if source.is_file() {
            CheckResult::pass("Database source", "readable")
        } else {
            CheckResult::fail("Database source", "missing")
        };
        report.add(check.optional().with_path(source.clone()));
    }

    let env = open_environment(&config, options);
    report.add(check_database(&env, database_disabled(&config, options)));

    report
}

fn check_database(env: &Environment, disabled: bool) -> CheckResult {
    if env.has_dependency_database() {
        CheckResult::pass("Dependency database", "loaded")
    } else if disabled {
        CheckResult::pass("Dependency database", "disabled").optional()
    } else {
        CheckResult::fail(
            "Dependency database",
            "not available, unknown dependencies will be ignored",
        )
    }
}

/// Format a doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    writeln!(output, "Checks:").unwrap();
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let required = if check.required { "" } else { " (optional)" };

        writeln!(output, "  {} {}{}: {}", status, check.name, required, check.message).unwrap();

        if verbose {
            if let Some(path) = &check.path {
                writeln!(output, "      Path: {}", path.display()).unwrap();
            }
        }
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "Summary: {} passed, {} failed",
        report.passed_count(),
        report.failed_count()
    )
    .unwrap();

    if !report.all_required_passed() {
        writeln!(
            output,
            "\nWarning: no dependency database; unknown dependencies will be ignored."
        )
        .unwrap();
    }

    output
}
