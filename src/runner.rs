//! Batch pubspec check over every package a [`PackageSource`] supplies.

use log::debug;
use serde::Serialize;

use crate::diagnostics::{Diagnostic, E000};
use crate::errors::Result;
use crate::packages::{PackageRef, PackageSource};
use crate::validator::validate;

/// Indentation for per-package diagnostic lines and the failure list.
const INDENT: &str = "  ";

/// Destination for the human-readable transcript.
pub trait OutputSink {
    /// Emit one line of output.
    fn line(&mut self, text: &str);
}

/// Writes each line to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Collects lines in memory.
impl OutputSink for Vec<String> {
    fn line(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Discards all output.
#[derive(Debug, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn line(&mut self, _text: &str) {}
}

/// Result of checking one package.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    /// Path relative to the packages directory.
    pub path: String,
    /// `true` if the package has no pubspec.yaml and was not checked.
    pub skipped: bool,
    pub passed: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Packages whose pubspec.yaml was validated.
    pub checked: usize,
    /// Packages without a pubspec.yaml.
    pub skipped: usize,
    /// Relative paths of failing packages, in check order.
    pub failing: Vec<String>,
    pub reports: Vec<PackageReport>,
}

impl BatchSummary {
    /// Returns `true` if no package failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failing.is_empty()
    }

    /// Process exit status: 0 when every package passed, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.passed())
    }
}

/// Check every package from `source`, writing the transcript to `out`.
///
/// A package's read or parse failure is reported against that package and
/// never stops the batch.
///
/// # Errors
///
/// Returns an error only if `source` cannot enumerate its packages.
pub fn run_pubspec_check(
    source: &dyn PackageSource,
    out: &mut dyn OutputSink,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for package in source.packages()? {
        out.line(&format!("Checking {}...", package.relative_path));
        let report = check_package(source, &package);
        for diag in &report.diagnostics {
            for line in diag.to_string().lines() {
                out.line(&format!("{INDENT}{line}"));
            }
        }

        if report.skipped {
            summary.skipped += 1;
        } else {
            summary.checked += 1;
        }
        if !report.passed {
            summary.failing.push(report.path.clone());
        }
        debug!(
            "{}: {}",
            report.path,
            match (report.skipped, report.passed) {
                (true, _) => "skipped",
                (false, true) => "ok",
                (false, false) => "failed",
            }
        );
        summary.reports.push(report);
    }

    if summary.failing.is_empty() {
        out.line("");
        out.line("No pubspec issues found!");
    } else {
        out.line("The following packages have pubspec issues:");
        for path in &summary.failing {
            out.line(&format!("{INDENT}{path}"));
        }
    }

    Ok(summary)
}

fn check_package(source: &dyn PackageSource, package: &PackageRef) -> PackageReport {
    let mut report = PackageReport {
        path: package.relative_path.clone(),
        skipped: false,
        passed: true,
        diagnostics: Vec::new(),
    };
    match source.read_manifest(package) {
        Ok(None) => report.skipped = true,
        Ok(Some(content)) => {
            let result = validate(&content, &package.name);
            report.passed = result.passed;
            report.diagnostics = result.diagnostics;
        }
        Err(e) => {
            report.passed = false;
            report.diagnostics.push(Diagnostic::new(
                E000,
                format!("Cannot read pubspec.yaml: {e}"),
            ));
        }
    }
    report
}
