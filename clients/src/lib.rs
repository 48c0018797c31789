//! Shared plumbing for the MARLEY configuration client binaries.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use marley_conformance::{run_all, CheckOptions, ConformanceReport, TestResult};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

/// File extensions treated as configuration files when scanning directories.
pub const CONFIG_EXTENSIONS: &[&str] = &["js", "json"];

/// Initializes logging to stderr.
///
/// `RUST_LOG` overrides the default filter, which is `info` for the given
/// binary target and `warn` for everything else.
pub fn init_logging(target: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{target}=info")));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Expands command-line paths into configuration files.
///
/// Files are taken as given. Directories are walked recursively for files
/// with one of [`CONFIG_EXTENSIONS`], in sorted order.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn collect_configs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            let before = out.len();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("Failed to read {}", path.display()))?;
                if entry.file_type().is_file() && is_config_file(entry.path()) {
                    out.push(entry.into_path());
                }
            }
            debug!(dir = %path.display(), found = out.len() - before, "scanned directory");
        } else if path.exists() {
            out.push(path.clone());
        } else {
            anyhow::bail!("{} does not exist", path.display());
        }
    }
    Ok(out)
}

fn is_config_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| CONFIG_EXTENSIONS.contains(&e))
}

/// Runs the conformance suite over one file.
///
/// A file that cannot be read becomes a single `config/read` failure, so a
/// multi-file run reports it and carries on.
#[must_use]
pub fn check_file(config: &Path, marley_home: Option<&Path>) -> ConformanceReport {
    let options = CheckOptions {
        config: config.to_path_buf(),
        marley_home: marley_home.map(Path::to_path_buf),
    };
    run_all(&options).unwrap_or_else(|e| {
        warn!(path = %config.display(), "{e:#}");
        let mut report = ConformanceReport::new();
        report.push(TestResult::fail("config/read", format!("{e:#}")));
        report
    })
}

/// Totals across all printed reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Passing checks.
    pub passed: usize,
    /// Warnings.
    pub warned: usize,
    /// Failed checks.
    pub failed: usize,
}

impl Tally {
    /// Adds the counts of one report.
    pub fn add(&mut self, report: &ConformanceReport) {
        self.failed += report.failure_count();
        self.warned += report.warning_count();
        self.passed += report.results.len() - report.failure_count() - report.warning_count();
    }

    /// Number of checks that make the run fail. With `strict`, warnings count.
    #[must_use]
    pub fn blocking(&self, strict: bool) -> usize {
        self.failed + if strict { self.warned } else { 0 }
    }
}

/// Renders a report as `[PASS] validator — message` lines with indented details.
#[must_use]
pub fn render_report(report: &ConformanceReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        out.push_str(&format!(
            "[{}] {} — {}\n",
            result.severity.label(),
            result.validator,
            result.message
        ));
        for detail in &result.details {
            out.push_str(&format!("       {detail}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use marley_conformance::TestResult;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn collects_config_files_from_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.js"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("nested").join("c.js"), "{}").unwrap();

        let found = collect_configs(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.json", "b.js", "c.js"]);
    }

    #[test]
    fn missing_path_is_an_error() {
        assert!(collect_configs(&[PathBuf::from("/nonexistent/x.js")]).is_err());
    }

    #[test]
    fn renders_details_and_tallies() {
        let mut report = ConformanceReport::new();
        report.push(TestResult::pass("config/seed", "seed = 1"));
        report.push(TestResult::fail_with_details(
            "config/target",
            "Target composition is invalid",
            vec!["target.atom_fractions: fractions sum to 0.5".to_owned()],
        ));
        let text = render_report(&report);
        assert_eq!(
            text,
            "[PASS] config/seed — seed = 1\n\
             [FAIL] config/target — Target composition is invalid\n       \
             target.atom_fractions: fractions sum to 0.5\n"
        );
        let mut tally = Tally::default();
        tally.add(&report);
        assert_eq!(
            tally,
            Tally {
                passed: 1,
                warned: 0,
                failed: 1
            }
        );
    }

    #[test]
    fn blocking_counts_warnings_only_when_strict() {
        let clean = Tally {
            passed: 9,
            warned: 0,
            failed: 0,
        };
        assert_eq!(clean.blocking(false), 0);
        assert_eq!(clean.blocking(true), 0);

        let warned = Tally {
            passed: 8,
            warned: 2,
            failed: 0,
        };
        assert_eq!(warned.blocking(false), 0);
        assert_eq!(warned.blocking(true), 2);

        let failed = Tally {
            passed: 7,
            warned: 1,
            failed: 1,
        };
        assert_eq!(failed.blocking(false), 1);
        assert_eq!(failed.blocking(true), 2);
    }

    #[test]
    fn unreadable_file_is_a_failure_and_later_files_still_run() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.js");
        fs::write(
            &good,
            include_str!("../../config/data/supernova_ve40ar.js"),
        )
        .unwrap();
        let missing = dir.path().join("missing.js");

        let mut tally = Tally::default();
        let first = check_file(&missing, None);
        assert_eq!(first.results.len(), 1);
        assert_eq!(first.results[0].validator, "config/read");
        assert!(first.results[0].message.contains("missing.js"));
        tally.add(&first);

        let second = check_file(&good, None);
        assert!(second.all_passed());
        tally.add(&second);

        assert_eq!(tally.failed, 1);
        assert_eq!(tally.blocking(false), 1);
        assert!(render_report(&first).starts_with("[FAIL] config/read — Failed to read "));
    }
}
