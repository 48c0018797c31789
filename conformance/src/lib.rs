//! MARLEY run configuration conformance suite.
//!
//! Where [`marley_config::load`] stops at the first problem, this crate runs
//! every check and collects the outcomes into a [`ConformanceReport`], so a
//! configuration author sees all issues in one pass.
//!
//! # Checks
//!
//! | Validator | Checks |
//! |-----------|--------|
//! | `config/structure` | Well-formed relaxed JSON, object root, exactly the five top-level fields |
//! | `config/seed` | Non-negative 64-bit integer |
//! | `config/target` | Valid nuclide codes, parallel arrays, fractions sum to 1, no duplicates |
//! | `config/reactions` | Non-empty file list, `.react` extension, files on disk, naming convention |
//! | `config/source` | Known `type`, type-specific fields, physical spectrum parameters |
//! | `config/direction` | Finite, non-zero, unit norm |
//!
//! # Entry Point
//!
//! ```no_run
//! use marley_conformance::{run_all, CheckOptions};
//! use std::path::PathBuf;
//!
//! let options = CheckOptions {
//!     config: PathBuf::from("marley_config.js"),
//!     marley_home: None,
//! };
//! let report = run_all(&options).expect("Failed to read configuration");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod report;
pub mod validators;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, trace};

pub use report::{ConformanceReport, Severity, TestResult};
pub use validators::reactions::ReactionSearch;

/// Inputs of a conformance run over one configuration file.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Configuration file to check.
    pub config: PathBuf,
    /// MARLEY installation directory. Reaction files are only checked on
    /// disk when this is set.
    pub marley_home: Option<PathBuf>,
}

/// Runs all validators over one configuration file.
///
/// Validators are run in this order:
/// 1. Document structure (syntax, root object, top-level keys)
/// 2. Seed
/// 3. Target composition
/// 4. Reaction files
/// 5. Neutrino source
/// 6. Beam direction
///
/// # Errors
///
/// Returns an error only if the configuration file cannot be read.
pub fn run_all(options: &CheckOptions) -> Result<ConformanceReport> {
    let text = std::fs::read_to_string(&options.config)
        .with_context(|| format!("Failed to read {}", options.config.display()))?;
    debug!(path = %options.config.display(), "checking run configuration");
    let search = ReactionSearch {
        config_dir: options.config.parent(),
        marley_home: options.marley_home.as_deref(),
    };
    Ok(check_str(&text, &search))
}

/// Runs all validators over configuration text.
pub fn check_str(text: &str, search: &ReactionSearch<'_>) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    // 1. Structure
    let Some(document) = validators::structure::parse(text, &mut report) else {
        return report;
    };
    let (structure, proceed) = validators::structure::validate(&document);
    report.extend(structure);
    if !proceed {
        return report;
    }

    // 2-6. Sections
    trace!("running section validators");
    report.extend(validators::seed::validate(&document));
    report.extend(validators::target::validate(&document));
    report.extend(validators::reactions::validate(&document, search));
    report.extend(validators::source::validate(&document));
    report.extend(validators::direction::validate(&document));

    debug!(
        checks = report.results.len(),
        failures = report.failure_count(),
        warnings = report.warning_count(),
        "conformance run complete"
    );
    report
}
