//! Reaction file validator.
//!
//! Verifies that `reactions` is a non-empty list of file names. When a
//! MARLEY home directory is known, each file must also resolve on disk,
//! either as written (relative to the configuration file) or under
//! `<home>/data/react/`.
//!
//! Reaction files named after MARLEY's `<flavor><A><Symbol>...` convention
//! (for example `ve40ArCC_Bhattacharya2009.react`) are cross-checked against
//! the source flavor and the target nuclides. Mismatches only warn, because
//! the name is a convention and not part of the file format.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use marley_config::nuclide::z_for_symbol;
use marley_config::{Neutrino, Nuclide, ReactionFile, SpectrumSource, Target};
use regex::Regex;
use serde_json::Value;

use super::decode_section;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "config/reactions";

/// Extension used by MARLEY reaction-data files.
pub const REACTION_EXTENSION: &str = "react";

/// Where to look for reaction files.
#[derive(Debug, Clone, Default)]
pub struct ReactionSearch<'a> {
    /// Directory containing the configuration file.
    pub config_dir: Option<&'a Path>,
    /// MARLEY installation directory (the `MARLEY` environment variable).
    pub marley_home: Option<&'a Path>,
}

impl ReactionSearch<'_> {
    /// Returns the first existing path for a reaction file, if any.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let as_written = Path::new(name);
        let mut candidates = Vec::new();
        if as_written.is_absolute() {
            candidates.push(as_written.to_path_buf());
        } else {
            if let Some(dir) = self.config_dir {
                candidates.push(dir.join(as_written));
            }
            if let Some(home) = self.marley_home {
                candidates.push(home.join("data").join("react").join(as_written));
            }
        }
        candidates.into_iter().find(|p| p.is_file())
    }
}

/// Parsed reaction-file naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionName {
    /// Projectile flavor.
    pub neutrino: Neutrino,
    /// Target nucleus.
    pub nuclide: Nuclide,
}

/// Parses `<flavor><A><Symbol>` from the start of a reaction file name.
#[must_use]
pub fn parse_reaction_name(name: &str) -> Option<ReactionName> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"^(vebar|ve|vubar|vu|vtbar|vt)([0-9]{1,3})([A-Z][a-z]?)").ok())
        .as_ref()?;
    let file_name = Path::new(name).file_name()?.to_str()?;
    let caps = pattern.captures(file_name)?;
    let neutrino = Neutrino::from_tag(caps.get(1)?.as_str())?;
    let a: u32 = caps.get(2)?.as_str().parse().ok()?;
    let z = z_for_symbol(caps.get(3)?.as_str())?;
    let nuclide = Nuclide::from_za(z, a).ok()?;
    Some(ReactionName { neutrino, nuclide })
}

/// Validates the `reactions` section.
pub fn validate(document: &Value, search: &ReactionSearch<'_>) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let reactions: Vec<ReactionFile> = match decode_section(document, "reactions") {
        None => return report,
        Some(Ok(r)) => r,
        Some(Err(message)) => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("reactions must be a list of file names: {message}"),
            ));
            return report;
        }
    };

    if reactions.is_empty() {
        report.push(TestResult::fail(VALIDATOR, "At least one reaction file is required"));
        return report;
    }
    let blank: Vec<String> = reactions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.as_str().trim().is_empty())
        .map(|(i, _)| format!("reactions[{i}]"))
        .collect();
    if blank.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{} reaction file(s) listed", reactions.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Reaction file names must not be empty",
            blank,
        ));
        return report;
    }

    let odd_extension: Vec<String> = reactions
        .iter()
        .filter(|r| {
            Path::new(r.as_str()).extension().and_then(|e| e.to_str()) != Some(REACTION_EXTENSION)
        })
        .map(ToString::to_string)
        .collect();
    if !odd_extension.is_empty() {
        report.push(TestResult::warn_with_details(
            VALIDATOR,
            format!("Reaction files without the .{REACTION_EXTENSION} extension"),
            odd_extension,
        ));
    }

    check_resolution(&reactions, search, &mut report);
    check_naming(document, &reactions, &mut report);

    report
}

fn check_resolution(
    reactions: &[ReactionFile],
    search: &ReactionSearch<'_>,
    report: &mut ConformanceReport,
) {
    if search.marley_home.is_none() {
        return;
    }
    let unresolved: Vec<String> = reactions
        .iter()
        .filter(|r| search.resolve(r.as_str()).is_none())
        .map(ToString::to_string)
        .collect();
    if unresolved.is_empty() {
        report.push(TestResult::pass(VALIDATOR, "All reaction files resolve on disk"));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Reaction files not found",
            unresolved,
        ));
    }
}

fn check_naming(document: &Value, reactions: &[ReactionFile], report: &mut ConformanceReport) {
    let flavor = decode_section::<SpectrumSource>(document, "source")
        .and_then(Result::ok)
        .map(|s| s.neutrino());
    let nuclides = decode_section::<Target>(document, "target")
        .and_then(Result::ok)
        .map(|t| t.nuclides);

    let mut mismatches = Vec::new();
    for reaction in reactions {
        let Some(parsed) = parse_reaction_name(reaction.as_str()) else {
            continue;
        };
        if let Some(flavor) = flavor {
            if parsed.neutrino != flavor {
                mismatches.push(format!(
                    "{reaction}: projectile {} but source emits {flavor}",
                    parsed.neutrino
                ));
            }
        }
        if let Some(nuclides) = &nuclides {
            if !nuclides.contains(&parsed.nuclide) {
                mismatches.push(format!(
                    "{reaction}: target {} is not in the target composition",
                    parsed.nuclide
                ));
            }
        }
    }
    if !mismatches.is_empty() {
        report.push(TestResult::warn_with_details(
            VALIDATOR,
            "Reaction file names disagree with source or target",
            mismatches,
        ));
    }
}
