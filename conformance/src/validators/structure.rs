//! Document structure validator.
//!
//! Verifies that the file is well-formed in the relaxed JSON dialect, that
//! its root is an object, and that it holds exactly the five top-level
//! fields `seed`, `target`, `reactions`, `source`, and `direction`.

use marley_config::{parse_str, ConfigError, TOP_LEVEL_FIELDS};
use serde_json::Value;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "config/structure";

/// Parses the document, recording the outcome in `report`.
///
/// Returns `None` if the document is not well-formed.
pub fn parse(text: &str, report: &mut ConformanceReport) -> Option<Value> {
    match parse_str(text) {
        Ok(value) => {
            report.push(TestResult::pass(VALIDATOR, "Document is well-formed"));
            Some(value)
        }
        Err(ConfigError::Syntax {
            line,
            column,
            message,
        }) => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("Syntax error at line {line}, column {column}: {message}"),
            ));
            None
        }
        Err(other) => {
            report.push(TestResult::fail(VALIDATOR, other.to_string()));
            None
        }
    }
}

/// Validates the root object and its key set.
///
/// Returns the report and whether section validators can proceed.
pub fn validate(document: &Value) -> (ConformanceReport, bool) {
    let mut report = ConformanceReport::new();

    let Some(root) = document.as_object() else {
        report.push(TestResult::fail(
            VALIDATOR,
            "Document root must be an object",
        ));
        return (report, false);
    };

    let missing: Vec<String> = TOP_LEVEL_FIELDS
        .iter()
        .filter(|k| !root.contains_key(**k))
        .map(|k| format!("`{k}`"))
        .collect();
    if missing.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            "All required top-level fields present",
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Missing required top-level fields",
            missing,
        ));
    }

    let unknown: Vec<String> = root
        .keys()
        .filter(|k| !TOP_LEVEL_FIELDS.contains(&k.as_str()))
        .map(|k| format!("`{k}`"))
        .collect();
    if unknown.is_empty() {
        report.push(TestResult::pass(VALIDATOR, "No unknown top-level fields"));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Unknown top-level fields",
            unknown,
        ));
    }

    (report, true)
}
