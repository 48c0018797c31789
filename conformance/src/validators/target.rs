//! Target composition validator.
//!
//! Verifies that:
//! - every nuclide is a valid `10LZZZAAAI` ground-state code
//! - `nuclides` and `atom_fractions` have equal, non-zero length
//! - fractions are non-negative and sum to 1 within tolerance
//! - no nuclide is listed twice

use marley_config::validate::target_violations;
use marley_config::Target;
use serde_json::Value;

use super::decode_section;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "config/target";

/// Validates the `target` section.
pub fn validate(document: &Value) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let target: Target = match decode_section(document, "target") {
        None => return report,
        Some(Ok(t)) => t,
        Some(Err(message)) => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("target does not decode: {message}"),
            ));
            return report;
        }
    };

    let violations = target_violations(&target);
    if violations.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("Composition {} is normalized", composition(&target)),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Target composition is invalid",
            violations.iter().map(ToString::to_string).collect(),
        ));
    }

    let unused: Vec<String> = target
        .components()
        .filter(|(_, f)| *f == 0.0)
        .map(|(n, _)| n.to_string())
        .collect();
    if !unused.is_empty() {
        report.push(TestResult::warn_with_details(
            VALIDATOR,
            "Nuclides with zero atom fraction never interact",
            unused,
        ));
    }

    report
}

fn composition(target: &Target) -> String {
    target
        .components()
        .map(|(n, f)| format!("{n}:{f}"))
        .collect::<Vec<_>>()
        .join(" ")
}
