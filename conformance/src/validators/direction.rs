//! Beam direction validator.
//!
//! A zero or non-finite vector fails. A vector that is not of unit length
//! only warns, since MARLEY normalizes the direction before use.

use marley_config::validate::direction_violations;
use marley_config::Direction;
use serde_json::Value;

use super::decode_section;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "config/direction";

/// Allowed deviation of the direction norm from 1 before warning.
pub const UNIT_NORM_TOLERANCE: f64 = 1e-6;

/// Validates the `direction` section.
pub fn validate(document: &Value) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let direction: Direction = match decode_section(document, "direction") {
        None => return report,
        Some(Ok(d)) => d,
        Some(Err(message)) => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("direction does not decode: {message}"),
            ));
            return report;
        }
    };

    let violations = direction_violations(direction);
    if !violations.is_empty() {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Direction vector is unusable",
            violations.iter().map(ToString::to_string).collect(),
        ));
        return report;
    }
    report.push(TestResult::pass(VALIDATOR, "Direction vector is finite and non-zero"));

    let norm = direction.norm();
    match direction.normalized() {
        Some(unit) if (norm - 1.0).abs() > UNIT_NORM_TOLERANCE => {
            report.push(TestResult::warn(
                VALIDATOR,
                format!(
                    "Direction has norm {norm}; it will be used as ({:.6}, {:.6}, {:.6})",
                    unit.x, unit.y, unit.z
                ),
            ));
        }
        _ => report.push(TestResult::pass(VALIDATOR, "Direction has unit norm")),
    }

    report
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plus_z_passes_cleanly() {
        let report = validate(&json!({"direction": {"x": 0.0, "y": 0.0, "z": 1.0}}));
        assert_eq!(report.results.len(), 2);
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn long_vector_warns() {
        let report = validate(&json!({"direction": {"x": 3, "y": 4, "z": 0}}));
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 1);
        assert!(report.results[1].message.contains("(0.600000, 0.800000, 0.000000)"));
    }

    #[test]
    fn zero_vector_fails() {
        let report = validate(&json!({"direction": {"x": 0, "y": 0, "z": 0}}));
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn tiny_and_huge_vectors_only_warn() {
        let report = validate(&json!({"direction": {"x": 0, "y": 3e-200, "z": 4e-200}}));
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 1);
        assert!(report.results[1].message.contains("(0.000000, 0.600000, 0.800000)"));

        let report = validate(&json!({"direction": {"x": 1e200, "y": 0, "z": 0}}));
        assert!(report.all_passed());
        assert!(report.results[1].message.contains("(1.000000, 0.000000, 0.000000)"));
    }

    #[test]
    fn missing_component_fails_decode() {
        let report = validate(&json!({"direction": {"x": 0, "z": 1}}));
        assert_eq!(report.failure_count(), 1);
        assert!(report.results[0].message.contains("`y`"));
    }
}
