//! Seed validator: the seed must be a non-negative integer that fits in 64 bits.

use serde_json::Value;

use super::decode_section;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "config/seed";

/// Validates the `seed` field.
pub fn validate(document: &Value) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    match decode_section::<u64>(document, "seed") {
        None => {}
        Some(Ok(seed)) => report.push(TestResult::pass(VALIDATOR, format!("seed = {seed}"))),
        Some(Err(_)) => report.push(TestResult::fail(
            VALIDATOR,
            format!(
                "seed must be a non-negative 64-bit integer, found {}",
                document["seed"]
            ),
        )),
    }
    report
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_reference_seed() {
        let report = validate(&json!({"seed": 123456}));
        assert!(report.all_passed());
        assert_eq!(report.results[0].message, "seed = 123456");
    }

    #[test]
    fn rejects_negative_fractional_and_string_seeds() {
        for bad in [json!(-5), json!(2.5), json!("42")] {
            let report = validate(&json!({ "seed": bad }));
            assert_eq!(report.failure_count(), 1, "{bad}");
        }
    }

    #[test]
    fn absent_seed_is_left_to_structure() {
        assert!(validate(&json!({})).results.is_empty());
    }
}
