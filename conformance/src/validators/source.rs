//! Neutrino source validator.
//!
//! The `type` tag selects which fields are required, so the tag is checked
//! on its own before the type-specific decode. Physical constraints (energy
//! ordering, positive temperature, monotonic grids) are checked last.

use marley_config::validate::source_violations;
use marley_config::SpectrumSource;
use serde_json::Value;

use super::decode_section;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "config/source";

/// Accepted short aliases and the types they stand for.
const ALIASES: &[(&str, &str)] = &[("fd", "fermi-dirac"), ("bf", "beta-fit")];

/// Validates the `source` section.
pub fn validate(document: &Value) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let Some(raw) = document.get("source") else {
        return report;
    };
    let Some(raw) = raw.as_object() else {
        report.push(TestResult::fail(VALIDATOR, "source must be an object"));
        return report;
    };

    match raw.get("type").map(|t| t.as_str()) {
        None => {
            report.push(TestResult::fail(VALIDATOR, "source is missing its `type`"));
            return report;
        }
        Some(None) => {
            report.push(TestResult::fail(VALIDATOR, "source `type` must be a string"));
            return report;
        }
        Some(Some(tag)) if !is_known_type(tag) => {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("Unknown source type `{tag}`"),
                SpectrumSource::TYPES.iter().map(|t| (*t).to_owned()).collect(),
            ));
            return report;
        }
        Some(Some(_)) => {}
    }

    let source: SpectrumSource = match decode_section(document, "source") {
        None => return report,
        Some(Ok(s)) => s,
        Some(Err(message)) => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("source does not decode: {message}"),
            ));
            return report;
        }
    };
    report.push(TestResult::pass(
        VALIDATOR,
        format!(
            "{} source of {} has all required fields",
            source.type_tag(),
            source.neutrino()
        ),
    ));

    let violations = source_violations(&source);
    if violations.is_empty() {
        let (lo, hi) = source.energy_range();
        report.push(TestResult::pass(
            VALIDATOR,
            format!("Spectrum parameters are physical over [{lo}, {hi}] MeV"),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Spectrum parameters are not physical",
            violations.iter().map(ToString::to_string).collect(),
        ));
    }

    report
}

fn is_known_type(tag: &str) -> bool {
    SpectrumSource::TYPES.contains(&tag) || ALIASES.iter().any(|(alias, _)| *alias == tag)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fermi_dirac() -> Value {
        json!({"source": {
            "type": "fermi-dirac", "neutrino": "ve",
            "Emin": 0, "Emax": 60, "temperature": 3.5, "eta": 0
        }})
    }

    #[test]
    fn reference_spectrum_passes() {
        let report = validate(&fermi_dirac());
        assert!(report.all_passed());
        assert_eq!(report.results.len(), 2);
        assert_eq!(
            report.results[1].message,
            "Spectrum parameters are physical over [0, 60] MeV"
        );
    }

    #[test]
    fn unknown_type_lists_known_types() {
        let mut doc = fermi_dirac();
        doc["source"]["type"] = json!("maxwell");
        let report = validate(&doc);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.results[0].details.len(), SpectrumSource::TYPES.len());
    }

    #[test]
    fn missing_type_fails() {
        let mut doc = fermi_dirac();
        doc["source"].as_object_mut().unwrap().remove("type");
        let report = validate(&doc);
        assert!(report.results[0].message.contains("missing its `type`"));
    }

    #[test]
    fn non_object_source_fails() {
        for raw in [json!(5), json!("fermi-dirac"), json!([{"type": "fd"}])] {
            let report = validate(&json!({ "source": raw }));
            assert_eq!(report.results.len(), 1);
            assert_eq!(report.failure_count(), 1);
            assert_eq!(report.results[0].message, "source must be an object");
        }
    }

    #[test]
    fn alias_is_accepted() {
        let mut doc = fermi_dirac();
        doc["source"]["type"] = json!("fd");
        assert!(validate(&doc).all_passed());
    }

    #[test]
    fn type_specific_field_missing() {
        let doc = json!({"source": {"type": "beta-fit", "neutrino": "vebar", "Emax": 50}});
        let report = validate(&doc);
        assert_eq!(report.failure_count(), 1);
        assert!(report.results[0].message.contains("Emean"));
    }

    #[test]
    fn inverted_window_fails_physics() {
        let mut doc = fermi_dirac();
        doc["source"]["Emin"] = json!(70);
        let report = validate(&doc);
        assert_eq!(report.failure_count(), 1);
        assert!(report.results[1].details[0].starts_with("source.Emax"));
    }

    #[test]
    fn non_positive_temperature_fails() {
        let mut doc = fermi_dirac();
        doc["source"]["temperature"] = json!(0);
        let report = validate(&doc);
        assert_eq!(report.failure_count(), 1);
        assert!(report.results[1].details[0].starts_with("source.temperature"));
    }
}
