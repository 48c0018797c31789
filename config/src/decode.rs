//! Decoding a parsed document into a [`RunConfig`].

use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::model::{RunConfig, TOP_LEVEL_FIELDS};
use crate::reader::parse_str;

impl RunConfig {
    /// Decodes a parsed document.
    ///
    /// The root must be an object holding exactly the keys in
    /// [`TOP_LEVEL_FIELDS`]. Each section is decoded separately so that
    /// errors name the section they come from. Invariants are not checked
    /// here; see [`RunConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`], [`ConfigError::UnknownField`],
    /// or [`ConfigError::Decode`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value.as_object().ok_or_else(|| ConfigError::Decode {
            field: "<root>".to_owned(),
            message: format!("expected an object, found {}", kind(value)),
        })?;
        check_top_level_keys(root)?;
        Ok(RunConfig {
            seed: section(root, "seed")?,
            target: section(root, "target")?,
            reactions: section(root, "reactions")?,
            source: section(root, "source")?,
            direction: section(root, "direction")?,
        })
    }
}

impl FromStr for RunConfig {
    type Err = ConfigError;

    /// Parses, decodes, and validates a document.
    fn from_str(source: &str) -> Result<Self> {
        let value = parse_str(source)?;
        let config = RunConfig::from_value(&value)?;
        config.validate()?;
        Ok(config)
    }
}

/// Reads, decodes, and validates a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, or any error of
/// [`RunConfig::from_str`].
pub fn load(path: impl AsRef<Path>) -> Result<RunConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read run configuration");
    let config: RunConfig = text.parse()?;
    debug!(
        seed = config.seed,
        nuclides = config.target.nuclides.len(),
        reactions = config.reactions.len(),
        source = config.source.type_tag(),
        "run configuration is valid"
    );
    Ok(config)
}

/// Checks for missing and unknown top-level keys.
///
/// # Errors
///
/// Returns the first missing key in canonical order, otherwise the first
/// unknown key in document order.
pub fn check_top_level_keys(root: &Map<String, Value>) -> Result<()> {
    if let Some(missing) = TOP_LEVEL_FIELDS.iter().find(|k| !root.contains_key(**k)) {
        return Err(ConfigError::MissingField((*missing).to_owned()));
    }
    if let Some(unknown) = root.keys().find(|k| !TOP_LEVEL_FIELDS.contains(&k.as_str())) {
        return Err(ConfigError::UnknownField(unknown.clone()));
    }
    Ok(())
}

fn section<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Result<T> {
    let value = root
        .get(key)
        .ok_or_else(|| ConfigError::MissingField(key.to_owned()))?;
    T::deserialize(value).map_err(|e| ConfigError::Decode {
        field: key.to_owned(),
        message: e.to_string(),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::SpectrumSource;

    fn base() -> Value {
        json!({
            "seed": 7,
            "target": {"nuclides": [1000180400], "atom_fractions": [1.0]},
            "reactions": ["ve40ArCC_Bhattacharya2009.react"],
            "source": {"type": "monoenergetic", "neutrino": "ve", "energy": 15},
            "direction": {"x": 0, "y": 0, "z": 1}
        })
    }

    #[test]
    fn decodes_every_section() {
        let config = RunConfig::from_value(&base()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.reactions[0].as_str(), "ve40ArCC_Bhattacharya2009.react");
        assert!(matches!(config.source, SpectrumSource::Monoenergetic(_)));
        assert_eq!(config.direction.z, 1.0);
    }

    #[test]
    fn missing_section_is_named() {
        let mut v = base();
        v.as_object_mut().unwrap().remove("direction");
        let err = RunConfig::from_value(&v).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "direction"));
    }

    #[test]
    fn unknown_section_is_named() {
        let mut v = base();
        v.as_object_mut().unwrap().insert("log".to_owned(), json!([]));
        let err = RunConfig::from_value(&v).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownField(ref f) if f == "log"));
    }

    #[test]
    fn negative_seed_is_a_seed_error() {
        let mut v = base();
        v["seed"] = json!(-1);
        let err = RunConfig::from_value(&v).unwrap_err();
        assert_eq!(err.field(), Some("seed"));
    }

    #[test]
    fn fractional_seed_is_rejected() {
        let mut v = base();
        v["seed"] = json!(1.5);
        assert_eq!(RunConfig::from_value(&v).unwrap_err().field(), Some("seed"));
    }

    #[test]
    fn source_errors_name_the_source() {
        let mut v = base();
        v["source"] = json!({"type": "fermi-dirac", "neutrino": "ve", "Emax": 60});
        let err = RunConfig::from_value(&v).unwrap_err();
        assert_eq!(err.field(), Some("source"));
        assert!(err.to_string().contains("temperature"), "{err}");
    }

    #[test]
    fn root_must_be_object() {
        let err = RunConfig::from_value(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn from_str_validates() {
        let err = "{ seed: 1, target: { nuclides: [1000180400], atom_fractions: [0.5] },
                     reactions: ['a.react'], direction: { x: 0, y: 0, z: 1 },
                     source: { type: 'monoenergetic', neutrino: 've', energy: 10 } }"
            .parse::<RunConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "target.atom_fractions"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load("/nonexistent/marley/config.js").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
