//! File-based loading tests.

use std::fs;

use marley_config::{load, ConfigError, SpectrumSource};
use tempfile::tempdir;

const SUPERNOVA: &str = include_str!("../data/supernova_ve40ar.js");

#[test]
fn loads_reference_supernova_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("marley_config.js");
    fs::write(&path, SUPERNOVA).unwrap();

    let config = load(&path).unwrap();
    assert_eq!(config.seed, 123_456);
    assert_eq!(config.target.nuclides.len(), config.target.atom_fractions.len());
    assert!((config.target.fraction_sum() - 1.0).abs() < 1e-9);
    assert!(!config.reactions.is_empty());
    assert!((config.direction.norm() - 1.0).abs() < 1e-12);
    let SpectrumSource::FermiDirac(fd) = &config.source else {
        panic!("expected a Fermi-Dirac source");
    };
    assert!(fd.e_min < fd.e_max);
    assert_eq!((fd.e_min, fd.e_max), (0.0, 60.0));
    assert!(fd.temperature > 0.0);
    assert_eq!(fd.temperature, 3.5);
}

#[test]
fn syntax_errors_carry_position() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.js");
    fs::write(&path, SUPERNOVA.replace("seed: 123456,", "seed: 123456")).unwrap();

    match load(&path).unwrap_err() {
        ConfigError::Syntax { line, .. } => assert_eq!(line, 6),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn invalid_temperature_names_the_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cold.js");
    fs::write(&path, SUPERNOVA.replace("temperature: 3.5", "temperature: -1")).unwrap();

    let err = load(&path).unwrap_err();
    assert_eq!(err.field(), Some("source.temperature"));
}

#[test]
fn unknown_source_type_is_a_decode_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mystery.js");
    fs::write(&path, SUPERNOVA.replace("\"fermi-dirac\"", "\"maxwellian\"")).unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Decode { ref field, .. } if field == "source"));
    assert!(err.to_string().contains("maxwellian"), "{err}");
}
