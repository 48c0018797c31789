//! End-to-end conformance runs over files on disk.

use std::fs;

use marley_conformance::{run_all, CheckOptions, Severity};
use tempfile::tempdir;

const SUPERNOVA: &str = include_str!("../../config/data/supernova_ve40ar.js");

#[test]
fn unreadable_file_is_an_error() {
    let options = CheckOptions {
        config: "/nonexistent/marley_config.js".into(),
        marley_home: None,
    };
    assert!(run_all(&options).is_err());
}

#[test]
fn reaction_files_checked_against_marley_home() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("marley_config.js");
    fs::write(&config, SUPERNOVA).unwrap();
    let home = tempdir().unwrap();

    let options = CheckOptions {
        config: config.clone(),
        marley_home: Some(home.path().to_path_buf()),
    };
    let report = run_all(&options).unwrap();
    let failed: Vec<_> = report.results.iter().filter(|r| r.is_failure()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].validator, "config/reactions");
    assert_eq!(failed[0].details, ["ve40ArCC_Bhattacharya2009.react"]);

    let react = home.path().join("data").join("react");
    fs::create_dir_all(&react).unwrap();
    fs::write(react.join("ve40ArCC_Bhattacharya2009.react"), "").unwrap();
    let report = run_all(&options).unwrap();
    assert!(report.all_passed());
}

#[test]
fn every_section_reports_on_the_reference_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("marley_config.js");
    fs::write(&config, SUPERNOVA).unwrap();

    let report = run_all(&CheckOptions {
        config,
        marley_home: None,
    })
    .unwrap();
    for validator in [
        "config/structure",
        "config/seed",
        "config/target",
        "config/reactions",
        "config/source",
        "config/direction",
    ] {
        assert!(
            report
                .by_validator(validator)
                .any(|r| r.severity == Severity::Pass),
            "{validator} did not report a pass"
        );
    }
}

#[test]
fn extra_top_level_field_fails_structure() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("marley_config.js");
    fs::write(&config, SUPERNOVA.replace("seed: 123456,", "seed: 123456,\n  log: [],")).unwrap();

    let report = run_all(&CheckOptions {
        config,
        marley_home: None,
    })
    .unwrap();
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.results[2].details, ["`log`"]);
}
