//! Configuration Module Tests
//!
//! Tests for ConsolidatorConfig defaults and file-based loading.

use debt_consolidator::{ConsolidatorConfig, ConsolidatorError};
use std::io::Write;
use std::path::PathBuf;

fn config_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn config_has_expected_defaults() {
    let config = ConsolidatorConfig::default();

    assert_eq!(config.worker_count, 6);
    assert_eq!(config.input_path, PathBuf::from("1.json"));
    assert!(config.log_filter.is_none());
}

#[test]
fn config_loads_from_toml_file() {
    let file = config_file(
        ".toml",
        "worker_count = 12\ninput_path = \"debts.jsonl\"\nlog_filter = \"info\"\n",
    );

    let config = ConsolidatorConfig::load(Some(file.path())).expect("config should load");
    assert_eq!(config.worker_count, 12);
    assert_eq!(config.input_path, PathBuf::from("debts.jsonl"));
    assert_eq!(config.log_filter.as_deref(), Some("info"));
}

#[test]
fn partial_file_keeps_defaults() {
    let file = config_file(".json", r#"{"worker_count": 3}"#);

    let config = ConsolidatorConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.worker_count, 3);
    assert_eq!(config.input_path, PathBuf::from("1.json"));
}

#[test]
fn zero_workers_in_file_rejected() {
    let file = config_file(".toml", "worker_count = 0\n");

    let err = ConsolidatorConfig::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConsolidatorError::Configuration(_)));
}

#[test]
fn override_repairs_invalid_file_value() {
    let file = config_file(".toml", "worker_count = 0\n");

    let config = ConsolidatorConfig::load_unvalidated(Some(file.path()))
        .expect("layering alone should not validate");
    assert_eq!(config.worker_count, 0);
    assert!(config.validate().is_err());

    let config = config.with_worker_count(4);
    assert!(config.validate().is_ok());
    assert_eq!(config.worker_count, 4);
}

#[test]
fn missing_config_file_rejected_before_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = ConsolidatorConfig::load_unvalidated(Some(&path)).unwrap_err();
    assert!(matches!(err, ConsolidatorError::Configuration(_)));
}

#[test]
fn missing_config_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = ConsolidatorConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConsolidatorError::Configuration(_)));
}
