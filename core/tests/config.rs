//! Configuration loading from JSON files.

use churnboard_core::{
    config::{DashConfig, DEFAULT_DATA_PATH},
    error::DashError,
};
use std::io::Write;

fn write_config(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A partial file keeps defaults for everything it omits.
#[test]
fn partial_file_loads_with_defaults() {
    let file = write_config(r#"{ "data_path": "scores.csv", "detail_divisor": 3.0 }"#);
    let config = DashConfig::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.data_path, "scores.csv");
    assert_eq!(config.detail_divisor, 3.0);
    assert_eq!(config.overview_divisor, 2.0);
    assert_eq!(config.top_n, 10);
}

/// An empty object is the default config.
#[test]
fn empty_object_is_default() {
    let file = write_config("{}");
    let config = DashConfig::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config, DashConfig::default());
    assert_eq!(config.data_path, DEFAULT_DATA_PATH);
}

/// Invalid values are rejected at load time.
#[test]
fn invalid_values_fail_load() {
    for bad in [
        r#"{ "overview_divisor": 0 }"#,
        r#"{ "detail_divisor": -2.5 }"#,
        r#"{ "top_n": 0 }"#,
        r#"{ "bands": { "very_high": 1.5 } }"#,
    ] {
        let file = write_config(bad);
        assert!(
            DashConfig::load(file.path().to_str().unwrap()).is_err(),
            "config should be rejected: {bad}"
        );
    }
}

/// A missing file is an error that names the path.
#[test]
fn missing_file_names_path() {
    let err = DashConfig::load("/nonexistent/dashboard.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/dashboard.json"), "got: {err}");
}

/// Malformed JSON surfaces as a typed parse error.
#[test]
fn malformed_json_is_a_json_error() {
    let file = write_config(r#"{ "top_n": "#);
    let err = DashConfig::load(file.path().to_str().unwrap()).unwrap_err();
    assert!(
        matches!(err.downcast_ref::<DashError>(), Some(DashError::Json(_))),
        "got: {err:?}"
    );
}
