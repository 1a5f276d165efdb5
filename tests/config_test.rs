//! Tests for loading the TOML configuration.

use fivetoe::{AppConfig, Mark};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = AppConfig::load(dir.path().join("absent.toml")).expect("defaults");

    assert_eq!(config, AppConfig::default());
    assert_eq!(*config.starting_mark(), Mark::X);
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.session_cookie(), "fivetoe_session");
    assert_eq!(*config.session_ttl_secs(), 24 * 60 * 60);
    assert_eq!(*config.max_sessions(), 10_000);
}

#[test]
fn test_parses_all_fields() {
    let file = config_file(
        r#"
starting_mark = "O"
host = "0.0.0.0"
port = 8080
session_cookie = "ttt"
session_ttl_secs = 600
max_sessions = 50
"#,
    );

    let config = AppConfig::load(file.path()).expect("valid config");
    assert_eq!(*config.starting_mark(), Mark::O);
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 8080);
    assert_eq!(config.session_cookie(), "ttt");
    assert_eq!(*config.session_ttl_secs(), 600);
    assert_eq!(*config.max_sessions(), 50);
}

#[test]
fn test_partial_file_fills_defaults() {
    let file = config_file("port = 4000\n");

    let config = AppConfig::from_file(file.path()).expect("valid config");
    assert_eq!(*config.port(), 4000);
    assert_eq!(*config.starting_mark(), Mark::X);
    assert_eq!(config.session_cookie(), "fivetoe_session");
}

#[test]
fn test_malformed_toml_is_an_error() {
    let file = config_file("port = \"not a number\"\n");

    let err = AppConfig::from_file(file.path()).expect_err("bad port");
    assert!(err.message.starts_with("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_unknown_mark_is_an_error() {
    let file = config_file("starting_mark = \"Z\"\n");
    assert!(AppConfig::from_file(file.path()).is_err());
}

#[test]
fn test_bad_cookie_name_is_an_error() {
    for name in ["", "has space", "semi;colon"] {
        let file = config_file(&format!("session_cookie = {:?}\n", name));
        let err = AppConfig::from_file(file.path()).expect_err("bad cookie name");
        assert!(err.message.contains("Invalid session cookie name"));
    }
}

#[test]
fn test_missing_file_is_an_error_for_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(AppConfig::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_zero_session_capacity_is_an_error() {
    let file = config_file("max_sessions = 0\n");
    let err = AppConfig::from_file(file.path()).expect_err("zero capacity");
    assert!(err.message.contains("max_sessions"));
}
