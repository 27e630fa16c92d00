//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{AvaConfig, LogLevel};
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_ava_config.toml"));
    assert!(matches!(
        result,
        Err(ava_common::ConfigError::ParseError(_))
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[server]
base_url = "https://ava.example.com"

[logging]
level = "ERROR"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.server.base_url, "https://ava.example.com");
    assert_eq!(config.logging.level, LogLevel::Error);
    // Defaults preserved
    assert_eq!(config.server.request_timeout, 120);
    assert_eq!(config.chat.assistant_name, "Ava");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(
        result,
        Err(ava_common::ConfigError::ParseError(_))
    ));
}

#[test]
fn load_config_with_invalid_values_keeps_parsed_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nconnect_timeout = 0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.server.connect_timeout, 0);
}

#[test]
fn create_default_config_writes_parseable_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    let defaults = AvaConfig::default();
    assert_eq!(config.server.base_url, defaults.server.base_url);
    assert_eq!(config.session.token_key, defaults.session.token_key);
}

#[test]
fn default_paths_live_under_ava() {
    let config = default_config_path().unwrap();
    assert_eq!(config.file_name().unwrap(), "config.toml");
    assert!(config.parent().unwrap().ends_with("ava"));

    let creds = default_credentials_path().unwrap();
    assert_eq!(creds.file_name().unwrap(), "credentials.json");
    assert!(creds.parent().unwrap().ends_with("ava"));
}
