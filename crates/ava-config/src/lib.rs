//! Ava configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ava_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.server.base_url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AvaConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{default_config_path, default_credentials_path};

use std::path::Path;

use ava_common::ConfigError;

/// Load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<AvaConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path, or the platform default when `None`.
pub fn load_config_from(path: Option<&Path>) -> Result<AvaConfig, ConfigError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            let config = toml_loader::load_from_path(path)?;
            validation::validate(&config)?;
            Ok(config)
        }
        None => load_config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn explicit_missing_path_is_file_not_found() {
        let result = load_config_from(Some(Path::new("/tmp/nonexistent_ava_config.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn explicit_path_with_invalid_values_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"ftp://example.com\"\n").unwrap();

        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("server.base_url"));
    }

    #[test]
    fn explicit_path_loads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"https://chat.example.com\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.server.base_url, "https://chat.example.com");
        assert_eq!(config.session.token_key, "jwt_token");
    }
}
