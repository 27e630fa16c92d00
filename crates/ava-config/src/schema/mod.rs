//! Configuration schema types for Ava.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod server;
mod session;
mod system;

pub use chat::*;
pub use server::*;
pub use session::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Ava.
///
/// All options have sensible defaults. Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct AvaConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_local_server() {
        let config = AvaConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.connect_timeout, 10);
        assert_eq!(config.server.request_timeout, 120);
    }

    #[test]
    fn default_config_has_session_key() {
        let config = AvaConfig::default();
        assert_eq!(config.session.token_key, "jwt_token");
        assert!(config.session.credentials_file.is_none());
    }

    #[test]
    fn default_config_has_chat_strings() {
        let config = AvaConfig::default();
        assert_eq!(config.chat.assistant_name, "Ava");
        assert!(config.chat.greeting.starts_with("Hey"));
        assert_eq!(
            config.chat.apology,
            "Sorry, there was an error processing your request."
        );
    }

    #[test]
    fn default_log_level_is_info() {
        let config = AvaConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.level.as_directive(), "info");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AvaConfig = toml::from_str(
            r#"
[chat]
assistant_name = "Nova"

[logging]
level = "DEBUG"
"#,
        )
        .unwrap();
        assert_eq!(config.chat.assistant_name, "Nova");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(
            config.chat.apology,
            "Sorry, there was an error processing your request."
        );
    }

    #[test]
    fn empty_toml_is_default() {
        let config: AvaConfig = toml::from_str("").unwrap();
        assert_eq!(config.session.token_key, "jwt_token");
    }
}
