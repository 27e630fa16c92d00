use serde::{Deserialize, Serialize};

/// Credential persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name under which the bearer token is persisted.
    pub token_key: String,
    /// Override for the credentials file. Defaults to the platform data dir.
    pub credentials_file: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: "jwt_token".into(),
            credentials_file: None,
        }
    }
}
