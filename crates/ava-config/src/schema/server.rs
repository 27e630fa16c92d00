use serde::{Deserialize, Serialize};

/// Remote message store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the backend (no trailing slash needed).
    pub base_url: String,
    /// TCP connect timeout in seconds (valid range: 1-120).
    pub connect_timeout: u32,
    /// Whole-request timeout in seconds, streamed replies included (valid range: 1-3600).
    pub request_timeout: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            connect_timeout: 10,
            request_timeout: 120,
        }
    }
}
