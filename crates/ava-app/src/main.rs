mod app_state;
mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use ava_chat::{AuthClient, ChatError, FileCredentialStore, HttpConfig, HttpMessageStore, Session};
use ava_common::AvaError;
use ava_config::schema::{LogLevel, ServerConfig};
use ava_config::AvaConfig;
use tracing_subscriber::EnvFilter;

use crate::app_state::AvaApp;

/// Filter used when `RUST_LOG` is unset: the CLI override, else the config level.
fn log_directive(cli_override: Option<&str>, level: LogLevel) -> String {
    match cli_override {
        Some(directive) => directive.to_string(),
        None => format!("ava={}", level.as_directive()),
    }
}

fn init_logging(cli_override: Option<&str>, level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(cli_override, level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn http_config(server: &ServerConfig) -> HttpConfig {
    HttpConfig::new(server.base_url.clone())
        .with_connect_timeout(Duration::from_secs(u64::from(server.connect_timeout)))
        .with_request_timeout(Duration::from_secs(u64::from(server.request_timeout)))
}

fn credentials_path(config: &AvaConfig) -> Result<PathBuf, AvaError> {
    match config.session.credentials_file {
        Some(ref path) => Ok(PathBuf::from(path)),
        None => Ok(ava_config::default_credentials_path()?),
    }
}

fn chat_error(e: ChatError) -> AvaError {
    AvaError::Chat(e.to_string())
}

async fn run(config: AvaConfig) -> ava_common::Result<()> {
    let path = credentials_path(&config)?;
    tracing::debug!("Credentials file: {}", path.display());
    let session = Session::new(FileCredentialStore::new(path), config.session.token_key.clone());

    let http = http_config(&config.server);
    let store = HttpMessageStore::new(http.clone(), session.clone()).map_err(chat_error)?;
    let auth = AuthClient::new(http, session.clone()).map_err(chat_error)?;

    let mut app = AvaApp::new(config, session, auth, Arc::new(store));
    app.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let args = cli::parse();

    // Config first, so its log level can seed the filter
    let loaded = ava_config::load_config_from(args.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), level);

    tracing::info!("Ava v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AvaConfig::default()
    });
    if let Some(server) = args.server {
        tracing::info!("Using server override: {server}");
        config.server.base_url = server;
    }
    tracing::info!("Config loaded (server: {})", config.server.base_url);

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("ava: {e}");
            ExitCode::FAILURE
        }
    }
}
