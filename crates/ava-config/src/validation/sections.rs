//! Validation for the server, session, and chat sections.

use crate::schema::AvaConfig;

use super::helpers::{validate_not_blank, validate_range};

/// Validate server constraints.
pub(crate) fn validate_server(errors: &mut Vec<String>, config: &AvaConfig) {
    let url = config.server.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "server.base_url = {url:?} must start with http:// or https://"
        ));
    }
    validate_range(
        errors,
        "server.connect_timeout",
        config.server.connect_timeout,
        1,
        120,
    );
    validate_range(
        errors,
        "server.request_timeout",
        config.server.request_timeout,
        1,
        3600,
    );
}

/// Validate session constraints.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &AvaConfig) {
    validate_not_blank(errors, "session.token_key", &config.session.token_key);
    if let Some(ref file) = config.session.credentials_file {
        validate_not_blank(errors, "session.credentials_file", file);
    }
}

/// Validate chat constraints.
pub(crate) fn validate_chat(errors: &mut Vec<String>, config: &AvaConfig) {
    validate_not_blank(errors, "chat.apology", &config.chat.apology);
}
