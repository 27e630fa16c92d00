//! HTTP message store struct, request building, and status mapping.

use reqwest::{Method, RequestBuilder, Response, StatusCode};

use crate::session::Session;
use crate::ChatError;

use super::config::HttpConfig;

/// Message store backed by the Ava REST API.
pub struct HttpMessageStore {
    pub(crate) config: HttpConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
}

impl HttpMessageStore {
    pub fn new(config: HttpConfig, session: Session) -> Result<Self, ChatError> {
        let http = config.build_client()?;
        Ok(Self {
            config,
            http,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start a request, attaching the bearer credential when signed in.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.url(path));
        match self.session.current() {
            Some(credential) => builder.bearer_auth(credential.token()),
            None => builder,
        }
    }
}

/// Map a `reqwest` send failure.
pub(crate) fn network_error(e: reqwest::Error) -> ChatError {
    ChatError::NetworkError(e.to_string())
}

/// `ApiError` carrying the status and the start of the body.
pub(crate) async fn api_error(response: Response) -> ChatError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let text = text.chars().take(200).collect::<String>();
    ChatError::ApiError(format!("HTTP {status}: {text}"))
}

/// Turn 401 into `Unauthorized` and any other non-success into `ApiError`.
pub(crate) async fn check_status(response: Response) -> Result<Response, ChatError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ChatError::Unauthorized);
    }
    if !status.is_success() {
        return Err(api_error(response).await);
    }
    Ok(response)
}

/// True when the response body is a single JSON document.
pub(crate) fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|ct| ct.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}
