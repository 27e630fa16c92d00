//! Login and registration against the Ava backend.
//!
//! Login exchanges email and password for a bearer token (`POST /token`,
//! form encoded) and stores it in the shared `Session`. Registration creates
//! the account only; the caller logs in afterwards.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::session::Session;
use crate::store::{api_error, check_status, network_error, HttpConfig};
use crate::ChatError;

/// Account details for `POST /register`.
#[derive(Clone, Serialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// Client for the account endpoints.
pub struct AuthClient {
    config: HttpConfig,
    http: reqwest::Client,
    session: Session,
}

impl AuthClient {
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

    /// Sign in and store the issued token in the session.
    ///
    /// On failure the session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ChatError> {
        debug!("POST /token");

        let response = self
            .http
            .post(self.config.url("/token"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .map_err(network_error)?;

        // 401 here means a wrong password, not an expired session.
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("login rejected");
            return Err(ChatError::InvalidCredentials);
        }
        let response = check_status(response).await?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ChatError::ParseError(e.to_string()))?;
        if let Some(kind) = token.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                warn!(token_type = kind, "unexpected token type, using it as bearer");
            }
        }

        self.session.acquire(token.access_token);
        info!("logged in");
        Ok(())
    }

    /// Create an account.
    pub async fn register(&self, user: &NewUser) -> Result<RegisteredUser, ChatError> {
        debug!("POST /register");

        let response = self
            .http
            .post(self.config.url("/register"))
            .json(user)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let created: RegisteredUser = response
            .json()
            .await
            .map_err(|e| ChatError::ParseError(e.to_string()))?;
        info!(email = %created.email, "registered account");
        Ok(created)
    }

    /// Forget the stored token.
    pub fn logout(&self) {
        self.session.clear();
    }
}
