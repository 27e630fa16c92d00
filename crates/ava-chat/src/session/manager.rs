//! Session handle and credential type.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::credentials::{CredentialStore, MemoryCredentialStore};

const DEFAULT_TOKEN_KEY: &str = "jwt_token";

/// Bearer credential of the signed-in user.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

enum SessionState {
    /// Persistence has not been read yet.
    Unloaded,
    Loaded(Option<Credential>),
}

struct SessionInner {
    key: String,
    store: Box<dyn CredentialStore>,
    state: Mutex<SessionState>,
}

/// Shared handle to the current credential.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("key", &self.inner.key)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Create a session persisted in `store` under `key`.
    ///
    /// Nothing is read until the first `current()` or an explicit `refresh()`.
    pub fn new(store: impl CredentialStore + 'static, key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                key: key.into(),
                store: Box::new(store),
                state: Mutex::new(SessionState::Unloaded),
            }),
        }
    }

    /// Session backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(MemoryCredentialStore::new(), DEFAULT_TOKEN_KEY)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_persisted(&self) -> Option<Credential> {
        match self.inner.store.get(&self.inner.key) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(Credential::new),
            Err(e) => {
                warn!(key = %self.inner.key, "failed to read persisted credential: {e}");
                None
            }
        }
    }

    /// The current credential, if signed in.
    pub fn current(&self) -> Option<Credential> {
        let mut state = self.lock();
        match &*state {
            SessionState::Loaded(credential) => credential.clone(),
            SessionState::Unloaded => {
                let credential = self.read_persisted();
                debug!(
                    authenticated = credential.is_some(),
                    "session initialized from persistence"
                );
                *state = SessionState::Loaded(credential.clone());
                credential
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Store a freshly issued token. Subsequent requests carry it.
    pub fn acquire(&self, token: impl Into<String>) {
        let credential = Credential::new(token);
        if let Err(e) = self.inner.store.set(&self.inner.key, credential.token()) {
            warn!(key = %self.inner.key, "failed to persist credential: {e}");
        }
        *self.lock() = SessionState::Loaded(Some(credential));
        info!("session acquired");
    }

    /// Forget the credential. Subsequent requests are unauthenticated.
    pub fn clear(&self) {
        if let Err(e) = self.inner.store.remove(&self.inner.key) {
            warn!(key = %self.inner.key, "failed to remove persisted credential: {e}");
        }
        *self.lock() = SessionState::Loaded(None);
        info!("session cleared");
    }

    /// Re-read the credential from persistence, replacing the in-memory copy.
    pub fn refresh(&self) -> Option<Credential> {
        let credential = self.read_persisted();
        *self.lock() = SessionState::Loaded(credential.clone());
        credential
    }
}
