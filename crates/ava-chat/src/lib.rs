//! Chat engine for Ava.
//!
//! Provides the client side of the Ava backend:
//! - Session handle with persisted bearer credential
//! - Remote message store (REST + streamed replies)
//! - Line-oriented SSE decoding
//! - Login and registration
//! - Conversation engine with optimistic updates and incremental replies

pub mod auth;
pub mod conversation;
pub mod session;
pub mod store;
pub mod streaming;

pub use auth::{AuthClient, NewUser, RegisteredUser};
pub use conversation::{
    Conversation, ConversationConfig, ConversationSnapshot, EditOutcome, Message, SendOutcome,
};
pub use session::{
    Credential, CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    Session,
};
pub use store::{CreateReply, HttpConfig, HttpMessageStore, MessageStore, RemoteMessage};

pub use ava_common::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The backend rejected the bearer credential (HTTP 401).
    #[error("session invalid")]
    Unauthorized,
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("message not found: {0}")]
    NotFound(String),
}

impl ChatError {
    /// True when the caller must re-authenticate before retrying.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, ChatError::Unauthorized)
    }
}
