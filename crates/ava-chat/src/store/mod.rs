//! Remote message store.
//!
//! `MessageStore` is the seam between the conversation engine and the
//! backend. `HttpMessageStore` talks to the real REST API; tests plug in
//! scripted fakes.

mod api;
mod client;
mod config;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::streaming::EventStream;
use crate::{ChatError, MessageId, Role};

pub(crate) use client::{api_error, check_status, network_error};
pub use client::HttpMessageStore;
pub use config::HttpConfig;

/// Wire form of a stored message (`GET /messages` items, complete replies).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMessage {
    pub id: MessageId,
    pub content: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl RemoteMessage {
    pub fn new(id: impl Into<MessageId>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role,
            sender: None,
            timestamp: None,
        }
    }
}

/// One streamed reply fragment, decoded from a `data:` line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamChunk {
    pub id: MessageId,
    pub content: String,
}

/// Response to a create request.
pub enum CreateReply {
    /// The finished assistant reply in one JSON object.
    Complete(RemoteMessage),
    /// Incremental reply fragments.
    Stream(EventStream),
}

impl std::fmt::Debug for CreateReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateReply::Complete(message) => f.debug_tuple("Complete").field(message).finish(),
            CreateReply::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Fetch the whole conversation, oldest first.
    async fn list(&self) -> Result<Vec<RemoteMessage>, ChatError>;

    /// Store a user message and start the assistant reply.
    async fn create(&self, id: &MessageId, content: &str) -> Result<CreateReply, ChatError>;

    async fn update(&self, id: &MessageId, content: &str) -> Result<(), ChatError>;

    async fn delete(&self, id: &MessageId) -> Result<(), ChatError>;
}

#[cfg(test)]
mod tests;
