//! Conversation data types.

use crate::store::RemoteMessage;
use crate::{MessageId, Role};

/// Id of the greeting shown before the history is loaded.
pub(crate) const GREETING_ID: &str = "0";

/// A message as held by the conversation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Transient UI flag; at most one message is being edited.
    pub editing: bool,
}

impl Message {
    pub fn user(id: impl Into<MessageId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            editing: false,
        }
    }

    pub fn assistant(id: impl Into<MessageId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: content.into(),
            editing: false,
        }
    }
}

impl From<RemoteMessage> for Message {
    fn from(remote: RemoteMessage) -> Self {
        Self {
            id: remote.id,
            role: remote.role,
            content: remote.content,
            editing: false,
        }
    }
}

/// Published state of a conversation.
#[derive(Debug, Clone, Default)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    /// Text of the compose field.
    pub input: String,
    /// Text of the edit field for the message in edit mode.
    pub edit_buffer: String,
    /// True while the most recent send is awaiting its reply.
    pub loading: bool,
}

impl ConversationSnapshot {
    pub fn find(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| &m.id == id)
    }

    /// The message currently in edit mode, if any.
    pub fn editing(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.editing)
    }
}

/// Engine settings.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// Assistant message shown until the first load.
    pub greeting: Option<String>,
    /// Assistant message appended when a send fails before any reply.
    pub apology: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            greeting: Some("Hey👋, I'm Ava\nAsk me anything or pick a place to start".into()),
            apology: "Sorry, there was an error processing your request.".into(),
        }
    }
}

/// How a send ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty or whitespace; nothing happened.
    Skipped,
    /// The assistant reply is complete.
    Replied {
        user_id: MessageId,
        assistant_id: MessageId,
    },
    /// The reply stream ended without a usable fragment.
    NoReply { user_id: MessageId },
    /// A newer send (or `cancel_pending`) superseded this one.
    Cancelled { user_id: MessageId },
}

/// How saving an edit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    /// The buffer was blank, so the edit was discarded.
    Cancelled,
}
