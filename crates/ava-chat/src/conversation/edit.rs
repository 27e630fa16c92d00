//! Editing user messages in place.

use tracing::{debug, warn};

use crate::{ChatError, MessageId};

use super::manager::Conversation;
use super::types::EditOutcome;

impl Conversation {
    /// Put `id` in edit mode and seed the edit buffer with its content.
    ///
    /// Any other message leaves edit mode.
    pub fn begin_edit(&self, id: &MessageId) -> Result<(), ChatError> {
        let found = self.state.send_if_modified(|s| {
            let Some(content) = s.find(id).map(|m| m.content.clone()) else {
                return false;
            };
            for message in &mut s.messages {
                message.editing = &message.id == id;
            }
            s.edit_buffer = content;
            true
        });

        if found {
            debug!(%id, "editing message");
            Ok(())
        } else {
            Err(ChatError::NotFound(id.to_string()))
        }
    }

    /// Replace the edit buffer text.
    pub fn set_edit_buffer(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.edit_buffer = text);
    }

    /// Leave edit mode and discard the buffer. No request is made.
    pub fn cancel_edit(&self, id: &MessageId) {
        self.state.send_modify(|s| {
            if let Some(message) = s.find_mut(id) {
                message.editing = false;
            }
            s.edit_buffer.clear();
        });
    }

    /// Save the edit buffer as the new content of `id`.
    ///
    /// A blank buffer cancels the edit. On failure the message stays in
    /// edit mode with its content unchanged.
    pub async fn save_edit(&self, id: &MessageId) -> Result<EditOutcome, ChatError> {
        let content = self.state.borrow().edit_buffer.clone();
        if content.trim().is_empty() {
            self.cancel_edit(id);
            return Ok(EditOutcome::Cancelled);
        }

        if let Err(e) = self.store.update(id, &content).await {
            warn!(%id, "failed to update message: {e}");
            return Err(e);
        }

        self.state.send_modify(|s| {
            if let Some(message) = s.find_mut(id) {
                message.content = content;
                message.editing = false;
            }
            s.edit_buffer.clear();
        });
        debug!(%id, "message updated");
        Ok(EditOutcome::Saved)
    }
}
