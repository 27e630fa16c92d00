//! Sending user messages and ingesting the assistant reply.

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::store::{CreateReply, StreamChunk};
use crate::streaming::EventStream;
use crate::{ChatError, MessageId};

use super::manager::Conversation;
use super::types::{Message, SendOutcome};

impl Conversation {
    /// Send the current compose field text.
    pub async fn submit(&self) -> Result<SendOutcome, ChatError> {
        let text = self.state.borrow().input.clone();
        self.send(text).await
    }

    /// Append a user message and fetch the assistant reply.
    ///
    /// The user message is appended, and the compose field cleared, before
    /// the request leaves. A streamed reply grows one assistant message,
    /// publishing a snapshot per fragment. If the request fails before any
    /// fragment arrives, the configured apology is appended and the error is
    /// still returned. `ChatError::Unauthorized` means the session is invalid.
    pub async fn send(&self, text: impl Into<String>) -> Result<SendOutcome, ChatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Ok(SendOutcome::Skipped);
        }

        let user_id = MessageId::new();
        let (generation, token) = self.begin_send();
        self.state.send_modify(|s| {
            s.messages.push(Message::user(user_id.clone(), text.clone()));
            s.input.clear();
            s.loading = true;
        });
        debug!(id = %user_id, "user message appended");

        let result = self.exchange(&user_id, &text, &token).await;
        self.finish_send(generation);
        result
    }

    async fn exchange(
        &self,
        user_id: &MessageId,
        text: &str,
        token: &CancellationToken,
    ) -> Result<SendOutcome, ChatError> {
        let reply = tokio::select! {
            biased;
            _ = token.cancelled() => {
                return Ok(SendOutcome::Cancelled { user_id: user_id.clone() });
            }
            reply = self.store.create(user_id, text) => reply,
        };

        match reply {
            Ok(CreateReply::Complete(remote)) => {
                let assistant_id = remote.id.clone();
                self.upsert_reply(Message::from(remote));
                Ok(SendOutcome::Replied {
                    user_id: user_id.clone(),
                    assistant_id,
                })
            }
            Ok(CreateReply::Stream(events)) => self.ingest(user_id, events, token).await,
            Err(ChatError::Unauthorized) => {
                warn!("send rejected: session invalid");
                Err(ChatError::Unauthorized)
            }
            Err(e) => {
                warn!("failed to send message: {e}");
                self.push_apology();
                Err(e)
            }
        }
    }

    async fn ingest(
        &self,
        user_id: &MessageId,
        mut events: EventStream,
        token: &CancellationToken,
    ) -> Result<SendOutcome, ChatError> {
        let mut assistant_id: Option<MessageId> = None;

        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("reply stream superseded");
                    return Ok(SendOutcome::Cancelled { user_id: user_id.clone() });
                }
                next = events.next() => next,
            };

            let event = match next {
                None => break,
                Some(Ok(event)) => event,
                Some(Err(e)) => {
                    warn!("reply stream failed: {e}");
                    if assistant_id.is_none() {
                        self.push_apology();
                    }
                    return Err(e);
                }
            };

            let chunk: StreamChunk = match serde_json::from_str(&event.data) {
                Ok(chunk) => chunk,
                Err(e) => {
                    debug!("dropping malformed fragment: {e}");
                    continue;
                }
            };

            if let Some(ref id) = assistant_id {
                if *id != chunk.id {
                    debug!(expected = %id, got = %chunk.id, "dropping fragment for another reply");
                    continue;
                }
            } else {
                assistant_id = Some(chunk.id.clone());
            }

            // Cancelled while the fragment was in flight.
            if token.is_cancelled() {
                debug!("reply stream superseded");
                return Ok(SendOutcome::Cancelled {
                    user_id: user_id.clone(),
                });
            }
            self.append_fragment(chunk);
        }

        Ok(match assistant_id {
            Some(assistant_id) => SendOutcome::Replied {
                user_id: user_id.clone(),
                assistant_id,
            },
            None => SendOutcome::NoReply {
                user_id: user_id.clone(),
            },
        })
    }

    /// Extend the reply with one fragment, creating it on the first one.
    fn append_fragment(&self, chunk: StreamChunk) {
        self.state.send_modify(|s| match s.find_mut(&chunk.id) {
            Some(message) => message.content.push_str(&chunk.content),
            None => s
                .messages
                .push(Message::assistant(chunk.id, chunk.content)),
        });
    }

    fn upsert_reply(&self, reply: Message) {
        self.state.send_modify(|s| match s.find_mut(&reply.id) {
            Some(message) => *message = reply,
            None => s.messages.push(reply),
        });
    }

    fn push_apology(&self) {
        let apology = Message::assistant(MessageId::new(), self.config.apology.clone());
        self.state.send_modify(|s| s.messages.push(apology));
    }
}
