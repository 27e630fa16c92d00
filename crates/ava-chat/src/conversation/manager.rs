//! Conversation struct, state publication, load and delete.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::store::MessageStore;
use crate::{ChatError, MessageId};

use super::types::{ConversationConfig, ConversationSnapshot, Message, GREETING_ID};

/// Bookkeeping for the send whose reply is still arriving.
#[derive(Default)]
pub(super) struct PendingSend {
    pub(super) generation: u64,
    pub(super) token: Option<CancellationToken>,
}

/// Local view of one conversation, synchronized with a remote store.
pub struct Conversation {
    pub(super) store: Arc<dyn MessageStore>,
    pub(super) config: ConversationConfig,
    pub(super) state: watch::Sender<ConversationSnapshot>,
    pub(super) pending: Mutex<PendingSend>,
}

impl Conversation {
    pub fn new(store: Arc<dyn MessageStore>, config: ConversationConfig) -> Self {
        let mut initial = ConversationSnapshot::default();
        if let Some(ref greeting) = config.greeting {
            initial
                .messages
                .push(Message::assistant(GREETING_ID, greeting.clone()));
        }
        let (state, _) = watch::channel(initial);
        Self {
            store,
            config,
            state,
            pending: Mutex::new(PendingSend::default()),
        }
    }

    /// Observe every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ConversationSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        self.state.borrow().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Replace the compose field text.
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.input = text);
    }

    /// Replace the local sequence with the server's.
    ///
    /// On failure the previous sequence is kept. Returns the message count.
    pub async fn load(&self) -> Result<usize, ChatError> {
        let remote = match self.store.list().await {
            Ok(remote) => remote,
            Err(e) => {
                if e.is_session_invalid() {
                    warn!("load rejected: session invalid");
                } else {
                    warn!("failed to load messages: {e}");
                }
                return Err(e);
            }
        };

        let messages: Vec<Message> = remote.into_iter().map(Message::from).collect();
        let count = messages.len();
        self.state.send_modify(|s| {
            s.messages = messages;
            s.edit_buffer.clear();
        });
        info!(count, "conversation loaded");
        Ok(count)
    }

    /// Delete a message remotely, then reload the whole conversation.
    ///
    /// The server may remove later messages too, so nothing is spliced locally.
    pub async fn delete(&self, id: &MessageId) -> Result<usize, ChatError> {
        if let Err(e) = self.store.delete(id).await {
            warn!(%id, "failed to delete message: {e}");
            return Err(e);
        }
        debug!(%id, "message deleted, resynchronizing");
        self.load().await
    }

    /// Stop applying fragments of the in-flight reply, if any.
    pub fn cancel_pending(&self) -> bool {
        let token = self.lock_pending().token.take();
        match token {
            Some(token) => {
                token.cancel();
                self.state.send_modify(|s| s.loading = false);
                debug!("pending reply cancelled");
                true
            }
            None => false,
        }
    }

    pub(super) fn lock_pending(&self) -> MutexGuard<'_, PendingSend> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new send, cancelling the one before it.
    pub(super) fn begin_send(&self) -> (u64, CancellationToken) {
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.token.take() {
            previous.cancel();
            debug!("superseding previous reply");
        }
        pending.generation += 1;
        let token = CancellationToken::new();
        pending.token = Some(token.clone());
        (pending.generation, token)
    }

    /// Clear the loading state if `generation` is still the latest send.
    pub(super) fn finish_send(&self, generation: u64) {
        let mut pending = self.lock_pending();
        if pending.generation != generation {
            return;
        }
        pending.token = None;
        drop(pending);
        self.state.send_modify(|s| s.loading = false);
    }
}
