//! Terminal transcript of a conversation.
//!
//! A terminal cannot rewrite earlier lines, so only growth of the newest
//! message is printed in place. Any other change (reload, edit, delete)
//! reprints the whole conversation.

use std::io::Write;

use ava_chat::{ConversationSnapshot, Message, MessageId, Role};
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub(super) struct Transcript {
    assistant_name: String,
    /// What has been printed so far, in order.
    shown: Vec<(MessageId, String)>,
}

impl Transcript {
    pub(super) fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
            shown: Vec::new(),
        }
    }

    fn speaker(&self, role: Role) -> &str {
        match role {
            Role::User => "You",
            Role::Assistant => &self.assistant_name,
        }
    }

    /// Text to print so the terminal shows `messages`.
    pub(super) fn render(&mut self, messages: &[Message]) -> String {
        let mut out = String::new();

        let prefix_kept = self.shown.len() <= messages.len()
            && self
                .shown
                .iter()
                .zip(messages)
                .all(|((id, text), m)| *id == m.id && m.content.starts_with(text.as_str()));
        let older_unchanged = self
            .shown
            .iter()
            .zip(messages)
            .take(self.shown.len().saturating_sub(1))
            .all(|((_, text), m)| text.len() == m.content.len());

        if !(prefix_kept && older_unchanged) {
            self.shown.clear();
            out.push_str("\n\n-- conversation --");
        }

        let n = self.shown.len();
        if n > 0 {
            let content = &messages[n - 1].content;
            let text = &mut self.shown[n - 1].1;
            if content.len() > text.len() {
                out.push_str(&content[text.len()..]);
                *text = content.clone();
            }
        }

        for (i, message) in messages.iter().enumerate().skip(n) {
            out.push_str(&format!(
                "\n[{}] {}: {}",
                i + 1,
                self.speaker(message.role),
                message.content
            ));
            self.shown
                .push((message.id.clone(), message.content.clone()));
        }
        out
    }
}

/// Print every published snapshot until the conversation is dropped.
pub(super) fn spawn(
    mut updates: watch::Receiver<ConversationSnapshot>,
    assistant_name: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut transcript = Transcript::new(assistant_name);
        loop {
            let out = transcript.render(&updates.borrow_and_update().messages);
            if !out.is_empty() {
                let mut stdout = std::io::stdout().lock();
                let _ = stdout.write_all(out.as_bytes());
                let _ = stdout.write_all(b"\n");
                let _ = stdout.flush();
            }
            if updates.changed().await.is_err() {
                break;
            }
        }
    })
}
