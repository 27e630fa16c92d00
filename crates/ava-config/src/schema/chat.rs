use serde::{Deserialize, Serialize};

/// Conversation view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Display name of the assistant.
    pub assistant_name: String,
    /// Greeting shown before the history has been loaded.
    pub greeting: String,
    /// Reply appended when a send fails before the assistant answered.
    pub apology: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_name: "Ava".into(),
            greeting: "Hey👋, I'm Ava\nAsk me anything or pick a place to start".into(),
            apology: "Sorry, there was an error processing your request.".into(),
        }
    }
}
