//! Conversation engine.
//!
//! A `Conversation` owns the ordered message list of one chat and keeps it
//! in sync with a `MessageStore`. State lives in a `tokio::sync::watch`
//! channel: every mutation is applied atomically and published as a fresh
//! `ConversationSnapshot`, so observers never see a half-applied update.

mod edit;
mod manager;
mod send;
mod types;


pub use manager::Conversation;
pub use types::{ConversationConfig, ConversationSnapshot, EditOutcome, Message, SendOutcome};
