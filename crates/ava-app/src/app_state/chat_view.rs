//! The chat view: a conversation driven by typed commands.
//!
//! Sends run on their own tasks so input stays responsive while a reply
//! streams in; typing another message supersedes the pending reply.

use std::sync::Arc;

use ava_chat::{ChatError, Conversation, EditOutcome, Message, Role, SendOutcome};
use ava_common::AvaError;
use tokio::sync::mpsc;

use super::commands::{self, ChatCommand, HELP};
use super::render;
use super::route::Route;
use super::AvaApp;

type SendResult = Result<SendOutcome, ChatError>;

/// Message shown as number `index` (1-based).
fn message_at(conversation: &Conversation, index: usize) -> Option<Message> {
    conversation.messages().into_iter().nth(index.checked_sub(1)?)
}

impl AvaApp {
    pub(super) async fn chat_view(&mut self) -> Result<Route, AvaError> {
        let conversation = Arc::new(Conversation::new(
            self.store.clone(),
            self.conversation_config(),
        ));
        let renderer = render::spawn(
            conversation.subscribe(),
            self.config.chat.assistant_name.clone(),
        );

        let route = self.chat_loop(&conversation).await;

        conversation.cancel_pending();
        renderer.abort();
        route
    }

    async fn chat_loop(&mut self, conversation: &Arc<Conversation>) -> Result<Route, AvaError> {
        println!("\nType /help for commands.");
        if let Err(e) = conversation.load().await {
            if let Some(route) = self.report(e) {
                return Ok(route);
            }
        }

        let (results_tx, mut results) = mpsc::unbounded_channel::<SendResult>();
        loop {
            tokio::select! {
                line = self.prompt.next_line() => {
                    let Some(line) = line? else {
                        return Ok(Route::Quit);
                    };
                    match commands::parse(&line) {
                        Ok(command) => {
                            if let Some(route) = self.dispatch(conversation, command, &results_tx).await {
                                return Ok(route);
                            }
                        }
                        Err(problem) => println!("{problem}"),
                    }
                }
                Some(result) = results.recv() => {
                    if let Err(e) = result {
                        if let Some(route) = self.report(e) {
                            return Ok(route);
                        }
                    }
                }
            }
        }
    }

    /// Run one command. `Some(route)` leaves the chat view.
    async fn dispatch(
        &self,
        conversation: &Arc<Conversation>,
        command: ChatCommand,
        results: &mpsc::UnboundedSender<SendResult>,
    ) -> Option<Route> {
        match command {
            ChatCommand::Empty => None,
            ChatCommand::Help => {
                println!("{HELP}");
                None
            }
            ChatCommand::Send(text) => {
                let conversation = conversation.clone();
                let results = results.clone();
                tokio::spawn(async move {
                    let _ = results.send(conversation.send(text).await);
                });
                None
            }
            ChatCommand::Edit { index, text } => {
                let Some(message) = message_at(conversation, index) else {
                    println!("There is no message {index}.");
                    return None;
                };
                if message.role != Role::User {
                    println!("Only your own messages can be edited.");
                    return None;
                }
                if let Err(e) = conversation.begin_edit(&message.id) {
                    return self.report(e);
                }
                conversation.set_edit_buffer(text);
                match conversation.save_edit(&message.id).await {
                    Ok(EditOutcome::Saved) => None,
                    Ok(EditOutcome::Cancelled) => {
                        println!("Edit cancelled.");
                        None
                    }
                    Err(e) => {
                        conversation.cancel_edit(&message.id);
                        self.report(e)
                    }
                }
            }
            ChatCommand::Delete(index) => {
                let Some(message) = message_at(conversation, index) else {
                    println!("There is no message {index}.");
                    return None;
                };
                match conversation.delete(&message.id).await {
                    Ok(_) => None,
                    Err(e) => self.report(e),
                }
            }
            ChatCommand::Reload => match conversation.load().await {
                Ok(_) => None,
                Err(e) => self.report(e),
            },
            ChatCommand::Cancel => {
                if !conversation.cancel_pending() {
                    println!("No reply in progress.");
                }
                None
            }
            ChatCommand::Logout => {
                self.auth.logout();
                println!("Logged out.");
                Some(Route::Login)
            }
            ChatCommand::Quit => Some(Route::Quit),
        }
    }

    /// Show a failed operation. An invalid session leaves the chat view.
    fn report(&self, e: ChatError) -> Option<Route> {
        if e.is_session_invalid() {
            return Some(self.expire_session());
        }
        println!("Error: {e}");
        None
    }
}
