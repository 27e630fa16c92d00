//! Top-level application state.
//!
//! Drives the route loop. The login, register and chat views take turns
//! reading stdin; each returns the route to show next.

mod auth_views;
mod chat_view;
mod commands;
mod prompt;
mod render;
mod route;

use std::sync::Arc;

use ava_chat::{AuthClient, ConversationConfig, MessageStore, Session};
use ava_common::AvaError;
use ava_config::AvaConfig;

use self::prompt::Prompt;
use self::route::Route;

/// Terminal front end for the Ava chat client.
pub struct AvaApp {
    config: AvaConfig,
    session: Session,
    auth: AuthClient,
    store: Arc<dyn MessageStore>,
    prompt: Prompt,
}

impl AvaApp {
    pub fn new(
        config: AvaConfig,
        session: Session,
        auth: AuthClient,
        store: Arc<dyn MessageStore>,
    ) -> Self {
        Self {
            config,
            session,
            auth,
            store,
            prompt: Prompt::stdin(),
        }
    }

    /// Run until the user quits or stdin closes.
    pub async fn run(&mut self) -> Result<(), AvaError> {
        let mut route = Route::Chat;
        loop {
            route = route.guard(self.session.is_authenticated());
            tracing::debug!(?route, "entering view");
            route = match route {
                Route::Login => self.login_view().await?,
                Route::Register => self.register_view().await?,
                Route::Chat => self.chat_view().await?,
                Route::Quit => return Ok(()),
            };
        }
    }

    fn conversation_config(&self) -> ConversationConfig {
        ConversationConfig {
            greeting: Some(self.config.chat.greeting.clone()),
            apology: self.config.chat.apology.clone(),
        }
    }

    /// Drop the credential after the backend rejected it.
    fn expire_session(&self) -> Route {
        tracing::info!("session invalid, returning to login");
        self.session.clear();
        println!("\nYour session has expired. Please log in again.");
        Route::Login
    }
}
