//! MessageStore trait implementation for HttpMessageStore.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::streaming::response_events;
use crate::{ChatError, MessageId};

use super::client::{check_status, is_json, network_error, HttpMessageStore};
use super::{CreateReply, MessageStore, RemoteMessage};

#[derive(Serialize)]
struct CreateMessageBody<'a> {
    id: &'a MessageId,
    content: &'a str,
}

#[derive(Serialize)]
struct UpdateMessageBody<'a> {
    content: &'a str,
}

#[async_trait]
impl MessageStore for HttpMessageStore {
    async fn list(&self) -> Result<Vec<RemoteMessage>, ChatError> {
        debug!("GET /messages");

        let response = self
            .request(Method::GET, "/messages")
            .send()
            .await
            .map_err(network_error)?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ChatError::ParseError(e.to_string()))
    }

    async fn create(&self, id: &MessageId, content: &str) -> Result<CreateReply, ChatError> {
        debug!(%id, "POST /messages");

        let response = self
            .request(Method::POST, "/messages")
            .json(&CreateMessageBody { id, content })
            .send()
            .await
            .map_err(network_error)?;
        let response = check_status(response).await?;

        if is_json(&response) {
            let message: RemoteMessage = response
                .json()
                .await
                .map_err(|e| ChatError::ParseError(e.to_string()))?;
            return Ok(CreateReply::Complete(message));
        }

        Ok(CreateReply::Stream(response_events(response)))
    }

    async fn update(&self, id: &MessageId, content: &str) -> Result<(), ChatError> {
        debug!("PUT /messages/{id}");

        let response = self
            .request(Method::PUT, &format!("/messages/{id}"))
            .json(&UpdateMessageBody { content })
            .send()
            .await
            .map_err(network_error)?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &MessageId) -> Result<(), ChatError> {
        debug!("DELETE /messages/{id}");

        let response = self
            .request(Method::DELETE, &format!("/messages/{id}"))
            .send()
            .await
            .map_err(network_error)?;
        check_status(response).await?;
        Ok(())
    }
}
