//! Tests for the wire types and the HTTP message store.

use futures_util::StreamExt;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use super::*;
use crate::session::Session;

// -- wire types ---------------------------------------------------------------

#[test]
fn remote_message_decodes_backend_shape() {
    let json = r#"{
        "id": "5f0c",
        "content": "hi",
        "role": "assistant",
        "sender": "9a1b",
        "timestamp": "2024-05-01T10:00:00.123456"
    }"#;
    let message: RemoteMessage = serde_json::from_str(json).unwrap();
    assert_eq!(message.id, "5f0c");
    assert_eq!(message.role, Role::Assistant);
    assert_eq!(message.sender.as_deref(), Some("9a1b"));
}

#[test]
fn remote_message_sender_and_timestamp_are_optional() {
    let message: RemoteMessage =
        serde_json::from_str(r#"{"id":"1","role":"assistant","content":"hi"}"#).unwrap();
    assert_eq!(message, RemoteMessage::new("1", Role::Assistant, "hi"));
}

#[test]
fn stream_chunk_ignores_extra_fields() {
    let chunk: StreamChunk =
        serde_json::from_str(r#"{"id":"a","content":"He","role":"assistant"}"#).unwrap();
    assert_eq!(chunk.id, "a");
    assert_eq!(chunk.content, "He");
}

#[test]
fn stream_chunk_requires_id() {
    assert!(serde_json::from_str::<StreamChunk>(r#"{"content":"He"}"#).is_err());
}

// -- HTTP store ---------------------------------------------------------------

fn store_for(server: &ServerGuard, session: Session) -> HttpMessageStore {
    HttpMessageStore::new(HttpConfig::new(server.url()), session).unwrap()
}

fn signed_in() -> Session {
    let session = Session::in_memory();
    session.acquire("abc");
    session
}

#[tokio::test]
async fn list_sends_bearer_and_decodes_messages() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/messages")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":"1","role":"assistant","content":"hi","sender":"s","timestamp":"t"}]"#)
        .create_async()
        .await;
    let store = store_for(&server, signed_in());

    let messages = store.list().await.unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, "1");
    assert_eq!(messages[0].content, "hi");
    mock.assert_async().await;
}

#[tokio::test]
async fn authorization_is_omitted_after_clear() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/messages")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
    let session = signed_in();
    let store = store_for(&server, session.clone());

    session.clear();
    assert!(store.list().await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_on_list_create_and_delete() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/messages")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/messages")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("DELETE", "/messages/u1")
        .with_status(401)
        .create_async()
        .await;
    let store = store_for(&server, signed_in());

    assert!(matches!(store.list().await, Err(ChatError::Unauthorized)));
    assert!(matches!(
        store.create(&MessageId::from("u1"), "hello").await,
        Err(ChatError::Unauthorized)
    ));
    assert!(matches!(
        store.delete(&MessageId::from("u1")).await,
        Err(ChatError::Unauthorized)
    ));
}

#[tokio::test]
async fn server_error_carries_status_and_body_excerpt() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/messages")
        .with_status(500)
        .with_body("x".repeat(500))
        .create_async()
        .await;
    let store = store_for(&server, signed_in());

    let Err(ChatError::ApiError(message)) = store.list().await else {
        panic!("expected ApiError");
    };
    assert!(message.starts_with("HTTP 500"));
    assert_eq!(message.chars().filter(|c| *c == 'x').count(), 200);
}

#[tokio::test]
async fn create_posts_id_and_content_and_reads_json_reply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/messages")
        .match_header("authorization", "Bearer abc")
        .match_body(Matcher::Json(json!({"id": "u1", "content": "hello"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"r1","role":"assistant","content":"Hi there"}"#)
        .create_async()
        .await;
    let store = store_for(&server, signed_in());

    let reply = store.create(&MessageId::from("u1"), "hello").await.unwrap();

    let CreateReply::Complete(message) = reply else {
        panic!("expected a complete reply");
    };
    assert_eq!(message, RemoteMessage::new("r1", Role::Assistant, "Hi there"));
    mock.assert_async().await;
}

#[tokio::test]
async fn create_with_event_stream_yields_fragments() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/messages")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(
            "data: {\"id\":\"a\",\"content\":\"He\"}\n\ndata: {\"id\":\"a\",\"content\":\"llo\"}\n\n",
        )
        .create_async()
        .await;
    let store = store_for(&server, signed_in());

    let reply = store.create(&MessageId::from("u1"), "hi").await.unwrap();

    let CreateReply::Stream(events) = reply else {
        panic!("expected a streamed reply");
    };
    let chunks: Vec<StreamChunk> = events
        .map(|event| serde_json::from_str(&event.unwrap().data).unwrap())
        .collect()
        .await;
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, "He");
    assert_eq!(chunks[1].content, "llo");
}

#[tokio::test]
async fn update_puts_new_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/messages/u1")
        .match_header("authorization", "Bearer abc")
        .match_body(Matcher::Json(json!({"content": "reworded"})))
        .with_status(200)
        .create_async()
        .await;
    let store = store_for(&server, signed_in());

    store
        .update(&MessageId::from("u1"), "reworded")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn update_of_missing_message_is_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/messages/gone")
        .with_status(404)
        .with_body(r#"{"detail":"Message not found"}"#)
        .create_async()
        .await;
    let store = store_for(&server, signed_in());

    let err = store
        .update(&MessageId::from("gone"), "text")
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::ApiError(ref m) if m.contains("Message not found")));
}

#[tokio::test]
async fn delete_hits_message_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/messages/u1")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .create_async()
        .await;
    let store = store_for(&server, signed_in());

    store.delete(&MessageId::from("u1")).await.unwrap();
    mock.assert_async().await;
}
