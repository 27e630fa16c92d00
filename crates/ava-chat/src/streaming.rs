//! Server-Sent Events (SSE) decoding.
//!
//! The backend streams replies as `data: <json>` lines. Decoding is
//! line-based, so a fragment split across network chunks is reassembled
//! before it is yielded. Every `data:` line becomes one event; the backend
//! never spreads a payload over several lines. Invalid UTF-8 is replaced,
//! not fatal: only transport errors end the stream.

use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

use crate::ChatError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The event type from a preceding `event:` line, if any.
    pub event: Option<String>,
    /// The event data (one JSON document for the Ava backend).
    pub data: String,
}

impl SseEvent {
    pub fn data(data: impl Into<String>) -> Self {
        Self {
            event: None,
            data: data.into(),
        }
    }
}

/// Stream of decoded events. A read error is yielded once and ends the stream.
pub type EventStream = BoxStream<'static, Result<SseEvent, ChatError>>;

struct DecoderState<R> {
    reader: R,
    buf: Vec<u8>,
    event: Option<String>,
    done: bool,
}

/// Decode SSE events from any buffered async reader.
pub fn sse_events<R>(reader: R) -> EventStream
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let state = DecoderState {
        reader,
        buf: Vec::new(),
        event: None,
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }
        loop {
            state.buf.clear();
            match state.reader.read_until(b'\n', &mut state.buf).await {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    state.done = true;
                    return Some((Err(ChatError::NetworkError(e.to_string())), state));
                }
            }
            let line = String::from_utf8_lossy(&state.buf).into_owned();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                // Empty line = end of event
                state.event = None;
                continue;
            }

            if let Some(kind) = line.strip_prefix("event:") {
                state.event = Some(kind.trim().to_string());
            } else if let Some(data) = line.strip_prefix("data:") {
                let data = data.trim();
                if data.is_empty() {
                    continue;
                }
                let event = SseEvent {
                    event: state.event.clone(),
                    data: data.to_string(),
                };
                return Some((Ok(event), state));
            }
            // Ignore other fields (id:, retry:, comments)
        }
    })
    .boxed()
}

/// Decode SSE events from a streaming reqwest response body.
pub fn response_events(response: reqwest::Response) -> EventStream {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    sse_events(reader)
}
