//! Server-Sent Events (SSE) streaming parser.
//!
//! Gemini's `streamGenerateContent?alt=sse` endpoint emits one JSON chunk
//! per SSE event. This module turns a reqwest byte stream into events.

use bytes::Buf;
use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

use crate::GenerationError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The event type, if the server named one.
    pub event: Option<String>,
    /// The event data (JSON string for Gemini).
    pub data: String,
}

/// Parse SSE events out of a stream of byte chunks (for example
/// `reqwest::Response::bytes_stream`), calling `on_event` for each event.
pub async fn parse_sse_stream<S, B, E>(
    stream: S,
    on_event: impl FnMut(SseEvent),
) -> Result<(), GenerationError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: Buf,
    E: std::fmt::Display,
{
    let byte_stream =
        stream.map(|result| result.map_err(|e| std::io::Error::other(e.to_string())));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    parse_sse_lines(reader, on_event).await
}

async fn parse_sse_lines<R: AsyncBufRead + Unpin>(
    reader: R,
    mut on_event: impl FnMut(SseEvent),
) -> Result<(), GenerationError> {
    let mut lines = reader.lines();

    let mut current_event: Option<String> = None;
    let mut current_data = String::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| GenerationError::Transport(e.to_string()))?
    {
        // Servers may terminate lines with CRLF.
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.is_empty() {
            if !current_data.is_empty() {
                on_event(SseEvent {
                    event: current_event.take(),
                    data: std::mem::take(&mut current_data),
                });
            }
            current_event = None;
            continue;
        }

        if let Some(event_type) = line.strip_prefix("event:") {
            current_event = Some(event_type.trim_start().to_string());
        } else if let Some(data) = line.strip_prefix("data:") {
            if !current_data.is_empty() {
                current_data.push('\n');
            }
            current_data.push_str(data.strip_prefix(' ').unwrap_or(data));
        }
        // id:, retry: and comments are ignored
    }

    if !current_data.is_empty() {
        on_event(SseEvent {
            event: current_event,
            data: current_data,
        });
    }

    Ok(())
}
