//! AiClient trait implementation for GeminiClient (send_message + streaming).

use async_trait::async_trait;
use bytes::Buf;
use futures_util::Stream;
use tracing::{debug, warn};

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiResponse, ChunkCallback, GenerationError, Turn};

use super::client::{apply_event, service_error, GeminiClient, StreamAccumulator};

impl GeminiClient {
    async fn post(
        &self,
        url: &str,
        turns: &[Turn],
    ) -> Result<reqwest::Response, GenerationError> {
        let body = self.build_request_body(turns);

        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(service_error(status, &text));
        }

        Ok(response)
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn send_message(&self, turns: &[Turn]) -> Result<AiResponse, GenerationError> {
        let url = self.api_url(false);

        debug!(model = %self.config.model, turns = turns.len(), "Gemini API request");

        let response = self.post(&url, turns).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        self.parse_response(json)
    }

    async fn send_message_streaming(
        &self,
        turns: &[Turn],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, GenerationError> {
        let url = format!("{}?alt=sse", self.api_url(true));

        debug!(model = %self.config.model, turns = turns.len(), "Gemini API streaming request");

        let response = self.post(&url, turns).await?;
        read_stream(response.bytes_stream(), &on_chunk).await
    }
}

/// Collect one streamed reply, forwarding text chunks to `on_chunk`.
///
/// The first error event ends the reply: later events are ignored and the
/// error is returned instead of the text received so far.
pub(crate) async fn read_stream<S, B, E>(
    stream: S,
    on_chunk: &ChunkCallback,
) -> Result<AiResponse, GenerationError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: Buf,
    E: std::fmt::Display,
{
    let mut acc = StreamAccumulator::default();
    let mut failure: Option<GenerationError> = None;

    parse_sse_stream(stream, |event: SseEvent| {
        if failure.is_some() {
            return;
        }
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&event.data) else {
            debug!("skipping non-JSON SSE event");
            return;
        };
        match apply_event(&data, &mut acc) {
            Ok(Some(chunk)) => on_chunk(chunk),
            Ok(None) => {}
            Err(e) => {
                warn!(received = acc.content.len(), "Gemini stream failed: {e}");
                failure = Some(e);
            }
        }
    })
    .await?;

    if let Some(e) = failure {
        return Err(e);
    }
    if acc.content.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    Ok(AiResponse {
        content: acc.content,
        usage: acc.usage,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;

    use super::*;

    fn sse(events: &[&str]) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Unpin {
        let body: String = events.iter().map(|e| format!("data: {e}\n\n")).collect();
        futures_util::stream::iter(vec![Ok(Bytes::from(body))])
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, ChunkCallback) {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&seen);
        let on_chunk: ChunkCallback =
            Box::new(move |chunk: String| sink.lock().unwrap().push(chunk));
        (seen, on_chunk)
    }

    #[tokio::test]
    async fn stream_collects_chunks_and_usage() {
        let (seen, on_chunk) = recorder();
        let response = read_stream(
            sse(&[
                r#"{"candidates":[{"content":{"parts":[{"text":"Guten "}]}}]}"#,
                r#"{"candidates":[{"content":{"parts":[{"text":"Tag"}]},"finishReason":"STOP"}],"usageMetadata":{"promptTokenCount":5,"candidatesTokenCount":2}}"#,
            ]),
            &on_chunk,
        )
        .await
        .unwrap();

        assert_eq!(response.content, "Guten Tag");
        assert_eq!(response.usage.output_tokens, 2);
        assert_eq!(*seen.lock().unwrap(), vec!["Guten ", "Tag"]);
    }

    #[tokio::test]
    async fn error_event_after_text_fails_the_reply() {
        let (_, on_chunk) = recorder();
        let err = read_stream(
            sse(&[
                r#"{"candidates":[{"content":{"parts":[{"text":"Kompetenzbezug: "}]}}]}"#,
                r#"{"error":{"code":500,"message":"Internal"}}"#,
                r#"{"candidates":[{"content":{"parts":[{"text":"zu spät"}]}}]}"#,
            ]),
            &on_chunk,
        )
        .await
        .unwrap_err();

        match err {
            GenerationError::Service { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn safety_stop_after_text_fails_the_reply() {
        let (_, on_chunk) = recorder();
        let err = read_stream(
            sse(&[
                r#"{"candidates":[{"content":{"parts":[{"text":"Szenario"}]}}]}"#,
                r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            ]),
            &on_chunk,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn stream_without_text_is_empty_response() {
        let (_, on_chunk) = recorder();
        let err = read_stream(sse(&["not json", r#"{"candidates":[]}"#]), &on_chunk)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }
}
