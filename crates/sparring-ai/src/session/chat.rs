//! Async submit methods for Session (plain + streaming).

use sparring_common::new_correlation_id;
use tracing::{debug, info, warn};

use crate::{AiClient, AiResponse, ChunkCallback, GenerationError, Turn};

use super::manager::Session;

impl Session {
    /// Record the user's message, send the assembled request, and commit the
    /// reply. On failure the user turn stays in the transcript unanswered.
    ///
    /// Blank input is ignored and yields an empty string.
    pub async fn submit(
        &mut self,
        client: &dyn AiClient,
        user_text: impl Into<String>,
    ) -> Result<String, GenerationError> {
        let Some((cid, request)) = self.begin_turn(user_text.into()) else {
            return Ok(String::new());
        };
        let result = client.send_message(&request).await;
        self.finish_turn(&cid, result)
    }

    /// Same as [`Session::submit`], forwarding text chunks to `on_chunk` as
    /// they arrive. Only the complete reply is committed.
    pub async fn submit_streaming(
        &mut self,
        client: &dyn AiClient,
        user_text: impl Into<String>,
        on_chunk: ChunkCallback,
    ) -> Result<String, GenerationError> {
        let Some((cid, request)) = self.begin_turn(user_text.into()) else {
            return Ok(String::new());
        };
        let result = client.send_message_streaming(&request, on_chunk).await;
        self.finish_turn(&cid, result)
    }

    fn begin_turn(&mut self, user_text: String) -> Option<(String, Vec<Turn>)> {
        if user_text.trim().is_empty() {
            debug!("Ignoring blank input");
            return None;
        }

        let cid = new_correlation_id();
        let priming = !self.is_primed();
        self.transcript.push(Turn::user(user_text));
        let request = self.build_request();

        debug!(
            session = %self.id,
            cid = %cid,
            priming,
            turns = request.len(),
            "Assembled generation request"
        );
        Some((cid, request))
    }

    fn finish_turn(
        &mut self,
        cid: &str,
        result: Result<AiResponse, GenerationError>,
    ) -> Result<String, GenerationError> {
        let result = result.and_then(|response| {
            if response.content.trim().is_empty() {
                Err(GenerationError::EmptyResponse)
            } else {
                Ok(response)
            }
        });

        match result {
            Ok(response) => {
                self.tracker.record(&response.usage);
                self.transcript.push(Turn::model(response.content.clone()));
                info!(
                    session = %self.id,
                    cid = %cid,
                    model = %self.model,
                    turns = self.transcript.len(),
                    output_tokens = response.usage.output_tokens,
                    "Reply committed"
                );
                Ok(response.content)
            }
            Err(e) => {
                warn!(
                    session = %self.id,
                    cid = %cid,
                    kind = ?e.kind(),
                    "Generation failed, user turn left unanswered: {e}"
                );
                Err(e)
            }
        }
    }
}
