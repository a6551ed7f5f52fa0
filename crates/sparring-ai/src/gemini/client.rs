//! Gemini API client struct, request building, and response parsing.

use std::time::Duration;

use crate::{AiResponse, GenerationError, TokenUsage, Turn};

use super::config::GeminiConfig;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder().connect_timeout(Duration::from_secs(10));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GenerationError::Configuration(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn api_url(&self, stream: bool) -> String {
        let method = if stream {
            "streamGenerateContent"
        } else {
            "generateContent"
        };
        format!("{}/{}:{}", GEMINI_API_BASE, self.config.model, method)
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(&self, turns: &[Turn]) -> serde_json::Value {
        let contents: Vec<_> = turns
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.role.as_str(),
                    "parts": [{ "text": turn.content }]
                })
            })
            .collect();

        serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        })
    }

    /// Parse a complete (non-streamed) Gemini response.
    pub(crate) fn parse_response(
        &self,
        json: serde_json::Value,
    ) -> Result<AiResponse, GenerationError> {
        if let Some(err) = error_payload(&json) {
            return Err(err);
        }
        let candidates = match json["candidates"].as_array() {
            Some(candidates) => candidates,
            None => return Err(missing_candidates(&json)),
        };

        let first = candidates
            .first()
            .ok_or_else(|| GenerationError::Parse("empty candidates".to_string()))?;
        if let Some(err) = blocked_finish(first) {
            return Err(err);
        }

        let content = candidate_text(first);
        if content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(AiResponse {
            content,
            usage: usage_from(&json),
        })
    }
}

/// Concatenate the text parts of one candidate.
pub(crate) fn candidate_text(candidate: &serde_json::Value) -> String {
    let mut content = String::new();
    if let Some(parts) = candidate["content"]["parts"].as_array() {
        for part in parts {
            if let Some(text) = part["text"].as_str() {
                content.push_str(text);
            }
        }
    }
    content
}

pub(crate) fn usage_from(json: &serde_json::Value) -> TokenUsage {
    TokenUsage {
        input_tokens: json["usageMetadata"]["promptTokenCount"]
            .as_u64()
            .unwrap_or(0),
        output_tokens: json["usageMetadata"]["candidatesTokenCount"]
            .as_u64()
            .unwrap_or(0),
    }
}

/// A 200 without candidates is either a safety block or garbage.
pub(crate) fn missing_candidates(json: &serde_json::Value) -> GenerationError {
    match json["promptFeedback"]["blockReason"].as_str() {
        Some(reason) => GenerationError::Service {
            status: 200,
            message: format!("prompt blocked: {reason}"),
        },
        None => GenerationError::Parse("no candidates in response".to_string()),
    }
}

/// Finish reasons that mean the reply was withheld or cut off by the service.
const BLOCKING_FINISH_REASONS: [&str; 5] = [
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// A candidate stopped for a policy reason. Any text it carries is partial.
pub(crate) fn blocked_finish(candidate: &serde_json::Value) -> Option<GenerationError> {
    let reason = candidate["finishReason"].as_str()?;
    BLOCKING_FINISH_REASONS
        .contains(&reason)
        .then(|| GenerationError::Service {
            status: 200,
            message: format!("response stopped: {reason}"),
        })
}

/// An `{"error": {...}}` object delivered in a 200 body or an SSE event.
pub(crate) fn error_payload(json: &serde_json::Value) -> Option<GenerationError> {
    let error = json.get("error")?;
    let status = error["code"]
        .as_u64()
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(500);
    let message = error["message"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());
    Some(GenerationError::Service { status, message })
}

/// Text and usage gathered from the events of one streamed reply.
#[derive(Debug, Default)]
pub(crate) struct StreamAccumulator {
    pub(crate) content: String,
    pub(crate) usage: TokenUsage,
}

/// Fold one streamed JSON chunk into `acc`, returning the new text if any.
///
/// Error payloads, blocking finish reasons and blocked prompts end the
/// stream with an error; whatever text arrived before is discarded by the
/// caller.
pub(crate) fn apply_event(
    data: &serde_json::Value,
    acc: &mut StreamAccumulator,
) -> Result<Option<String>, GenerationError> {
    if let Some(err) = error_payload(data) {
        return Err(err);
    }

    let mut chunk = String::new();
    match data["candidates"].as_array() {
        Some(candidates) => {
            for candidate in candidates {
                chunk.push_str(&candidate_text(candidate));
                if let Some(err) = blocked_finish(candidate) {
                    return Err(err);
                }
            }
        }
        None if data.get("promptFeedback").is_some() => return Err(missing_candidates(data)),
        None => {}
    }

    if data.get("usageMetadata").is_some() {
        acc.usage = usage_from(data);
    }

    if chunk.is_empty() {
        Ok(None)
    } else {
        acc.content.push_str(&chunk);
        Ok(Some(chunk))
    }
}

/// Turn a non-success HTTP response body into a service error, preferring
/// the API's own `error.message` over the raw body.
pub(crate) fn service_error(status: reqwest::StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    GenerationError::Service {
        status: status.as_u16(),
        message,
    }
}
