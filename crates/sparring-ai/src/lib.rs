//! Conversation engine for the lesson-planning sparring partner.
//!
//! Provides:
//! - the `AiClient` seam and a Gemini implementation (plain + SSE streaming)
//! - persona and seed-prompt templating
//! - `Session`, which owns the transcript and decides what is sent per turn
//! - token usage tracking

pub mod context;
pub mod gemini;
pub mod persona;
pub mod session;
pub mod streaming;
pub mod token_tracker;

use async_trait::async_trait;

pub use context::{seed_from_template, SessionContext, CONTEXT_KEYS, STAGE_PRESETS};
pub use gemini::{GeminiClient, GeminiConfig};
pub use persona::Persona;
pub use session::Session;
pub use token_tracker::TokenTracker;

/// Callback receiving streamed text chunks as they arrive.
pub type ChunkCallback = Box<dyn Fn(String) + Send + Sync>;

/// A text-generation service. Each call is one self-contained request:
/// `turns` is the complete context the service sees.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, turns: &[Turn]) -> Result<AiResponse, GenerationError>;

    async fn send_message_streaming(
        &self,
        turns: &[Turn],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, GenerationError>;
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub role: Speaker,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Model,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Model,
}

impl Speaker {
    /// Role name on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Model => "model",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Coarse classification of a `GenerationError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Service,
    EmptyResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("client configuration error: {0}")]
    Configuration(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },
    #[error("rate limited")]
    RateLimited,
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("response contained no text")]
    EmptyResponse,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Configuration(_) => ErrorKind::Configuration,
            GenerationError::Transport(_) => ErrorKind::Transport,
            GenerationError::Service { .. }
            | GenerationError::RateLimited
            | GenerationError::Parse(_) => ErrorKind::Service,
            GenerationError::EmptyResponse => ErrorKind::EmptyResponse,
        }
    }

    /// Whether submitting again may succeed without changing anything.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

impl From<GenerationError> for sparring_common::SparringError {
    fn from(err: GenerationError) -> Self {
        sparring_common::SparringError::Generation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        assert_eq!(
            GenerationError::Transport("connection reset".into()).kind(),
            ErrorKind::Transport
        );
        assert_eq!(GenerationError::RateLimited.kind(), ErrorKind::Service);
        assert_eq!(
            GenerationError::Parse("eof".into()).kind(),
            ErrorKind::Service
        );
        assert_eq!(
            GenerationError::EmptyResponse.kind(),
            ErrorKind::EmptyResponse
        );
        assert_eq!(
            GenerationError::Configuration("tls".into()).kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn only_transport_errors_are_retryable() {
        assert!(GenerationError::Transport("dns".into()).is_retryable());
        assert!(!GenerationError::Service {
            status: 403,
            message: "API key not valid".into(),
        }
        .is_retryable());
        assert!(!GenerationError::EmptyResponse.is_retryable());
    }

    #[test]
    fn service_error_display_carries_status() {
        let err = GenerationError::Service {
            status: 400,
            message: "invalid argument".into(),
        };
        assert_eq!(
            err.to_string(),
            "service error (HTTP 400): invalid argument"
        );
    }

    #[test]
    fn converts_into_sparring_error() {
        let err: sparring_common::SparringError = GenerationError::EmptyResponse.into();
        assert!(err.to_string().contains("no text"));
    }

    #[test]
    fn token_usage_total_saturates() {
        let usage = TokenUsage {
            input_tokens: u64::MAX,
            output_tokens: 5,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);
    }

    #[test]
    fn speaker_wire_names() {
        assert_eq!(Speaker::User.as_str(), "user");
        assert_eq!(Speaker::Model.as_str(), "model");
        let json = serde_json::to_string(&Turn::model("ok")).unwrap();
        assert_eq!(json, r#"{"role":"model","content":"ok"}"#);
    }
}
