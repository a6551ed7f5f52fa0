//! Generation model configuration.

use serde::{Deserialize, Serialize};

/// Which model to call and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Gemini model id.
    pub name: String,
    /// Output token cap (valid range: 1-65536).
    pub max_tokens: u32,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Whole-request timeout in seconds; 0 disables it (valid range: 0-3600).
    pub request_timeout_secs: u32,
    /// Print the reply as it streams in.
    pub stream: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.0-flash".into(),
            max_tokens: 4096,
            temperature: 0.7,
            request_timeout_secs: 0,
            stream: true,
        }
    }
}
