//! API key resolution.

use sparring_common::ConfigError;
use tracing::debug;

use crate::schema::SparringConfig;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Resolve the API key: explicit override, then `GOOGLE_API_KEY`, then the
/// `[credentials]` section. Blank values are skipped.
pub fn resolve_api_key(
    cli_override: Option<&str>,
    config: &SparringConfig,
) -> Result<String, ConfigError> {
    let env_value = std::env::var(API_KEY_ENV).ok();
    resolve_from(cli_override, env_value.as_deref(), config)
}

fn resolve_from(
    cli_override: Option<&str>,
    env_value: Option<&str>,
    config: &SparringConfig,
) -> Result<String, ConfigError> {
    let candidates = [
        ("command line", cli_override),
        (API_KEY_ENV, env_value),
        ("config file", config.credentials.api_key.as_deref()),
    ];

    candidates
        .into_iter()
        .find_map(|(source, value)| {
            let key = value?.trim();
            if key.is_empty() {
                return None;
            }
            debug!(source, "API key resolved");
            Some(key.to_string())
        })
        .ok_or_else(|| {
            ConfigError::MissingCredential(format!(
                "no Gemini API key found; set {API_KEY_ENV}, pass --api-key, \
                 or add api_key under [credentials] in the config file"
            ))
        })
}
