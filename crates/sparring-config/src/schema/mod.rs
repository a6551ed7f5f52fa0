//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod model;
mod persona;
mod system;

pub use model::*;
pub use persona::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SparringConfig {
    pub model: ModelConfig,
    pub credentials: CredentialsConfig,
    pub persona: PersonaConfig,
    pub context: ContextConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model() {
        let config = SparringConfig::default();
        assert_eq!(config.model.name, "gemini-2.0-flash");
        assert_eq!(config.model.max_tokens, 4096);
        assert_eq!(config.model.temperature, 0.7);
        assert_eq!(config.model.request_timeout_secs, 0);
        assert!(config.model.stream);
    }

    #[test]
    fn default_context_matches_first_cycle() {
        let config = SparringConfig::default();
        assert_eq!(config.context.stage, "Zyklus 1 (Kindergarten - 2. Klasse)");
        assert_eq!(config.context.class, "1. Klasse");
        assert_eq!(config.context.subject, "Mathematik");
        assert_eq!(config.context.topic, "Addition im Zahlenraum 20");
    }

    #[test]
    fn default_persona_has_no_overrides() {
        let config = SparringConfig::default();
        assert_eq!(config.persona, PersonaConfig::default());
        assert!(config.credentials.api_key.is_none());
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: SparringConfig = toml::from_str(
            r#"
[model]
temperature = 0.3

[context]
topic = "Bruchrechnen"
"#,
        )
        .unwrap();
        assert_eq!(config.model.temperature, 0.3);
        assert_eq!(config.model.name, "gemini-2.0-flash");
        assert_eq!(config.context.topic, "Bruchrechnen");
        assert_eq!(config.context.subject, "Mathematik");
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: SparringConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.as_directive(), "debug");
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = CredentialsConfig {
            api_key: Some("AIza-very-secret".into()),
        };
        let dbg = format!("{creds:?}");
        assert!(!dbg.contains("AIza-very-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }
}
