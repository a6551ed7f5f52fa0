//! Persona overrides and the default planning context.

use serde::{Deserialize, Serialize};

/// Optional replacements for the built-in persona texts.
/// Unset fields keep the built-in text.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PersonaConfig {
    pub preamble: Option<String>,
    pub acknowledgment: Option<String>,
    /// Seed prompt with `{stage}`, `{class}`, `{subject}`, `{topic}` placeholders.
    pub seed_template: Option<String>,
}

/// Planning context the session starts with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContextConfig {
    pub stage: String,
    pub class: String,
    pub subject: String,
    pub topic: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            stage: "Zyklus 1 (Kindergarten - 2. Klasse)".into(),
            class: "1. Klasse".into(),
            subject: "Mathematik".into(),
            topic: "Addition im Zahlenraum 20".into(),
        }
    }
}
