//! Planning context and seed-prompt templating.
//!
//! The context is the handful of parameters an educator picks before asking
//! for ideas (cycle, class, subject, topic). It is interpolated into the
//! seed prompt and summarized into the priming turn.

use regex::Captures;
use serde::{Deserialize, Serialize};
use sparring_common::PLACEHOLDER_RE;

pub use sparring_common::CONTEXT_KEYS;

/// Lehrplan 21 cycles offered as stage choices.
pub const STAGE_PRESETS: [&str; 3] = [
    "Zyklus 1 (Kindergarten - 2. Klasse)",
    "Zyklus 2 (3. - 6. Klasse)",
    "Zyklus 3 (Sekundarstufe I)",
];

/// Free-form planning parameters supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionContext {
    pub stage: String,
    pub class: String,
    pub subject: String,
    pub topic: String,
}

impl SessionContext {
    pub fn new(
        stage: impl Into<String>,
        class: impl Into<String>,
        subject: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            class: class.into(),
            subject: subject.into(),
            topic: topic.into(),
        }
    }

    /// Look a field up by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "stage" => Some(&self.stage),
            "class" => Some(&self.class),
            "subject" => Some(&self.subject),
            "topic" => Some(&self.topic),
            _ => None,
        }
    }

    /// Set a field by key. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "stage" => &mut self.stage,
            "class" => &mut self.class,
            "subject" => &mut self.subject,
            "topic" => &mut self.topic,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    pub fn is_empty(&self) -> bool {
        [&self.stage, &self.class, &self.subject, &self.topic]
            .iter()
            .all(|v| v.trim().is_empty())
    }

    /// One-line "current focus" banner.
    pub fn focus_line(&self) -> String {
        format!(
            "{} | {} | {}: {}",
            self.stage, self.class, self.subject, self.topic
        )
    }

    /// Context sentence appended to the persona when priming.
    pub fn summary(&self) -> String {
        format!(
            "Kontext: {}, {}, {}, {}.",
            self.stage, self.class, self.subject, self.topic
        )
    }
}

/// Interpolate `{key}` placeholders from `context` into `template`.
///
/// Single pass: substituted values are never scanned again, and unknown
/// placeholders are left as written.
pub fn seed_from_template(template: &str, context: &SessionContext) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match context.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "Plan für {stage}, {class}, Fach {subject}, Thema '{topic}'.";

    fn ctx() -> SessionContext {
        SessionContext::new("Zyklus 2", "4. Klasse", "Mathematik", "Bruchrechnen")
    }

    #[test]
    fn seed_contains_every_value_and_no_placeholders() {
        let seed = seed_from_template(crate::persona::DEFAULT_SEED_TEMPLATE, &ctx());
        for value in ["Zyklus 2", "4. Klasse", "Mathematik", "Bruchrechnen"] {
            assert!(seed.contains(value), "missing {value} in {seed}");
        }
        for key in CONTEXT_KEYS {
            assert!(!seed.contains(&format!("{{{key}}}")));
        }
    }

    #[test]
    fn every_context_key_maps_to_a_field() {
        let mut context = SessionContext::default();
        for key in CONTEXT_KEYS {
            assert!(context.set(key, format!("value of {key}")));
            assert_eq!(context.get(key), Some(format!("value of {key}").as_str()));
        }
        assert!(context.get("grade").is_none());
    }

    #[test]
    fn seed_is_deterministic() {
        assert_eq!(seed_from_template(TEMPLATE, &ctx()), seed_from_template(TEMPLATE, &ctx()));
    }

    #[test]
    fn changing_one_field_changes_only_its_slot() {
        let base = seed_from_template(TEMPLATE, &ctx());
        let mut other = ctx();
        other.topic = "Geometrie".into();
        let changed = seed_from_template(TEMPLATE, &other);
        assert_eq!(base, "Plan für Zyklus 2, 4. Klasse, Fach Mathematik, Thema 'Bruchrechnen'.");
        assert_eq!(changed, "Plan für Zyklus 2, 4. Klasse, Fach Mathematik, Thema 'Geometrie'.");
    }

    #[test]
    fn empty_fields_interpolate_as_empty() {
        let seed = seed_from_template(TEMPLATE, &SessionContext::default());
        assert_eq!(seed, "Plan für , , Fach , Thema ''.");
    }

    #[test]
    fn values_are_not_rescanned() {
        let mut tricky = ctx();
        tricky.topic = "{stage}".into();
        let seed = seed_from_template("{topic}/{stage}", &tricky);
        assert_eq!(seed, "{stage}/Zyklus 2");
    }

    #[test]
    fn unknown_placeholders_stay_verbatim() {
        let seed = seed_from_template("{subject} {duration}", &ctx());
        assert_eq!(seed, "Mathematik {duration}");
    }

    #[test]
    fn get_and_set_by_key() {
        let mut c = ctx();
        assert_eq!(c.get("class"), Some("4. Klasse"));
        assert_eq!(c.get("unknown"), None);
        assert!(c.set("subject", "NMG"));
        assert_eq!(c.subject, "NMG");
        assert!(!c.set("duration", "45"));
    }

    #[test]
    fn focus_line_and_summary() {
        let c = ctx();
        assert_eq!(c.focus_line(), "Zyklus 2 | 4. Klasse | Mathematik: Bruchrechnen");
        assert_eq!(c.summary(), "Kontext: Zyklus 2, 4. Klasse, Mathematik, Bruchrechnen.");
    }

    #[test]
    fn emptiness_ignores_whitespace() {
        assert!(SessionContext::default().is_empty());
        assert!(SessionContext::new(" ", "", "", "").is_empty());
        assert!(!ctx().is_empty());
    }

    #[test]
    fn stage_presets_are_the_three_cycles() {
        assert_eq!(STAGE_PRESETS.len(), 3);
        assert!(STAGE_PRESETS.iter().all(|s| s.starts_with("Zyklus")));
    }
}
