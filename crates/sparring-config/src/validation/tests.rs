//! Tests for the full validation pipeline.

use super::*;
use crate::schema::SparringConfig;

#[test]
fn default_config_validates() {
    assert!(validate(&SparringConfig::default()).is_ok());
}

#[test]
fn catches_blank_model_name() {
    let mut config = SparringConfig::default();
    config.model.name = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.name must not be empty"));
}

#[test]
fn catches_zero_max_tokens() {
    let mut config = SparringConfig::default();
    config.model.max_tokens = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.max_tokens = 0 is out of range [1, 65536]"));
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = SparringConfig::default();
    config.model.temperature = 2.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.temperature"));
}

#[test]
fn catches_nan_temperature() {
    let config: SparringConfig = toml::from_str("[model]\ntemperature = nan\n").unwrap();
    assert!(config.model.temperature.is_nan());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.temperature = NaN is out of range"));
}

#[test]
fn catches_infinite_temperature() {
    let mut config = SparringConfig::default();
    config.model.temperature = f64::INFINITY;
    assert!(validate(&config).is_err());
}

#[test]
fn range_bounds_are_inclusive() {
    let mut config = SparringConfig::default();
    config.model.temperature = 2.0;
    config.model.max_tokens = 65536;
    config.model.request_timeout_secs = 3600;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_excessive_timeout() {
    let mut config = SparringConfig::default();
    config.model.request_timeout_secs = 7200;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.request_timeout_secs"));
}

#[test]
fn catches_unknown_template_placeholder() {
    let mut config = SparringConfig::default();
    config.persona.seed_template = Some("Plan für {class} ({duration} Minuten)".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("{duration}"));
    assert!(!err.contains("{class}"));
}

#[test]
fn known_placeholders_pass() {
    let mut config = SparringConfig::default();
    config.persona.seed_template = Some("{stage} {class} {subject} {topic}".into());
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_blank_overrides() {
    let mut config = SparringConfig::default();
    config.persona.preamble = Some(String::new());
    config.persona.acknowledgment = Some(" ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("persona.preamble"));
    assert!(err.contains("persona.acknowledgment"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = SparringConfig::default();
    config.model.max_tokens = 0;
    config.model.temperature = -1.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.max_tokens"));
    assert!(err.contains("model.temperature"));
    assert!(err.contains("; "));
}
