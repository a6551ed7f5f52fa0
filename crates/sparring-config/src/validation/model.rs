//! Model section validation (name, token cap, temperature, timeout).

use crate::schema::SparringConfig;

use super::helpers::{validate_not_blank, validate_range};

pub(crate) fn validate_model(errors: &mut Vec<String>, config: &SparringConfig) {
    validate_not_blank(errors, "model.name", &config.model.name);
    validate_range(errors, "model.max_tokens", config.model.max_tokens, 1, 65536);
    validate_range(errors, "model.temperature", config.model.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "model.request_timeout_secs",
        config.model.request_timeout_secs,
        0,
        3600,
    );
}
