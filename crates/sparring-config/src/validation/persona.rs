//! Persona override validation.
//!
//! Overrides may be omitted, but a present override must carry text, and
//! the seed template may only reference known context keys.

use sparring_common::unknown_placeholders;

use crate::schema::SparringConfig;

use super::helpers::validate_not_blank;

pub(crate) fn validate_persona(errors: &mut Vec<String>, config: &SparringConfig) {
    let persona = &config.persona;

    if let Some(preamble) = &persona.preamble {
        validate_not_blank(errors, "persona.preamble", preamble);
    }
    if let Some(ack) = &persona.acknowledgment {
        validate_not_blank(errors, "persona.acknowledgment", ack);
    }
    if let Some(template) = &persona.seed_template {
        validate_not_blank(errors, "persona.seed_template", template);
        for key in unknown_placeholders(template) {
            errors.push(format!(
                "persona.seed_template references unknown placeholder {{{key}}}"
            ));
        }
    }
}
