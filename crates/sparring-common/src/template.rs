//! Placeholder syntax shared by seed templates and their validation.

use std::sync::LazyLock;

use regex::Regex;

/// Planning-context keys a template may reference as `{key}`.
pub const CONTEXT_KEYS: [&str; 4] = ["stage", "class", "subject", "topic"];

/// Matches `{name}`; group 1 is the name.
pub static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static placeholder pattern must compile")
});

/// Names of the placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Placeholders in `template` that are not context keys.
pub fn unknown_placeholders(template: &str) -> Vec<&str> {
    placeholders(template)
        .filter(|name| !CONTEXT_KEYS.contains(name))
        .collect()
}
