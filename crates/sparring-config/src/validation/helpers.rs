//! Shared validation helpers used by the section validators.

use std::fmt::Display;

/// Push an error unless `value` lies within `[min, max]`. Values that do
/// not compare at all (NaN) are rejected too.
pub(crate) fn validate_range<T>(errors: &mut Vec<String>, name: &str, value: T, min: T, max: T)
where
    T: PartialOrd + Display,
{
    let in_range = min <= value && value <= max;
    if !in_range {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is empty or only whitespace.
pub(crate) fn validate_not_blank(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}
