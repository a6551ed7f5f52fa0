pub mod errors;
pub mod id;
pub mod template;

pub use errors::{ConfigError, SparringError};
pub use id::{new_correlation_id, new_id, SessionId};
pub use template::{placeholders, unknown_placeholders, CONTEXT_KEYS, PLACEHOLDER_RE};
