//! Configuration for the sparring chat.
//!
//! TOML-based, with every section defaulted so partial files work. Covers
//! the model, credentials, persona overrides, the starting planning
//! context, and logging.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sparring_config::{load_config, resolve_api_key};
//!
//! let config = load_config().expect("failed to load config");
//! let api_key = resolve_api_key(None, &config).expect("no API key");
//! # let _ = api_key;
//! ```

pub mod credentials;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use credentials::{resolve_api_key, API_KEY_ENV};
pub use schema::SparringConfig;

use sparring_common::ConfigError;
use std::path::Path;

/// Load and validate config from the platform default path, creating a
/// commented default file if none exists.
pub fn load_config() -> Result<SparringConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<SparringConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
