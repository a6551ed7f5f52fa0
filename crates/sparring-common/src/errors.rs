use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("missing credential: {0}")]
    MissingCredential(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SparringError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("generation error: {0}")]
    Generation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("model.name must not be empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: model.name must not be empty"
        );

        let err = ConfigError::MissingCredential("set GOOGLE_API_KEY".into());
        assert_eq!(err.to_string(), "missing credential: set GOOGLE_API_KEY");
    }

    #[test]
    fn sparring_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: SparringError = config_err.into();
        assert!(matches!(err, SparringError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn sparring_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin closed");
        let err: SparringError = io_err.into();
        assert!(matches!(err, SparringError::Io(_)));
        assert!(err.to_string().contains("stdin closed"));
    }

    #[test]
    fn sparring_error_generation_display() {
        let err = SparringError::Generation("quota exceeded".into());
        assert_eq!(err.to_string(), "generation error: quota exceeded");
    }
}
