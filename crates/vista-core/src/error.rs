use thiserror::Error;

/// Top-level error type for the Vista workspace.
///
/// Subsystem crates define their own error types for domain failures; this
/// type covers configuration and I/O concerns shared by every binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VistaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for VistaError {
    fn from(err: toml::de::Error) -> Self {
        VistaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VistaError {
    fn from(err: toml::ser::Error) -> Self {
        VistaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VistaError {
    fn from(err: serde_json::Error) -> Self {
        VistaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Vista operations.
pub type Result<T> = std::result::Result<T, VistaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VistaError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = VistaError::Serialization("unexpected token".to_string());
        assert_eq!(err.to_string(), "Serialization error: unexpected token");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VistaError = io_err.into();
        assert!(matches!(err, VistaError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = = valid").unwrap_err();
        let err: VistaError = toml_err.into();
        assert!(matches!(err, VistaError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: VistaError = json_err.into();
        assert!(matches!(err, VistaError::Serialization(_)));
    }
}
