use thiserror::Error;

/// Top-level error type for the fintrack backend.
///
/// Subsystem crates define their own error types and implement
/// `From<FintrackError>` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FintrackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("View not allowed: {0}")]
    ViewNotAllowed(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for FintrackError {
    fn from(err: toml::de::Error) -> Self {
        FintrackError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FintrackError {
    fn from(err: toml::ser::Error) -> Self {
        FintrackError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FintrackError {
    fn from(err: serde_json::Error) -> Self {
        FintrackError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for fintrack operations.
pub type Result<T> = std::result::Result<T, FintrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(FintrackError, &str)> = vec![
            (
                FintrackError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                FintrackError::Storage("disk full".to_string()),
                "Storage error: disk full",
            ),
            (
                FintrackError::ViewNotAllowed("users".to_string()),
                "View not allowed: users",
            ),
            (
                FintrackError::Api("bind failed".to_string()),
                "API error: bind failed",
            ),
            (
                FintrackError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FintrackError = io_err.into();
        assert!(matches!(err, FintrackError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let converted: FintrackError = err.unwrap_err().into();
        assert!(matches!(converted, FintrackError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let converted: FintrackError = err.unwrap_err().into();
        assert!(matches!(converted, FintrackError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(value.to_string())
        }

        assert_eq!(inner().unwrap(), "42");
    }
}
