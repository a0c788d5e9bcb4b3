//! Error types for TinyLog
//!
//! Only the setup path (creating loggers, opening configuration, decoding
//! external text) surfaces these. Writing a record never returns an error.

use thiserror::Error;

/// Main error type for TinyLog setup operations
#[derive(Error, Debug)]
pub enum LogError {
    /// A logger with this name is already registered
    #[error("Logger already exists: {0}")]
    LoggerExists(String),

    /// Text could not be parsed as a severity level
    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    /// Bytes were not valid in the declared encoding
    #[error("Transcode error: {0}")]
    Transcode(String),

    /// Configuration is structurally valid JSON but semantically wrong
    #[error("Config error: {0}")]
    Config(String),

    /// Configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LogError::LoggerExists("app".to_string());
        assert_eq!(format!("{}", err), "Logger already exists: app");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let log_err: LogError = io_err.into();
        assert!(matches!(log_err, LogError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let log_err: LogError = json_err.into();
        assert!(matches!(log_err, LogError::Serialization(_)));
    }
}
