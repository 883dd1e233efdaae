use thiserror::Error;

/// Application error types
///
/// Incomplete or invalid product input is not an error here; it is an
/// outcome of a comparison. These are faults of the program's surroundings.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Logging could not be set up
    #[error("Logging error: {0}")]
    LoggingError(String),
    /// Terminal or file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::LoggingError("no file name".to_string());
        assert_eq!(error.to_string(), "Logging error: no file name");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: AppError = io.into();
        assert!(matches!(error, AppError::Io(_)));
        assert_eq!(error.to_string(), "I/O error: missing");
    }

    #[test]
    fn test_config_error_conversion() {
        let error: AppError = config::ConfigError::Message("bad value".to_string()).into();
        assert_eq!(error.to_string(), "Configuration error: bad value");
    }
}
