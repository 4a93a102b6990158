//! Error types for stash.

use thiserror::Error;

/// Common error type for stash.
#[derive(Error, Debug)]
pub enum StashError {
    /// Database error.
    ///
    /// Wraps errors from the persistence layer; sqlx errors are
    /// automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for StashError {
    fn from(e: sqlx::Error) -> Self {
        StashError::Database(e.to_string())
    }
}

/// Result type alias for stash operations.
pub type Result<T> = std::result::Result<T, StashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = StashError::Validation("filename is empty".to_string());
        assert_eq!(err.to_string(), "validation error: filename is empty");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = StashError::NotFound("file".to_string());
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let err: StashError = io_err.into();
        assert!(matches!(err, StashError::Io(_)));
        assert!(err.to_string().contains("no such directory"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: StashError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StashError::Database(_)));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(StashError::Config("bad".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
