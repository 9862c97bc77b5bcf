//! Error types for Amora.

use thiserror::Error;

/// Common error type for Amora.
#[derive(Error, Debug)]
pub enum AmoraError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from any database backend.
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for AmoraError {
    fn from(e: sqlx::Error) -> Self {
        AmoraError::Database(e.to_string())
    }
}

/// Result type alias for Amora operations.
pub type Result<T> = std::result::Result<T, AmoraError>;
