//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// The inner string is the underlying cause, rendered verbatim to clients
/// for server-side failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request input was rejected.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required configuration is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Object storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Configuration(_) | Self::Storage(_) | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the underlying cause without the category prefix.
    #[must_use]
    pub fn cause(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::Configuration(msg)
            | Self::Storage(msg)
            | Self::Database(msg) => msg,
        }
    }

    /// Whether the error was caused by the client.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
