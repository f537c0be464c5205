//! Message error types.

use msgcreator_shared::AppError;
use thiserror::Error;

use crate::cdn::CdnError;
use crate::storage::StorageError;

/// Message operation errors.
#[derive(Debug, Error)]
pub enum MessageError {
    /// Message text is empty after trimming.
    #[error("Message is required")]
    EmptyMessage,

    /// No file part was sent with the upload.
    #[error("File is required")]
    MissingFile,

    /// Image URL lookup without an image ID.
    #[error("image_id parameter is required")]
    MissingImageId,

    /// Storage operation failed.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Public URL could not be built.
    #[error("{0}")]
    Cdn(#[from] CdnError),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(String),
}

impl MessageError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<MessageError> for AppError {
    fn from(err: MessageError) -> Self {
        let msg = err.to_string();
        match err {
            MessageError::EmptyMessage
            | MessageError::MissingFile
            | MessageError::MissingImageId => Self::Validation(msg),
            MessageError::Storage(_) => Self::Storage(msg),
            MessageError::Cdn(_) => Self::Configuration(msg),
            MessageError::Repository(_) => Self::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_validation() {
        for err in [
            MessageError::EmptyMessage,
            MessageError::MissingFile,
            MessageError::MissingImageId,
        ] {
            let app: AppError = err.into();
            assert_eq!(app.status_code(), 400);
        }
    }

    #[test]
    fn test_dependency_failures_keep_cause() {
        let app: AppError = MessageError::repository("Lost connection to MySQL server").into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.cause(), "Lost connection to MySQL server");

        let app: AppError = MessageError::from(StorageError::operation("timed out")).into();
        assert!(matches!(app, AppError::Storage(_)));
        assert_eq!(app.cause(), "storage operation failed: timed out");

        let app: AppError = MessageError::from(CdnError::DomainNotConfigured).into();
        assert!(matches!(app, AppError::Configuration(_)));
        assert_eq!(
            app.cause(),
            "CLOUDFRONT_DOMAIN environment variable is not set"
        );
    }
}
