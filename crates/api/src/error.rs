//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use msgcreator_shared::AppError;
use serde::Serialize;
use tracing::error;

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// An error ready to be rendered as a response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map an application error to a response.
    ///
    /// Client errors carry their own message. Server errors are reported as
    /// `"{context}: {cause}"` and logged.
    pub fn from_app(err: impl Into<AppError>, context: &str) -> Self {
        let err = err.into();
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_client_error() {
            return Self::new(status, err.cause());
        }

        error!(code = err.error_code(), error = %err.cause(), "{context}");
        Self::new(status, format!("{context}: {}", err.cause()))
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
