//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps persistence errors from trove-store to HTTP status codes and
//! returns JSON error response bodies with error code and message.
//! Never exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trove_store::StoreError;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
///
/// Maps persistence errors to appropriate HTTP status codes and
/// structured JSON error bodies. Internal error details are never
/// exposed to clients.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field was empty or missing (400).
    #[error("validation error: {0}")]
    Validation(String),

    /// The request could not be honored as sent (400): malformed
    /// multipart payloads or path parameters, rejected image paths, or
    /// a listing against a store with no readable document.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for
    /// this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        // Log every failure for operator visibility, loudest for the
        // classes whose detail the client never sees.
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::NotFound(_) => tracing::debug!(error = %self, "not found"),
            _ => tracing::warn!(error = %self, "request rejected"),
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert persistence errors to API errors.
///
/// Field validation failures and unreadable stores or rejected image
/// paths are client errors (400); positional misses are 404; raw I/O
/// failures are 500 and their detail stays server-side.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::MissingField { .. } => Self::Validation(err.to_string()),
            StoreError::IndexOutOfRange { .. } => Self::NotFound(err.to_string()),
            StoreError::Empty
            | StoreError::Decode(_)
            | StoreError::ForbiddenPath { .. }
            | StoreError::InvalidSuffix { .. } => Self::BadRequest(err.to_string()),
            StoreError::Io(_) => Self::Internal(err.to_string()),
        }
    }
}
