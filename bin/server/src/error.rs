//! Error responses for the HTTP API.
//!
//! Every failure leaves the server as a JSON body `{"error": "..."}`. Internal
//! details are logged and never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notekeep_core::StoreError;
use notekeep_notes::NoteError;
use rootcause::Report;
use serde_json::json;
use std::fmt;

/// Errors returned by API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// No valid session accompanied the request.
    NotAuthenticated,
    /// The request body failed validation.
    Validation { message: String },
    /// The resource does not exist or is not owned by the caller.
    NotFound,
    /// Storage or other server-side failure.
    Internal { details: String },
}

impl ApiError {
    /// Wraps a validation message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Wraps a storage failure report.
    pub fn storage(report: Report<StoreError>) -> Self {
        Self::Internal {
            details: report.to_string(),
        }
    }

    /// Wraps any other internal failure.
    pub fn internal(details: impl fmt::Display) -> Self {
        Self::Internal {
            details: details.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::Validation { message } => write!(f, "validation failed: {}", message),
            Self::NotFound => write!(f, "not found"),
            Self::Internal { details } => write!(f, "internal error: {}", details),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::EmptyText => Self::validation("Empty note"),
            NoteError::NulCharacter => Self::validation("Invalid note text"),
            NoteError::NotFound { .. } => Self::NotFound,
            NoteError::Storage(report) => Self::storage(report),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Not authenticated".to_string()),
            Self::Validation { message } => (StatusCode::BAD_REQUEST, message),
            Self::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            Self::Internal { details } => {
                tracing::error!(error = %details, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
