//! Error types for the Bookshelf HTTP API.
//!
//! Every failure leaves the server as a JSON body of the form
//!
//! ```json
//! {"error": {"status": 400, "code": "invalid", "message": "...", "outcome_unknown": false}}
//! ```
//!
//! # Error Mapping
//!
//! Storage errors from the persistence layer are mapped to HTTP status codes:
//!
//! | Storage Error | HTTP Status | Code |
//! |--------------|-------------|------|
//! | EmptyPatch | 400 | empty-patch |
//! | Serialization | 500 | serialization |
//! | Transport | 500 | transport |
//! | Interrupted | 500 | interrupted |
//!
//! A missing document is not a storage error; handlers answer it with
//! [`RestError::NotFound`] directly.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookshelf_persistence::error::StorageError;
use std::fmt;
use tracing::warn;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// A request parameter is missing or malformed (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// An update named no field to change (HTTP 400).
    EmptyPatch,

    /// The addressed document does not exist (HTTP 404).
    NotFound {
        /// The collection, as `index/doc_type`.
        collection: String,
        /// The requested id.
        id: String,
    },

    /// The engine failed or could not be reached (HTTP 500).
    Internal {
        /// Stable error code.
        code: &'static str,
        /// Error message.
        message: String,
        /// Whether a write may have been applied regardless.
        outcome_unknown: bool,
    },

    /// The engine is not fit to serve requests (HTTP 503).
    Unavailable {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Creates a [`RestError::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Returns the HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } | RestError::EmptyPatch => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::EmptyPatch => write!(f, "Bad request: no field to update"),
            RestError::NotFound { collection, id } => {
                write!(f, "Document not found: {}/{}", collection, id)
            }
            RestError::Internal { message, .. } => write!(f, "Internal error: {}", message),
            RestError::Unavailable { message } => write!(f, "Service unavailable: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, outcome_unknown) = match self {
            RestError::BadRequest { message } => ("invalid", message, false),
            RestError::EmptyPatch => (
                "empty-patch",
                "update requires at least one of title, author, word_count, public_date"
                    .to_string(),
                false,
            ),
            RestError::NotFound { collection, id } => (
                "not-found",
                format!("document '{}' not found in {}", id, collection),
                false,
            ),
            RestError::Internal {
                code,
                message,
                outcome_unknown,
            } => (code, message, outcome_unknown),
            RestError::Unavailable { message } => ("unavailable", message, false),
        };

        let body = serde_json::json!({
            "error": {
                "status": status.as_u16(),
                "code": code,
                "message": message,
                "outcome_unknown": outcome_unknown,
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        let outcome_unknown = err.outcome_unknown();
        let code = match &err {
            StorageError::EmptyPatch => return RestError::EmptyPatch,
            StorageError::Serialization { .. } => "serialization",
            StorageError::Transport { .. } => "transport",
            StorageError::Interrupted { .. } => "interrupted",
        };
        warn!(error = %err, outcome_unknown, "Storage operation failed");
        RestError::Internal {
            code,
            message: err.to_string(),
            outcome_unknown,
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
