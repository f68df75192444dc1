//! Error responses for the API layer
//!
//! Every failure leaves the server as `{"error": "..."}` with a status code
//! chosen from the core error kind:
//!
//! | Error | Status |
//! |-------|--------|
//! | `Validation` | 400 |
//! | `Conflict` | 400 |
//! | `NotFound` | 404 |
//! | anything else | 500 |

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use phonebook_core::{Error, ErrorBody};
use tracing::error;

/// An error on its way to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// Create an error with an explicit status
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody::new(message),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 404 for an id that matches no entry
    pub fn person_not_found() -> Self {
        Self::not_found("Person not found")
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The response status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response body
    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(message) | Error::Conflict(message) => Self::bad_request(message),
            Error::NotFound(message) => Self::not_found(message),
            other => {
                error!("Unhandled store error: {}", other);
                Self::internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
