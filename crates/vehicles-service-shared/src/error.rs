//! Error envelope returned by every vehicle endpoint.
//!
//! ```json
//! {"status": "Not Found", "message": "vehicles not found"}
//! ```
//!
//! `status` is the canonical reason phrase of the HTTP status code the
//! response is sent with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use vehicles_lib::Error as LibError;

/// Message sent when a query matched no vehicles.
pub const MESSAGE_VEHICLES_NOT_FOUND: &str = "vehicles not found";

/// Message sent for unexpected failures; internal details stay in the logs.
pub const MESSAGE_INTERNAL_ERROR: &str = "internal server error";

/// JSON error body with the HTTP status it is served under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Reason phrase of the status code, e.g. "Bad Request".
    pub status: String,

    /// Human-readable explanation, e.g. "invalid year".
    pub message: String,

    #[serde(skip)]
    code: u16,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
            message: message.into(),
            code: status.as_u16(),
        }
    }

    /// 400 for a malformed request parameter.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 for a query that matched nothing.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 for anything the service did not anticipate.
    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MESSAGE_INTERNAL_ERROR)
    }

    /// The HTTP status this body is served under.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Translate a library error into its HTTP representation.
///
/// This is the only place domain errors become status codes.
pub fn from_lib_error(error: &LibError) -> ErrorResponse {
    match error {
        LibError::NoVehicles => ErrorResponse::not_found(MESSAGE_VEHICLES_NOT_FOUND),
        _ => ErrorResponse::internal_error(),
    }
}
