//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Message returned for every lookup miss, by id or by content.
pub const API_KEY_NOT_FOUND: &str = "404 api key not found";

/// Application-wide error type.
///
/// Every variant is terminal for the request: there are no retries and no
/// partial success. Filter parsing failures on the list endpoint are not
/// errors and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request path or body is invalid (non-integer id, malformed
    /// authenticate payload).
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// No record matches the requested id or content.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("404 api key not found")]
    ApiKeyNotFound,

    /// The create payload could not be decoded.
    ///
    /// Returns HTTP 500 Internal Server Error. A malformed create body is
    /// reported as a server error while a malformed authenticate body is a
    /// client error; clients already depend on this split.
    #[error("Malformed payload")]
    MalformedPayload(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `ApiKeyNotFound` → 404 Not Found
/// - `MalformedPayload` → 500 Internal Server Error
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg),
            AppError::ApiKeyNotFound => (
                StatusCode::NOT_FOUND,
                "api_key_not_found",
                API_KEY_NOT_FOUND.to_string(),
            ),
            AppError::MalformedPayload(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "malformed_payload",
                msg,
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
