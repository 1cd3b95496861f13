//! Health check endpoint for service monitoring.

use axum::Json;

use crate::models::api_key::ServerStatus;

/// Health check handler.
///
/// The store lives in process memory, so there is nothing external to
/// probe; reaching this handler means the service is up.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "message": "OK",
///   "failures": []
/// }
/// ```
pub async fn health_check() -> Json<ServerStatus> {
    Json(ServerStatus::ok())
}
