//! Endpoint discovery handler.

use std::collections::BTreeMap;

use axum::{Json, extract::State};

use crate::state::AppState;

/// List every registered route with its methods.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "/": ["GET"],
///   "/api/apikey/": ["GET", "POST", "OPTIONS"],
///   "/health/": ["GET"]
/// }
/// ```
pub async fn list_endpoints(State(state): State<AppState>) -> Json<BTreeMap<String, Vec<String>>> {
    Json(state.endpoints.snapshot())
}
