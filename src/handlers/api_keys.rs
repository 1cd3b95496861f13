//! API key HTTP handlers.
//!
//! This module implements the key management endpoints:
//! - GET /api/apikey/ - List keys, optionally filtered by `user_id`
//! - POST /api/apikey/ - Create a key
//! - GET /api/apikey/{id}/ - Get a key by id
//! - DELETE /api/apikey/{id}/ - Delete a key
//! - PATCH /api/apikey/{id}/archive/ - Archive a key
//! - POST /api/apikey/authenticate/ - Authenticate with a key's content
//!
//! Bodies are decoded as JSON whatever the `Content-Type` header says.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::api_key::{ApiKey, AuthenticateRequest, NewApiKey},
    services::api_key_service,
    state::AppState,
    store::KeyFilter,
};

/// List API keys.
///
/// # Query Parameters
///
/// - `user_id` (optional): only keys owned by this user. A value that is not
///   an integer is ignored and every key is returned.
///
/// # Response
///
/// - **Success (200 OK)**: array of keys in creation order (may be empty)
pub async fn list_api_keys(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Vec<ApiKey>> {
    let filter = KeyFilter::from_query_pairs(params);
    Json(api_key_service::list_api_keys(&state.store, &filter).await)
}

/// Create a new API key.
///
/// # Request Body
///
/// ```json
/// {
///   "user_id": 42
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: the stored key with its assigned id and content
/// - **Error (500)**: body is not a valid key payload
pub async fn create_api_key(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request: NewApiKey =
        serde_json::from_slice(&body).map_err(|e| AppError::MalformedPayload(e.to_string()))?;

    let key = api_key_service::create_api_key(&state.store, request).await;

    Ok((StatusCode::CREATED, Json(key)))
}

/// Get a specific API key by id.
///
/// # Response
///
/// - **Success (200 OK)**: the key
/// - **Error (400)**: id is not an integer
/// - **Error (404)**: no such key
pub async fn get_api_key(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiKey>, AppError> {
    let id = parse_api_key_id(&raw_id)?;
    let key = api_key_service::get_api_key(&state.store, id).await?;

    Ok(Json(key))
}

/// Delete an API key.
///
/// # Response
///
/// - **Success (204 No Content)**
/// - **Error (400)**: id is not an integer
/// - **Error (404)**: no such key
pub async fn delete_api_key(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_api_key_id(&raw_id)?;
    api_key_service::delete_api_key(&state.store, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Archive an API key.
///
/// Sets `time_archived`; every other field is left as it was.
///
/// # Response
///
/// - **Success (204 No Content)**
/// - **Error (400)**: id is not an integer
/// - **Error (404)**: no such key
pub async fn archive_api_key(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_api_key_id(&raw_id)?;
    api_key_service::archive_api_key(&state.store, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Authenticate with a key's content.
///
/// # Request Body
///
/// ```json
/// {
///   "api_key": "0001-xx-yy"
/// }
/// ```
///
/// # Response
///
/// - **Success (204 No Content)**: key exists, `time_last_used` updated
/// - **Error (400)**: body is not valid JSON
/// - **Error (404)**: no key with this content
pub async fn authenticate_api_key(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let request: AuthenticateRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    api_key_service::authenticate_api_key(&state.store, &request.content).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Answer a plain `OPTIONS` request on a key route.
///
/// Returns immediately with no body. When the CORS layer is attached it
/// answers every `OPTIONS` request itself and this handler is not reached.
pub async fn options() -> StatusCode {
    StatusCode::OK
}

fn parse_api_key_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::InvalidRequest(format!("invalid api key id: {raw:?}")))
}
