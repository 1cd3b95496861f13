//! API key service.
//!
//! Thin layer between handlers and the [`KeyStore`](crate::store::KeyStore):
//! takes the lock for exactly one store call, turns misses into
//! [`AppError::ApiKeyNotFound`] and logs every mutation.

use tracing::{debug, info};

use crate::error::AppError;
use crate::models::api_key::{ApiKey, NewApiKey};
use crate::store::{KeyFilter, SharedStore};

/// List keys matching `filter`, in insertion order.
///
/// Never fails; an empty list is a valid result.
pub async fn list_api_keys(store: &SharedStore, filter: &KeyFilter) -> Vec<ApiKey> {
    store.read().await.list_filtered(filter)
}

/// Fetch one key by id.
///
/// # Errors
///
/// - `ApiKeyNotFound`: no key has this id
pub async fn get_api_key(store: &SharedStore, id: i64) -> Result<ApiKey, AppError> {
    let key = store.read().await.find_by_id(id).cloned();

    key.ok_or_else(|| {
        debug!(id, "API key lookup missed");
        AppError::ApiKeyNotFound
    })
}

/// Create a key. The store assigns id, content and creation time.
pub async fn create_api_key(store: &SharedStore, request: NewApiKey) -> ApiKey {
    let key = store.write().await.create(request);
    info!(id = key.id, user_id = key.user_id, "Created API key");
    key
}

/// Delete a key by id.
///
/// # Errors
///
/// - `ApiKeyNotFound`: no key has this id
pub async fn delete_api_key(store: &SharedStore, id: i64) -> Result<(), AppError> {
    if !store.write().await.delete(id) {
        debug!(id, "Delete of unknown API key");
        return Err(AppError::ApiKeyNotFound);
    }

    info!(id, "Deleted API key");
    Ok(())
}

/// Mark a key as archived. The key stays listed and fetchable.
///
/// # Errors
///
/// - `ApiKeyNotFound`: no key has this id
pub async fn archive_api_key(store: &SharedStore, id: i64) -> Result<(), AppError> {
    if !store.write().await.archive(id) {
        debug!(id, "Archive of unknown API key");
        return Err(AppError::ApiKeyNotFound);
    }

    info!(id, "Archived API key");
    Ok(())
}

/// Confirm a key exists by its content and record the use.
///
/// # Errors
///
/// - `ApiKeyNotFound`: no key has this content
pub async fn authenticate_api_key(store: &SharedStore, content: &str) -> Result<(), AppError> {
    if !store.write().await.touch_last_used(content) {
        debug!("Authentication with unknown API key");
        return Err(AppError::ApiKeyNotFound);
    }

    info!("Authenticated API key");
    Ok(())
}
