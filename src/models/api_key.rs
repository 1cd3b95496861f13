//! API key model and request payloads.
//!
//! An API key is identified by its integer id and by its content token,
//! which is derived from the id and therefore unique as well.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Fixed suffix appended to every content token.
pub const CONTENT_SUFFIX: &str = "-xx-yy";

/// Build the content token for `id`: zero-padded to four digits followed by
/// [`CONTENT_SUFFIX`], e.g. `0007-xx-yy`.
pub fn format_content(id: i64) -> String {
    format!("{id:04}{CONTENT_SUFFIX}")
}

/// Represents an API key record held by the key store.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 8,
///   "user_id": 17,
///   "api_key": "0008-xx-yy",
///   "time_created": "2025-12-20T10:00:00.123456789Z",
///   "time_last_used": "0001-01-01T00:00:00Z",
///   "time_archived": "0001-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Store-assigned identifier, never reused
    pub id: i64,

    /// Owning user; not checked against anything
    pub user_id: i64,

    /// Token derived from `id` with [`format_content`]
    #[serde(rename = "api_key")]
    pub content: String,

    #[serde(rename = "time_created", with = "timestamp", default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Set by authentication
    #[serde(rename = "time_last_used", with = "timestamp", default)]
    pub last_used_at: Option<DateTime<Utc>>,

    /// Set by archiving. An archived key stays live and queryable.
    #[serde(rename = "time_archived", with = "timestamp", default)]
    pub archived_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// A record with content derived from `id` and no timestamps set.
    pub fn new(id: i64, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            content: format_content(id),
            created_at: None,
            last_used_at: None,
            archived_at: None,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Request body for creating a new API key.
///
/// Any `id`, `api_key` or `time_created` in the body is ignored; the store
/// assigns those. The remaining fields are taken as given.
///
/// # JSON Example
///
/// ```json
/// {
///   "user_id": 42
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct NewApiKey {
    #[serde(default)]
    pub user_id: i64,

    #[serde(rename = "time_last_used", with = "timestamp", default)]
    pub last_used_at: Option<DateTime<Utc>>,

    #[serde(rename = "time_archived", with = "timestamp", default)]
    pub archived_at: Option<DateTime<Utc>>,
}

/// Request body for authenticating with a key's content.
///
/// A missing `api_key` field is read as the empty string, which never
/// matches a record.
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    #[serde(rename = "api_key", default)]
    pub content: String,
}

/// Body of the health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerStatus {
    pub message: String,
    pub failures: Vec<String>,
}

impl ServerStatus {
    pub fn ok() -> Self {
        Self {
            message: "OK".to_string(),
            failures: Vec::new(),
        }
    }
}
