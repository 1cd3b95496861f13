//! Data models exchanged with clients and held by the key store.

/// API key record and request payloads
pub mod api_key;
/// Go-compatible zero-value timestamp encoding
pub mod timestamp;
