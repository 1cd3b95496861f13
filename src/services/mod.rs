//! Business logic services.
//!
//! Services sit between HTTP handlers and the key store. They own locking,
//! not-found handling and logging.

pub mod api_key_service;
