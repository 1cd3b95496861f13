//! keyauth - in-memory API key service.
//!
//! A REST API for creating, listing, fetching, deleting, archiving and
//! authenticating API keys. Keys live in process memory only.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: ordered in-memory store behind a tokio `RwLock`
//! - **Discovery**: every route is recorded in an endpoint registry served at `/`
//! - **Format**: JSON requests/responses

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;
pub use routes::build_app;
pub use store::KeyStore;
