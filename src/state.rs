//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    registry::EndpointRegistry,
    store::{KeyStore, SharedStore},
};

/// State extracted by handlers with `State<AppState>`.
///
/// Cloning is cheap: both fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// API key records
    pub store: SharedStore,

    /// Routes and their methods, fixed once the router is built
    pub endpoints: Arc<EndpointRegistry>,
}

impl AppState {
    pub fn new(store: KeyStore, endpoints: EndpointRegistry) -> Self {
        Self {
            store: store.into_shared(),
            endpoints: Arc::new(endpoints),
        }
    }
}
