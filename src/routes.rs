//! Router assembly.
//!
//! Every route is declared through [`EndpointRouter`] so the discovery
//! endpoint reports exactly what is served.

use axum::{
    Router,
    http::{HeaderName, Method, StatusCode, header},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers,
    registry::{EndpointRouter, Verb},
    state::AppState,
    store::KeyStore,
};

/// Declare every route of the service.
///
/// Key routes also answer bare `OPTIONS` requests, and list `OPTIONS` among
/// their methods.
pub fn endpoint_router() -> EndpointRouter<AppState> {
    use handlers::{api_keys, endpoints, health};

    EndpointRouter::new()
        // Key management
        .route("/api/apikey/", Verb::Get, api_keys::list_api_keys)
        .route("/api/apikey/", Verb::Post, api_keys::create_api_key)
        .route("/api/apikey/", Verb::Options, api_keys::options)
        .route("/api/apikey/{id}/", Verb::Get, api_keys::get_api_key)
        .route("/api/apikey/{id}/", Verb::Delete, api_keys::delete_api_key)
        .route("/api/apikey/{id}/", Verb::Options, api_keys::options)
        .route(
            "/api/apikey/{id}/archive/",
            Verb::Patch,
            api_keys::archive_api_key,
        )
        .route("/api/apikey/{id}/archive/", Verb::Options, api_keys::options)
        .route(
            "/api/apikey/authenticate/",
            Verb::Post,
            api_keys::authenticate_api_key,
        )
        .route("/api/apikey/authenticate/", Verb::Options, api_keys::options)
        // Service routes
        .route("/health/", Verb::Get, health::health_check)
        .route("/", Verb::Get, endpoints::list_endpoints)
}

/// Cross-origin policy: any origin, the methods the service serves and the
/// headers browser clients send.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
        ])
}

/// Build the complete application around `store`.
pub fn build_app(store: KeyStore, config: &Config) -> Router {
    let (router, registry) = endpoint_router().finish();
    tracing::debug!(endpoints = registry.len(), "Endpoints registered");

    let state = AppState::new(store, registry);

    let app = router.with_state(state).layer(
        ServiceBuilder::new()
            // Access log for every request
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                config.request_timeout(),
            )),
    );

    if config.cors_enabled {
        app.layer(cors_layer())
    } else {
        app
    }
}
