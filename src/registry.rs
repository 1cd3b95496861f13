//! Endpoint discovery.
//!
//! [`EndpointRouter`] wraps an axum [`Router`] and records every
//! `(path, method)` pair as the route is added. The resulting
//! [`EndpointRegistry`] is what `GET /` reports.

use std::collections::BTreeMap;

use axum::{
    Router,
    handler::Handler,
    routing::{MethodFilter, on},
};
use serde::Serialize;

/// HTTP methods a route can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
    Options,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Options => "OPTIONS",
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Delete => MethodFilter::DELETE,
            Verb::Options => MethodFilter::OPTIONS,
        }
    }
}

/// Path template → methods registered for it.
///
/// Serializes as a plain JSON object, e.g.
/// `{"/health/": ["GET"], "/api/apikey/": ["GET", "POST", "OPTIONS"]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EndpointRegistry {
    endpoints: BTreeMap<String, Vec<String>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the methods for `path`. Registering a path again replaces its
    /// method list; lists are never merged.
    pub fn register<I, M>(&mut self, path: impl Into<String>, methods: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let methods = methods.into_iter().map(Into::into).collect();
        self.endpoints.insert(path.into(), methods);
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.endpoints.get(path).map(Vec::as_slice)
    }

    /// Copy of every registered path and its methods.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<String>> {
        self.endpoints.clone()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Router builder that keeps a dispatch table keyed by path and method.
///
/// Each call to [`route`](Self::route) binds one handler to one method on
/// one path. Methods for the same path accumulate in the order they are
/// added and are registered once, in [`finish`](Self::finish).
pub struct EndpointRouter<S> {
    router: Router<S>,
    routes: BTreeMap<String, Vec<Verb>>,
}

impl<S> Default for EndpointRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> EndpointRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            routes: BTreeMap::new(),
        }
    }

    /// Bind `handler` to `verb` on `path`.
    ///
    /// # Panics
    ///
    /// Panics (inside axum) if the same `(path, verb)` pair is bound twice.
    pub fn route<H, T>(mut self, path: &str, verb: Verb, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.router = self.router.route(path, on(verb.filter(), handler));
        self.routes.entry(path.to_string()).or_default().push(verb);
        self
    }

    /// Bind the same handler to several methods on `path`.
    pub fn route_many<H, T>(mut self, path: &str, verbs: &[Verb], handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        for &verb in verbs {
            self = self.route(path, verb, handler.clone());
        }
        self
    }

    /// The assembled router and the registry describing it.
    pub fn finish(self) -> (Router<S>, EndpointRegistry) {
        let mut registry = EndpointRegistry::new();
        for (path, verbs) in self.routes {
            registry.register(path, verbs.into_iter().map(Verb::as_str));
        }
        (self.router, registry)
    }
}
