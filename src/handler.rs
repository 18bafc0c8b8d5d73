//! # Handler Module
//!
//! Terminal request processing for matched routes.
//!
//! A [`Handler`] turns an `http::Request<Body>` into an `http::Response<Body>`.
//! Closures with that signature are handlers, and so is every
//! [`Router`](crate::router::Router), which is what lets a router sit behind
//! any host server that can hand it `http` types.
//!
//! ## Path parameters
//!
//! When a router dispatches a request it attaches the captured
//! [`PathParams`] to the request extensions. The extension is keyed by the
//! `PathParams` type itself, so it never collides with values other layers
//! store on the same request:
//!
//! ```rust
//! use nestrouter::handler::{Body, RequestExt};
//! use http::{Request, Response};
//!
//! fn get_user(req: Request<Body>) -> Response<Body> {
//!     let id = req.path_param("id").unwrap_or("unknown");
//!     Response::new(format!("user {id}").into_bytes())
//! }
//! ```

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Request, Response, StatusCode};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Request and response body type used throughout the router
pub type Body = Vec<u8>;

/// Maximum number of path parameters before heap allocation.
/// Most REST paths carry ≤4 parameters (e.g., /users/{id}/posts/{post_id}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because they come from the compiled route
/// (known at construction) and are shared by every match of that route.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Terminal request processor owned by a [`Route`](crate::route::Route)
pub trait Handler: Send + Sync {
    /// Process a request whose path has already been resolved
    fn call(&self, request: Request<Body>) -> Response<Body>;
}

impl<F> Handler for F
where
    F: Fn(Request<Body>) -> Response<Body> + Send + Sync,
{
    fn call(&self, request: Request<Body>) -> Response<Body> {
        self(request)
    }
}

/// Bare `404 Not Found` with an empty body
#[must_use]
pub fn not_found() -> Response<Body> {
    let mut response = Response::new(Body::new());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Named path parameters captured by a route match
///
/// Parameters keep the order of the pattern's capture groups. Lookups use
/// "last write wins" semantics should a name ever appear twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(ParamVec);

impl PathParams {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self(ParamVec::new())
    }

    /// Append a captured parameter
    pub fn push(&mut self, name: Arc<str>, value: String) {
        self.0.push((name, value));
    }

    /// Get a parameter by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in capture order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to a HashMap
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Access to the [`PathParams`] a router attached to a request
pub trait RequestExt {
    /// All captured parameters, if the request went through a router
    fn path_params(&self) -> Option<&PathParams>;

    /// A single captured parameter by name
    fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params().and_then(|params| params.get(name))
    }
}

impl<B> RequestExt for Request<B> {
    fn path_params(&self) -> Option<&PathParams> {
        self.extensions().get::<PathParams>()
    }
}

/// Handler that echoes the matched route back as JSON
///
/// Used by the CLI `dispatch` command and handy as a placeholder while
/// wiring a routing tree. The response looks like
/// `{"route": "users", "path": "/v1/users/7", "params": {"id": "7"}}`.
#[derive(Debug, Clone)]
pub struct EchoHandler {
    route: String,
}

impl EchoHandler {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }
}

impl Handler for EchoHandler {
    fn call(&self, request: Request<Body>) -> Response<Body> {
        let params: serde_json::Map<String, serde_json::Value> = request
            .path_params()
            .map(|params| {
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let body = serde_json::json!({
            "route": self.route,
            "path": request.uri().path(),
            "params": params,
        });

        let mut response = Response::new(serde_json::to_vec(&body).unwrap_or_default());
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
