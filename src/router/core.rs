//! Router core module - hot path for request routing.
//!
//! `resolve` and `handle` run once per request and only ever load the
//! current resolver snapshot; `add` publishes a new snapshot.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use crate::error::RouteError;
use crate::handler::{not_found, Body, Handler};
use crate::path::{
    join_name, join_prefix, normalize_prefix, split_name, strip_prefix, NAME_DELIMITER,
};
use crate::resolver::{Resolver, RouteInfo, RouteMatch};
use crate::route::Route;
use arc_swap::ArcSwap;
use http::{Request, Response};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Matching slower than this is logged at warn level
const SLOW_MATCH_THRESHOLD: Duration = Duration::from_millis(1);

#[derive(Clone)]
struct ResolverEntry {
    /// `name()` of the resolver when it was registered
    name: Arc<str>,
    resolver: Arc<dyn Resolver>,
}

/// Composite resolver: a prefix, a namespace and an ordered set of children
///
/// A router strips its prefix from incoming paths and asks each child in
/// registration order to resolve the remainder; the first child that
/// matches wins. If none does, the optional default route is returned
/// whether or not its pattern matches; its captures are attached when it
/// does.
///
/// Children are keyed by their `name()` as it was at registration. A
/// resolver whose name changes afterwards (only possible through interior
/// mutability in a custom [`Resolver`]) is not re-indexed; it stays
/// reachable under the old key.
///
/// # Concurrency
///
/// The child table is an immutable snapshot behind an [`ArcSwap`]. Readers
/// (`resolve`, `reverse`, `handle`) load it without locking; [`Router::add`]
/// copies the table, applies the change and swaps the new snapshot in, so it
/// is safe to register resolvers while requests are being served.
pub struct Router {
    prefix: String,
    namespace: String,
    default_route: Option<Route>,
    resolvers: ArcSwap<Vec<ResolverEntry>>,
}

impl Router {
    /// Create an empty router mounted at `prefix` under `namespace`
    ///
    /// The prefix is normalized to one leading `/` and no trailing `/`;
    /// `""` and `"/"` both mean the root.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidName`] if `namespace` contains `:`, and
    /// [`RouteError::InvalidPrefix`] if the prefix contains a `{param}`.
    pub fn new(prefix: &str, namespace: impl Into<String>) -> Result<Self, RouteError> {
        let namespace = namespace.into();
        if namespace.contains(NAME_DELIMITER) {
            return Err(RouteError::InvalidName { name: namespace });
        }
        if prefix.contains(['{', '}']) {
            return Err(RouteError::InvalidPrefix {
                prefix: prefix.to_string(),
            });
        }

        Ok(Self {
            prefix: normalize_prefix(prefix),
            namespace,
            default_route: None,
            resolvers: ArcSwap::from_pointee(Vec::new()),
        })
    }

    /// Build a router in one call from all of its parts
    ///
    /// Resolvers are registered in iteration order, so later entries
    /// replace earlier ones with the same name.
    ///
    /// # Errors
    ///
    /// Same as [`Router::new`].
    pub fn from_parts<I>(
        prefix: &str,
        namespace: impl Into<String>,
        default_route: Option<Route>,
        resolvers: I,
    ) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = Arc<dyn Resolver>>,
    {
        let mut router = Self::new(prefix, namespace)?;
        router.default_route = default_route;
        for resolver in resolvers {
            router.add_shared(resolver);
        }
        Ok(router)
    }

    /// Set the fallback route used when no child matches
    #[must_use]
    pub fn with_default_route(mut self, route: Route) -> Self {
        self.default_route = Some(route);
        self
    }

    /// Register a child and return the router, for construction chains
    #[must_use]
    pub fn with_resolver<R: Resolver + 'static>(self, resolver: R) -> Self {
        self.add(resolver);
        self
    }

    /// Register a child resolver under its `name()`
    ///
    /// A child already registered under the same name is replaced in place
    /// and keeps its position in the matching order. No check is made
    /// against the default route's name.
    pub fn add<R: Resolver + 'static>(&self, resolver: R) {
        self.add_shared(Arc::new(resolver));
    }

    /// Register a child resolver that is already behind an `Arc`
    pub fn add_shared(&self, resolver: Arc<dyn Resolver>) {
        let name: Arc<str> = Arc::from(resolver.name());

        let previous = self.resolvers.rcu(|current| {
            let mut next = Vec::clone(current);
            let entry = ResolverEntry {
                name: Arc::clone(&name),
                resolver: Arc::clone(&resolver),
            };
            match next.iter_mut().find(|e| e.name == entry.name) {
                Some(slot) => *slot = entry,
                None => next.push(entry),
            }
            next
        });

        if previous.iter().any(|e| e.name == name) {
            info!(
                router = %self.namespace,
                resolver = %name,
                "Resolver replaced"
            );
        } else {
            debug!(
                router = %self.namespace,
                prefix = %self.prefix,
                resolver = %name,
                "Resolver registered"
            );
        }
    }

    /// Normalized prefix, e.g. `/api/v1` or `/`
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn default_route(&self) -> Option<&Route> {
        self.default_route.as_ref()
    }

    /// Child registered under `name`, if any
    #[must_use]
    pub fn resolver(&self, name: &str) -> Option<Arc<dyn Resolver>> {
        self.resolvers
            .load()
            .iter()
            .find(|e| e.name.as_ref() == name)
            .map(|e| Arc::clone(&e.resolver))
    }

    /// Child names in matching order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.resolvers
            .load()
            .iter()
            .map(|e| e.name.to_string())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.load().is_empty()
    }

    /// Resolve a path that includes this router's prefix
    ///
    /// Returns `None` if the path is outside the prefix (segment-wise: `/api`
    /// never matches `/apiv2`), or if no child matches and there is no
    /// default route.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let Some(rest) = strip_prefix(&self.prefix, path) else {
            trace!(
                router = %self.namespace,
                prefix = %self.prefix,
                path = %path,
                "Path outside prefix"
            );
            return None;
        };

        let resolvers = self.resolvers.load();
        for entry in resolvers.iter() {
            if let Some(matched) = entry.resolver.resolve(&rest) {
                trace!(
                    router = %self.namespace,
                    resolver = %entry.name,
                    path = %rest,
                    "Child matched"
                );
                return Some(matched);
            }
        }

        if let Some(default_route) = &self.default_route {
            trace!(
                router = %self.namespace,
                path = %rest,
                route = %default_route.name(),
                "Falling back to default route"
            );
            return Some(RouteMatch {
                route: default_route.clone(),
                path_params: default_route
                    .pattern()
                    .captures(&rest)
                    .unwrap_or_default(),
            });
        }

        None
    }

    /// Rebuild a path from a name relative to this router
    ///
    /// The first `:`-segment of `name` selects a child; the rest is handed to
    /// that child. The child's path is then mounted under this router's
    /// prefix.
    ///
    /// # Returns
    ///
    /// * `Some(path)` - composed path, e.g. `/v1/users/7`
    /// * `None` - no child under the first segment, or the child could not
    ///   build its part (unknown deeper name or missing parameter)
    #[must_use]
    pub fn reverse(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        let (head, rest) = split_name(name);
        let resolvers = self.resolvers.load();
        let Some(entry) = resolvers.iter().find(|e| e.name.as_ref() == head) else {
            debug!(
                router = %self.namespace,
                name = %name,
                segment = %head,
                "Reverse lookup: no such resolver"
            );
            return None;
        };

        let Some(fragment) = entry.resolver.reverse(rest, params) else {
            debug!(
                router = %self.namespace,
                name = %name,
                resolver = %entry.name,
                "Reverse lookup failed in child"
            );
            return None;
        };

        Some(join_prefix(&self.prefix, &fragment))
    }

    /// Rebuild a path from a name qualified with this router's namespace
    ///
    /// `url_for("app:home", ..)` on a router with namespace `app` is
    /// `reverse("home", ..)`. Returns `None` if the first segment is not
    /// this router's namespace.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nestrouter::handler::EchoHandler;
    /// use nestrouter::{Route, Router};
    /// use std::collections::HashMap;
    ///
    /// let router = Router::new("/app", "app")
    ///     .unwrap()
    ///     .with_resolver(Route::new("home", "/", EchoHandler::new("home")).unwrap());
    /// assert_eq!(router.url_for("app:home", &HashMap::new()).as_deref(), Some("/app/"));
    /// ```
    #[must_use]
    pub fn url_for(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        let (head, rest) = split_name(name);
        if head != self.namespace {
            debug!(router = %self.namespace, name = %name, "Reverse lookup: namespace mismatch");
            return None;
        }
        self.reverse(rest, params)
    }

    /// Every leaf reachable by name, with names relative to this router
    #[must_use]
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.resolvers
            .load()
            .iter()
            .flat_map(|entry| {
                entry.resolver.routes().into_iter().map(move |info| RouteInfo {
                    name: join_name(&entry.name, &info.name),
                    path: join_prefix(&self.prefix, &info.path),
                })
            })
            .collect()
    }

    /// Log a summary of the routing table
    pub fn log_routes(&self) {
        let routes = self.routes();
        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|r| format!("{} -> {}", r.path, r.name))
            .collect();

        info!(
            routes_count = routes.len(),
            prefix = %self.prefix,
            namespace = %self.namespace,
            default_route = ?self.default_route.as_ref().map(|r| r.name()),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );
    }

    /// Dispatch a request to the route responsible for its path
    ///
    /// On a match the captured [`PathParams`](crate::handler::PathParams)
    /// are inserted into the request extensions before the route's handler
    /// runs. Parameters come from the match against the prefix-stripped
    /// path, so leaf patterns never see ancestor prefixes. Without a match
    /// the response is a bare `404 Not Found`.
    pub fn handle(&self, mut request: Request<Body>) -> Response<Body> {
        let match_start = Instant::now();
        let matched = self.resolve(request.uri().path());
        let match_duration = match_start.elapsed();

        let Some(RouteMatch { route, path_params }) = matched else {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                duration_us = match_duration.as_micros(),
                "No route matched"
            );
            return not_found();
        };

        if match_duration > SLOW_MATCH_THRESHOLD {
            warn!(
                path = %request.uri().path(),
                route = %route.name(),
                path_params = ?path_params,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            debug!(
                path = %request.uri().path(),
                route = %route.name(),
                path_params = ?path_params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        request.extensions_mut().insert(path_params);
        route.handler().call(request)
    }
}

impl Resolver for Router {
    fn name(&self) -> &str {
        &self.namespace
    }

    fn resolve(&self, path: &str) -> Option<RouteMatch> {
        Router::resolve(self, path)
    }

    fn reverse(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        Router::reverse(self, name, params)
    }

    fn routes(&self) -> Vec<RouteInfo> {
        Router::routes(self)
    }
}

impl Handler for Router {
    fn call(&self, request: Request<Body>) -> Response<Body> {
        self.handle(request)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("prefix", &self.prefix)
            .field("namespace", &self.namespace)
            .field("default_route", &self.default_route)
            .field("resolvers", &self.names())
            .finish()
    }
}
