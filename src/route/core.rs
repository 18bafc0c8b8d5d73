use super::pattern::PathPattern;
use crate::error::RouteError;
use crate::handler::Handler;
use crate::path::NAME_DELIMITER;
use crate::resolver::{Resolver, RouteInfo, RouteMatch};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Leaf resolver: a path pattern bound to a terminal handler
///
/// Routes are immutable once built. Cloning is an `Arc` bump, so a
/// [`RouteMatch`] can carry the route it matched without copying the
/// compiled pattern.
#[derive(Clone)]
pub struct Route {
    inner: Arc<RouteInner>,
}

struct RouteInner {
    name: String,
    pattern: PathPattern,
    handler: Arc<dyn Handler>,
}

impl Route {
    /// Create a route named `name` matching `pattern`
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidName`] if `name` contains `:`, and
    /// [`RouteError::InvalidPattern`] if the pattern does not compile.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nestrouter::handler::Body;
    /// use nestrouter::route::Route;
    /// use http::{Request, Response};
    ///
    /// let route = Route::new("user", "/users/{id}", |_req: Request<Body>| {
    ///     Response::new(Body::new())
    /// })
    /// .unwrap();
    /// assert_eq!(route.groups("/users/42")["id"], "42");
    /// ```
    pub fn new<H>(name: impl Into<String>, pattern: &str, handler: H) -> Result<Self, RouteError>
    where
        H: Handler + 'static,
    {
        Self::with_shared_handler(name, pattern, Arc::new(handler))
    }

    /// Create a route around a handler that is shared with other routes
    ///
    /// # Errors
    ///
    /// Same as [`Route::new`].
    pub fn with_shared_handler(
        name: impl Into<String>,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<Self, RouteError> {
        let name = name.into();
        if name.contains(NAME_DELIMITER) {
            return Err(RouteError::InvalidName { name });
        }
        let pattern = PathPattern::compile(pattern)?;

        debug!(
            route = %name,
            pattern = %pattern.template(),
            regex = %pattern.regex(),
            "Route compiled"
        );

        Ok(Self {
            inner: Arc::new(RouteInner {
                name,
                pattern,
                handler,
            }),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The compiled pattern
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.inner.pattern
    }

    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        self.inner.pattern.param_names()
    }

    #[must_use]
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.inner.handler
    }

    /// Named captures for `path`, or an empty map if it does not match
    ///
    /// `path` must be relative to the router the route is registered in,
    /// i.e. with every ancestor prefix already stripped.
    #[must_use]
    pub fn groups(&self, path: &str) -> HashMap<String, String> {
        self.inner
            .pattern
            .captures(path)
            .map(|params| params.to_map())
            .unwrap_or_default()
    }

    /// True when both values are the same route instance
    #[must_use]
    pub fn ptr_eq(&self, other: &Route) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Resolver for Route {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path_params = self.inner.pattern.captures(path)?;
        Some(RouteMatch {
            route: self.clone(),
            path_params,
        })
    }

    /// Leaves have nothing to delegate to: any remaining name fails.
    fn reverse(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        if !name.is_empty() {
            return None;
        }
        self.inner.pattern.expand(params)
    }

    fn routes(&self) -> Vec<RouteInfo> {
        vec![RouteInfo {
            name: String::new(),
            path: self.inner.pattern.template(),
        }]
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.inner.name)
            .field("pattern", &self.inner.pattern.template())
            .finish_non_exhaustive()
    }
}
