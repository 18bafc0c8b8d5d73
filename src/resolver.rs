//! # Resolver Module
//!
//! The capability shared by leaf [`Route`]s and composite
//! [`Router`](crate::router::Router)s. Because routers are resolvers, a
//! router can be registered inside another router, and forward resolution
//! and reverse lookup recurse through the tree.
//!
//! Names handed to [`Resolver::reverse`] are relative: the caller has
//! already consumed the segment naming this resolver. For a tree
//! `root -> v1 -> users`, `root.reverse("v1:users", ..)` hands `"users"` to
//! the `v1` router, which hands `""` to the `users` route.

use crate::handler::PathParams;
use crate::route::Route;
use std::collections::HashMap;
use std::sync::Arc;

/// Result of successfully resolving a path to a leaf route
#[derive(Clone)]
pub struct RouteMatch {
    /// The leaf route responsible for the path
    pub route: Route,
    /// Parameters captured from the path the route was matched against
    pub path_params: PathParams,
}

impl RouteMatch {
    /// Get a path parameter by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name)
    }
}

impl std::fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route", &self.route.name())
            .field("path_params", &self.path_params)
            .finish()
    }
}

/// A reachable leaf route as seen from some resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Colon-delimited name accepted by that resolver's `reverse`
    pub name: String,
    /// Full path template with every prefix below that resolver applied
    pub path: String,
}

/// Something that can match paths and rebuild them from names
pub trait Resolver: Send + Sync {
    /// Identifier used as the key under a parent router and as the name
    /// token in reverse lookups. Must not contain `:`.
    fn name(&self) -> &str;

    /// Resolve an absolute path, already stripped of ancestor prefixes
    fn resolve(&self, path: &str) -> Option<RouteMatch>;

    /// Rebuild the path for a relative name
    ///
    /// Returns `None` when the name does not lead to a route or when the
    /// leaf route is missing a required parameter.
    fn reverse(&self, name: &str, params: &HashMap<String, String>) -> Option<String>;

    /// Enumerate the leaf routes reachable by name through this resolver
    fn routes(&self) -> Vec<RouteInfo> {
        Vec::new()
    }
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&self, path: &str) -> Option<RouteMatch> {
        (**self).resolve(path)
    }

    fn reverse(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        (**self).reverse(name, params)
    }

    fn routes(&self) -> Vec<RouteInfo> {
        (**self).routes()
    }
}
