//! # Route Table Configuration
//!
//! Declarative description of a routing tree, loaded from YAML, TOML or JSON
//! and turned into a [`Router`] once handlers have been chosen for each leaf.
//!
//! ## Format
//!
//! ```yaml
//! prefix: /
//! namespace: root
//! default_route: { name: fallback, pattern: / }
//! resolvers:
//!   - route: { name: home, pattern: / }
//!   - router:
//!       prefix: /v1
//!       namespace: v1
//!       resolvers:
//!         - route: { name: users, pattern: "/users/{id}" }
//! ```
//!
//! Resolvers are registered in file order, which is also the matching
//! order. In YAML each resolver is a single-key map (`route:` or `router:`)
//! rather than a `!route` tag.

use crate::error::RouteError;
use crate::handler::Handler;
use crate::route::Route;
use crate::router::Router;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A leaf route entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub name: String,
    pub pattern: String,
}

/// A router entry and its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub default_route: Option<RouteConfig>,
    #[serde(default)]
    pub resolvers: Vec<ResolverConfig>,
}

/// One child of a router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverConfig {
    Route(RouteConfig),
    Router(RouterConfig),
}

impl RouteConfig {
    fn build<F>(&self, handler_for: &mut F) -> Result<Route, RouteError>
    where
        F: FnMut(&RouteConfig) -> Arc<dyn Handler>,
    {
        Route::with_shared_handler(&self.name, &self.pattern, handler_for(self))
    }
}

impl RouterConfig {
    /// Parse a YAML route table
    ///
    /// Resolver entries use the single-key map form shown in the module docs.
    ///
    /// # Errors
    ///
    /// Any `serde_yaml` parse error.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let deserializer = serde_yaml::Deserializer::from_str(content);
        serde_yaml::with::singleton_map_recursive::deserialize(deserializer)
    }

    /// Build the routing tree, asking `handler_for` for each leaf's handler
    ///
    /// # Errors
    ///
    /// The first [`RouteError`] hit while building any level of the tree.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nestrouter::config::RouterConfig;
    /// use nestrouter::handler::{EchoHandler, Handler};
    /// use std::sync::Arc;
    ///
    /// let config = RouterConfig::from_yaml(
    ///     "prefix: /app\nnamespace: app\nresolvers:\n  - route: { name: home, pattern: / }\n",
    /// )
    /// .unwrap();
    /// let router = config
    ///     .build(|route| Arc::new(EchoHandler::new(&route.name)) as Arc<dyn Handler>)
    ///     .unwrap();
    /// assert!(router.resolve("/app").is_some());
    /// ```
    pub fn build<F>(&self, mut handler_for: F) -> Result<Router, RouteError>
    where
        F: FnMut(&RouteConfig) -> Arc<dyn Handler>,
    {
        self.build_with(&mut handler_for)
    }

    fn build_with<F>(&self, handler_for: &mut F) -> Result<Router, RouteError>
    where
        F: FnMut(&RouteConfig) -> Arc<dyn Handler>,
    {
        let mut router = Router::new(&self.prefix, self.namespace.as_str())?;
        if let Some(default_route) = &self.default_route {
            router = router.with_default_route(default_route.build(handler_for)?);
        }
        for resolver in &self.resolvers {
            match resolver {
                ResolverConfig::Route(route) => router.add(route.build(handler_for)?),
                ResolverConfig::Router(child) => router.add(child.build_with(handler_for)?),
            }
        }
        Ok(router)
    }
}

/// Load a routing tree description, picking the format from the extension
///
/// `.yaml`/`.yml` use [`RouterConfig::from_yaml`], `.toml` uses `toml`, `.json` uses
/// `serde_json`.
///
/// # Errors
///
/// Fails if the file cannot be read, has an unknown extension, or does not
/// parse.
pub fn load_router_config(path: &Path) -> Result<RouterConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route config {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let config: RouterConfig = match extension.as_str() {
        "yaml" | "yml" => RouterConfig::from_yaml(&content)
            .with_context(|| format!("Failed to parse YAML route config {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML route config {}", path.display()))?,
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON route config {}", path.display()))?,
        other => bail!(
            "Unsupported route config extension '{}' for {} (expected yaml, yml, toml or json)",
            other,
            path.display()
        ),
    };

    info!(
        path = %path.display(),
        prefix = %config.prefix,
        namespace = %config.namespace,
        resolvers = config.resolvers.len(),
        "Route config loaded"
    );

    Ok(config)
}
