//! # nestrouter
//!
//! **nestrouter** is a hierarchical URL-path router. Routers nest other
//! routers under a path prefix and a namespace, forming a tree that is walked
//! in both directions:
//!
//! - **Forward**: a request path is resolved to a leaf [`Route`], its named
//!   parameters are captured, and the route's handler is invoked with the
//!   parameters attached to the request.
//! - **Reverse**: a colon-delimited route name such as `"v1:users"` plus a
//!   parameter map is turned back into the path that would route to it, so
//!   links never hard-code paths.
//!
//! ## Architecture
//!
//! - **[`resolver`]** - the [`Resolver`] trait shared by routes and routers
//! - **[`route`]** - leaf routes: compiled `{param}` patterns and handlers
//! - **[`router`]** - prefix/namespace composition, fallback, dispatch
//! - **[`handler`]** - the [`Handler`] contract, [`PathParams`] and echo handler
//! - **[`config`]** - route tables loaded from YAML, TOML or JSON
//! - **[`logging`]** - `tracing-subscriber` setup for binaries
//! - **[`cli`]** - the `nestrouter` command-line tool
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host HTTP server
//!     participant Root as Router "/"
//!     participant V1 as Router "/v1"
//!     participant Leaf as Route "/users/{id}"
//!     participant Handler
//!
//!     Host->>Root: handle(GET /v1/users/7)
//!     Root->>Root: strip "/" → "/v1/users/7"
//!     Root->>V1: resolve("/v1/users/7")
//!     V1->>V1: strip "/v1" → "/users/7"
//!     V1->>Leaf: resolve("/users/7")
//!     Leaf-->>Root: RouteMatch { id = "7" }
//!     Root->>Handler: request + PathParams
//!     Handler-->>Host: Response
//!
//!     alt No Route Match
//!         Root-->>Host: 404 Not Found (empty body)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use nestrouter::handler::{Body, RequestExt};
//! use nestrouter::{Route, Router};
//! use http::{Request, Response, StatusCode};
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), nestrouter::RouteError> {
//! let users = Route::new("users", "/users/{id}", |req: Request<Body>| {
//!     let id = req.path_param("id").unwrap_or_default().to_string();
//!     Response::new(id.into_bytes())
//! })?;
//! let v1 = Router::new("/v1", "v1")?.with_resolver(users);
//! let root = Router::new("/", "root")?.with_resolver(v1);
//!
//! let response = root.handle(Request::builder().uri("/v1/users/7").body(Vec::new()).unwrap());
//! assert_eq!(response.body(), b"7");
//!
//! let missing = root.handle(Request::builder().uri("/v2").body(Vec::new()).unwrap());
//! assert_eq!(missing.status(), StatusCode::NOT_FOUND);
//!
//! let params = HashMap::from([("id".to_string(), "7".to_string())]);
//! assert_eq!(root.reverse("v1:users", &params).as_deref(), Some("/v1/users/7"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Routers are `Send + Sync`. Resolution only reads an atomically loaded
//! snapshot of each router's child table, and [`Router::add`] publishes a
//! new snapshot, so resolvers can be registered while requests are served.

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod path;
pub mod resolver;
pub mod route;
pub mod router;

pub use error::RouteError;
pub use handler::{Body, Handler, PathParams, RequestExt};
pub use resolver::{Resolver, RouteInfo, RouteMatch};
pub use route::Route;
pub use router::Router;
