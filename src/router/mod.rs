//! # Router Module
//!
//! Composite resolvers that nest: a [`Router`] owns a path prefix, a
//! namespace and an ordered set of child resolvers (leaf routes or other
//! routers), plus an optional default route.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Stripping its prefix and delegating the remainder to its children
//! - Picking the first child (in registration order) that matches
//! - Falling back to the default route inside its prefix
//! - Composing paths for reverse lookup from colon-delimited names
//! - Dispatching `http` requests with the captured path parameters attached
//!
//! ## Example
//!
//! ```rust
//! use nestrouter::handler::EchoHandler;
//! use nestrouter::{Route, Router};
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), nestrouter::RouteError> {
//! let v1 = Router::new("/v1", "v1")?
//!     .with_resolver(Route::new("users", "/users/{id}", EchoHandler::new("users"))?);
//! let root = Router::new("/", "root")?.with_resolver(v1);
//!
//! // Forward: prefixes are stripped level by level
//! let matched = root.resolve("/v1/users/7").unwrap();
//! assert_eq!(matched.route.name(), "users");
//! assert_eq!(matched.get_path_param("id"), Some("7"));
//!
//! // Reverse: each level consumes one name segment and adds its prefix
//! let params = HashMap::from([("id".to_string(), "7".to_string())]);
//! assert_eq!(root.reverse("v1:users", &params).as_deref(), Some("/v1/users/7"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Known limitations
//!
//! When composing reverse paths only the first `//` at a prefix boundary is
//! collapsed. A child that itself produces a path with duplicate slashes
//! keeps them.

mod core;

pub use self::core::Router;
