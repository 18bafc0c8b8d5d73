//! # Route Module
//!
//! Leaf routes: a name, a path pattern and a terminal handler.
//!
//! ## Pattern syntax
//!
//! Patterns are absolute paths made of literal segments and `{param}`
//! segments. At construction each pattern is converted into an anchored
//! regex, for example `/users/{id}` becomes `^/users/([^/]+)$`, and the
//! parameter names are kept in order so captures can be labelled without
//! named groups.
//!
//! | Pattern              | Matches            | Captures               |
//! |----------------------|--------------------|------------------------|
//! | `/`                  | `/`                | –                      |
//! | `/users`             | `/users`           | –                      |
//! | `/users/{id}`        | `/users/42`        | `id = 42`              |
//! | `/a/{b}/c/{d}`       | `/a/1/c/2`         | `b = 1`, `d = 2`       |
//!
//! The same pattern drives reverse lookup: `/users/{id}` with
//! `{"id": "42"}` expands to `/users/42`.

mod core;
mod pattern;
#[cfg(test)]
mod tests;

pub use self::core::Route;
pub use pattern::PathPattern;
