//! Path and name helpers shared by routers and routes.
//!
//! Prefix handling lives here so that `resolve` and `reverse` compose paths
//! with the same rules at every level of the tree.

/// Delimiter joining resolver names into a reverse-lookup chain (`"v1:users"`)
pub const NAME_DELIMITER: char = ':';

/// Normalize a router prefix to exactly one leading `/` and no trailing `/`
///
/// The empty prefix and `/` both normalize to the root prefix `/`.
///
/// ```
/// use nestrouter::path::normalize_prefix;
///
/// assert_eq!(normalize_prefix("api/v1/"), "/api/v1");
/// assert_eq!(normalize_prefix(""), "/");
/// ```
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    format!("/{}", prefix.trim_matches('/'))
}

/// Strip `prefix` from `path`, returning the normalized remainder
///
/// The prefix must match whole path segments: `/api` accepts `/api` and
/// `/api/users` but not `/apiv2/users`. The remainder is trimmed of `/` on
/// both ends and re-rooted with a single `/`, so `/api/` and `/api` both
/// yield `/`.
///
/// Returns `None` when `path` is outside the prefix.
#[must_use]
pub fn strip_prefix(prefix: &str, path: &str) -> Option<String> {
    let rest = if prefix == "/" {
        path.strip_prefix('/')?
    } else {
        let rest = path.strip_prefix(prefix)?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            return None;
        }
        rest
    };
    Some(format!("/{}", rest.trim_matches('/')))
}

/// Prepend `prefix` to a path fragment produced by a child resolver
///
/// One leading `/` is removed from the fragment before joining, then only
/// the first `//` in the result is collapsed. Deeper duplicate slashes that
/// a child may have produced are left as they are.
#[must_use]
pub fn join_prefix(prefix: &str, fragment: &str) -> String {
    let fragment = fragment.strip_prefix('/').unwrap_or(fragment);
    format!("{prefix}/{fragment}").replacen("//", "/", 1)
}

/// Split a reverse-lookup name into its first segment and the remainder
///
/// `"v1:users:detail"` yields `("v1", "users:detail")`; a name without a
/// delimiter yields an empty remainder.
#[must_use]
pub fn split_name(name: &str) -> (&str, &str) {
    name.split_once(NAME_DELIMITER).unwrap_or((name, ""))
}

/// Join a parent name token with a child-relative name
#[must_use]
pub fn join_name(head: &str, rest: &str) -> String {
    if rest.is_empty() {
        head.to_string()
    } else {
        format!("{head}{NAME_DELIMITER}{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/"), "/");
        assert_eq!(normalize_prefix("//app//"), "/app");
        assert_eq!(normalize_prefix("app"), "/app");
    }

    #[test]
    fn test_strip_prefix_is_segment_aware() {
        assert_eq!(strip_prefix("/api", "/api").as_deref(), Some("/"));
        assert_eq!(strip_prefix("/api", "/api/").as_deref(), Some("/"));
        assert_eq!(
            strip_prefix("/api", "/api/users/1/").as_deref(),
            Some("/users/1")
        );
        assert_eq!(strip_prefix("/api", "/apiv2/users"), None);
        assert_eq!(strip_prefix("/api", "/other"), None);
    }

    #[test]
    fn test_strip_root_prefix() {
        assert_eq!(strip_prefix("/", "/").as_deref(), Some("/"));
        assert_eq!(strip_prefix("/", "/a/b/").as_deref(), Some("/a/b"));
        assert_eq!(strip_prefix("/", "relative"), None);
    }

    #[test]
    fn test_join_prefix() {
        assert_eq!(join_prefix("/app", "/"), "/app/");
        assert_eq!(join_prefix("/", "/users/7"), "/users/7");
        assert_eq!(join_prefix("/", "/"), "/");
        assert_eq!(join_prefix("/v1", "users/7"), "/v1/users/7");
    }

    #[test]
    fn test_join_prefix_collapses_only_first_double_slash() {
        assert_eq!(join_prefix("/", "//a//b"), "//a//b");
        assert_eq!(join_prefix("/x", "///a"), "/x//a");
    }

    #[test]
    fn test_split_and_join_name() {
        assert_eq!(split_name("v1:users:detail"), ("v1", "users:detail"));
        assert_eq!(split_name("home"), ("home", ""));
        assert_eq!(join_name("v1", ""), "v1");
        assert_eq!(join_name("v1", "users"), "v1:users");
    }
}
