use std::fmt;

/// Route table construction error
///
/// Returned by [`Route::new`](crate::route::Route::new) and
/// [`Router::new`](crate::router::Router::new) when a name, prefix or path
/// pattern cannot be used to build a routing tree. Request-time failures are
/// never errors: they surface as `None` from `resolve`/`reverse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Resolver name contains the name delimiter (`:`)
    InvalidName {
        /// The rejected name
        name: String,
    },
    /// Path pattern could not be compiled
    InvalidPattern {
        /// The rejected pattern
        pattern: String,
        /// What was wrong with it
        reason: String,
    },
    /// Router prefix contains a parameter segment
    ///
    /// Prefixes are literal; parameters belong in leaf route patterns.
    InvalidPrefix {
        /// The rejected prefix
        prefix: String,
    },
}

impl RouteError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidName { name } => {
                write!(
                    f,
                    "invalid resolver name '{}': names must not contain ':'",
                    name
                )
            }
            RouteError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid path pattern '{}': {}", pattern, reason)
            }
            RouteError::InvalidPrefix { prefix } => {
                write!(
                    f,
                    "invalid router prefix '{}': prefixes must be literal paths",
                    prefix
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}
