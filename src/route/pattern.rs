use crate::error::RouteError;
use crate::handler::PathParams;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(Arc<str>),
}

/// Compiled path pattern such as `/users/{id}/posts/{post_id}`
///
/// Literal segments must match exactly; each `{name}` segment matches one
/// non-empty path segment and is captured under `name`. Empty segments are
/// ignored, so `/users/` and `//users` compile to the same pattern as
/// `/users`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    segments: Vec<Segment>,
    regex: Regex,
    param_names: Vec<Arc<str>>,
}

impl PathPattern {
    /// Compile a pattern into a regex with one capture group per parameter
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPattern`] when the pattern is not
    /// absolute, a brace does not enclose a whole segment, a parameter name
    /// is not an identifier, or a parameter name is repeated.
    pub fn compile(pattern: &str) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::invalid_pattern(pattern, "must start with '/'"));
        }

        let mut segments = Vec::new();
        let mut param_names: Vec<Arc<str>> = Vec::with_capacity(pattern.matches('{').count());
        let mut source = String::with_capacity(pattern.len() + 5);
        source.push('^');

        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            if let Some(inner) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                if !is_identifier(inner) {
                    return Err(RouteError::invalid_pattern(
                        pattern,
                        format!("'{inner}' is not a valid parameter name"),
                    ));
                }
                if param_names.iter().any(|n| n.as_ref() == inner) {
                    return Err(RouteError::invalid_pattern(
                        pattern,
                        format!("parameter '{inner}' appears more than once"),
                    ));
                }
                let name: Arc<str> = Arc::from(inner);
                source.push_str("/([^/]+)");
                param_names.push(Arc::clone(&name));
                segments.push(Segment::Param(name));
            } else if segment.contains(['{', '}']) {
                return Err(RouteError::invalid_pattern(
                    pattern,
                    format!("segment '{segment}' mixes literal text and a parameter"),
                ));
            } else {
                source.push('/');
                source.push_str(&regex::escape(segment));
                segments.push(Segment::Literal(segment.to_string()));
            }
        }

        if segments.is_empty() {
            source.push('/');
        }
        source.push('$');

        let regex =
            Regex::new(&source).map_err(|e| RouteError::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            segments,
            regex,
            param_names,
        })
    }

    /// Parameter names in the order they appear in the pattern
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// The compiled regular expression
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Canonical template, e.g. `/users/{id}`
    #[must_use]
    pub fn template(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(name) => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
        }
        out
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and capture its parameters
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<PathParams> {
        let captures = self.regex.captures(path)?;
        let mut params = PathParams::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(value) = captures.get(i + 1) {
                params.push(Arc::clone(name), value.as_str().to_string());
            }
        }
        Some(params)
    }

    /// Substitute `params` into the pattern
    ///
    /// Returns `None` if any parameter of the pattern is missing. Values are
    /// inserted verbatim; extra entries are ignored.
    #[must_use]
    pub fn expand(&self, params: &HashMap<String, String>) -> Option<String> {
        if self.segments.is_empty() {
            return Some("/".to_string());
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(name) => out.push_str(params.get(name.as_ref())?),
            }
        }
        Some(out)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
