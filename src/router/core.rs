//! Matcher - applies compiled patterns to request paths.

use crate::decode::{decode_param, DiagnosticSink, TracingSink};
use crate::params::Params;
use crate::pattern::{CompiledPattern, PathPattern};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Result of successfully matching a path against a pattern
///
/// Absence of a match is `None`, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMatch {
    /// The pattern string that matched
    pub path: String,
    /// The portion of the input that matched the pattern body
    ///
    /// Keeps the input's letter case. Excludes an optional trailing slash and
    /// the wildcard remainder.
    pub pathname: String,
    /// Decoded parameter values keyed by name (`*` for the wildcard)
    pub params: Params,
}

impl PathMatch {
    /// Get a parameter by name
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// The wildcard remainder, if the pattern had one
    #[inline]
    #[must_use]
    pub fn wildcard(&self) -> Option<&str> {
        self.params.get(crate::pattern::WILDCARD)
    }
}

impl CompiledPattern {
    /// Apply this compiled pattern to `pathname`
    ///
    /// Captured values are decoded with [`decode_param`]; decode failures are
    /// reported to `sink` and never prevent the match.
    #[must_use]
    pub fn match_path(&self, pathname: &str, sink: &dyn DiagnosticSink) -> Option<PathMatch> {
        let Some(caps) = self.regex.captures(pathname) else {
            trace!(pattern = %self.path, path = %pathname, "No path match");
            return None;
        };

        let matched = caps.get(1).map_or("", |m| m.as_str());
        let mut params = Params::new();
        for (index, name) in self.param_names.iter().enumerate() {
            let raw = caps.get(index + 2).map_or("", |m| m.as_str());
            params.insert(Arc::clone(name), decode_param(raw, name, sink));
        }

        debug!(
            pattern = %self.path,
            path = %pathname,
            pathname = %matched,
            params = ?params,
            "Path matched"
        );

        Some(PathMatch {
            path: self.path.clone(),
            pathname: matched.to_string(),
            params,
        })
    }
}

/// Match `pathname` against a pattern
///
/// The pattern may be a bare string (case-insensitive, anchored at the end)
/// or a [`PathPattern`] carrying its own options. The pattern is compiled on
/// every call. Decode failures are reported as `tracing` warnings.
///
/// # Returns
///
/// * `Some(PathMatch)` - the pattern matched
/// * `None` - the path does not satisfy the pattern
///
/// # Example
///
/// ```rust
/// use pathrewrite::{match_path, PathPattern};
///
/// let m = match_path("/blog/:blogId", "/blog/hello%20world").unwrap();
/// assert_eq!(m.pathname, "/blog/hello%20world");
/// assert_eq!(m.get_param("blogId"), Some("hello world"));
///
/// assert!(match_path(PathPattern::new("/Blog").case_sensitive(true), "/blog").is_none());
/// ```
#[must_use]
pub fn match_path(pattern: impl Into<PathPattern>, pathname: &str) -> Option<PathMatch> {
    match_path_with(pattern, pathname, &TracingSink)
}

/// Like [`match_path`] but decode failures go to `sink`
#[must_use]
pub fn match_path_with(
    pattern: impl Into<PathPattern>,
    pathname: &str,
    sink: &dyn DiagnosticSink,
) -> Option<PathMatch> {
    let pattern = pattern.into();
    match pattern.compile() {
        Ok(compiled) => compiled.match_path(pathname, sink),
        Err(err) => {
            warn!(pattern = %pattern.path, error = %err, "Path pattern rejected, treating as no match");
            None
        }
    }
}
