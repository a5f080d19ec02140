use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

use super::token::{tokenize, Token};

/// Parameter name under which the trailing wildcard is captured
pub const WILDCARD: &str = "*";

fn default_end() -> bool {
    true
}

/// A route pattern plus its matching options
///
/// A bare string converts with the defaults: case-insensitive, anchored at
/// the end.
///
/// # Example
///
/// ```rust
/// use pathrewrite::PathPattern;
///
/// let pattern = PathPattern::new("/blog/:blogId").case_sensitive(true);
/// assert!(pattern.is_case_sensitive());
/// assert!(pattern.is_end());
///
/// let prefix: PathPattern = "/docs".into();
/// assert!(!prefix.end(false).is_end());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPattern {
    /// The pattern string, e.g. `/users/:id/*`
    pub path: String,
    /// Whether letter case must match exactly
    #[serde(default, alias = "caseSensitive")]
    pub case_sensitive: bool,
    /// Whether the match must consume the whole input path
    #[serde(default = "default_end")]
    pub end: bool,
}

impl PathPattern {
    /// Create a pattern with default options
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            case_sensitive: false,
            end: true,
        }
    }

    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn end(mut self, end: bool) -> Self {
        self.end = end;
        self
    }

    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.end
    }

    /// Compile this pattern, see [`compile_path`]
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Compile`] if the regex engine refuses the
    /// synthesized expression.
    pub fn compile(&self) -> Result<CompiledPattern, PatternError> {
        compile_path(&self.path, self.case_sensitive, self.end)
    }
}

impl From<&str> for PathPattern {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PathPattern {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&PathPattern> for PathPattern {
    fn from(pattern: &PathPattern) -> Self {
        pattern.clone()
    }
}

/// A pattern compiled into a regular expression
///
/// Capture group 1 wraps the whole pattern body and yields the matched
/// pathname. Groups 2.. line up positionally with [`param_names`]: named
/// parameters left to right, then `*` when the pattern ends in a wildcard.
///
/// [`param_names`]: CompiledPattern::param_names
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub(crate) path: String,
    pub(crate) regex: Regex,
    pub(crate) param_names: Vec<Arc<str>>,
}

impl CompiledPattern {
    /// The pattern string this was compiled from
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The synthesized regular expression
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Parameter names in capture-group order
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// Whether the pattern ends in a wildcard
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.param_names
            .last()
            .is_some_and(|name| name.as_ref() == WILDCARD)
    }

    /// Test a path without extracting anything
    #[inline]
    #[must_use]
    pub fn is_match(&self, pathname: &str) -> bool {
        self.regex.is_match(pathname)
    }
}

/// Compile a route pattern into a regex and its ordered parameter names
///
/// Transforms patterns like `/users/:id/*` into expressions like
/// `^(/users/([^/]+))/?(.*)$` with parameter names `["id", "*"]`.
///
/// # Rules
///
/// 1. Leading slashes collapse to exactly one `/`.
/// 2. One trailing `*`, then one trailing `/`, are set aside.
/// 3. Literal text is escaped so it matches verbatim.
/// 4. Each `:name` becomes `([^/]+)`.
/// 5. A trailing `*` becomes `(.*)`, preceded by `/?` when the pattern ends
///    in `/*` so the separator stays out of the captured value.
/// 6. With `end` and no wildcard an optional trailing slash is allowed before `$`.
/// 7. Without `end` the expression is not anchored at the end.
/// 8. Without `case_sensitive` the expression ignores letter case.
///
/// # Errors
///
/// Returns [`PatternError::Compile`] only if the regex engine refuses the
/// expression (size limits on enormous patterns).
///
/// # Example
///
/// ```rust
/// use pathrewrite::pattern::compile_path;
///
/// let compiled = compile_path("/users/:id", false, true).unwrap();
/// assert_eq!(compiled.param_names().len(), 1);
/// assert!(compiled.is_match("/USERS/42/"));
/// ```
pub fn compile_path(
    path: &str,
    case_sensitive: bool,
    end: bool,
) -> Result<CompiledPattern, PatternError> {
    let normalized = format!("/{}", path.trim_start_matches('/'));
    let body = normalized.strip_suffix('*').unwrap_or(&normalized);
    let body = body.strip_suffix('/').unwrap_or(body);

    let mut source = String::with_capacity(body.len() * 2 + 16);
    let mut param_names: Vec<Arc<str>> = Vec::new();

    source.push_str("^(");
    for token in tokenize(body) {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(text)),
            Token::Param(name) => {
                source.push_str("([^/]+)");
                param_names.push(Arc::from(name));
            }
        }
    }
    source.push(')');

    if path.ends_with('*') {
        if path.ends_with("/*") {
            source.push_str("/?");
        }
        param_names.push(Arc::from(WILDCARD));
        source.push_str("(.*)");
    } else if end {
        source.push_str("/?");
    }

    if end {
        source.push('$');
    }

    let regex = RegexBuilder::new(&source)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|source| PatternError::Compile {
            pattern: path.to_string(),
            source,
        })?;

    trace!(
        pattern = %path,
        regex = %regex.as_str(),
        param_names = ?param_names,
        case_sensitive,
        end,
        "Compiled path pattern"
    );

    Ok(CompiledPattern {
        path: path.to_string(),
        regex,
        param_names,
    })
}
