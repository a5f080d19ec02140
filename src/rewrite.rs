//! # Rewrite Module
//!
//! Ordered rewrite-rule tables for remapping incoming URLs onto other pages.
//!
//! ## Overview
//!
//! A rule pairs a [`PathPattern`] with a target: a single path or a list of
//! path segments. The table tries rules in order against the request path and
//! the first match wins. The matched parameters are merged into the request's
//! parameter set and the catch-all `path` parameter is replaced by the rule
//! target, so the page-data layer fetches the target page with the extracted
//! parameters available.
//!
//! Patterns are compiled once, when the table is built.
//!
//! ## Rule files
//!
//! Tables load from YAML, JSON or TOML, picked by file extension:
//!
//! ```yaml
//! rules:
//!   - path: /blog/:blogId
//!     to: [styleguide]
//!   - path: /Docs/*
//!     case_sensitive: true
//!     to: /documentation
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pathrewrite::rewrite::{QueryValue, RequestParams, RewriteRule, RewriteTable, RewriteTarget};
//!
//! let table = RewriteTable::new(vec![RewriteRule::new(
//!     "/blog/:blogId",
//!     RewriteTarget::Segments(vec!["styleguide".to_string()]),
//! )])
//! .unwrap();
//!
//! let mut request = RequestParams::new();
//! request.insert("path".to_string(), QueryValue::from(vec!["blog", "42"]));
//!
//! let rewritten = table.apply(&request);
//! assert_eq!(rewritten["blogId"], QueryValue::from("42"));
//! assert_eq!(rewritten["path"], QueryValue::from(vec!["styleguide"]));
//! ```

use crate::decode::{DiagnosticSink, TracingSink};
use crate::error::PatternError;
use crate::pattern::{CompiledPattern, PathPattern};
use crate::router::PathMatch;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Name of the catch-all request parameter that carries the page path
pub const PATH_PARAM: &str = "path";

/// A parsed query-string value: one string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Multi(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Multi(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::Multi(values.into_iter().map(str::to_string).collect())
    }
}

/// Request parameters as handed over by the page framework
pub type RequestParams = BTreeMap<String, QueryValue>;

/// Where a rewrite rule sends the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RewriteTarget {
    /// A single target path, e.g. `/documentation`
    Path(String),
    /// Target path segments, e.g. `["styleguide"]`
    Segments(Vec<String>),
}

impl From<&RewriteTarget> for QueryValue {
    fn from(target: &RewriteTarget) -> Self {
        match target {
            RewriteTarget::Path(path) => QueryValue::Single(path.clone()),
            RewriteTarget::Segments(segments) => QueryValue::Multi(segments.clone()),
        }
    }
}

/// One rewrite rule: a pattern and its target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    #[serde(flatten)]
    pub pattern: PathPattern,
    pub to: RewriteTarget,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<PathPattern>, to: RewriteTarget) -> Self {
        Self {
            pattern: pattern.into(),
            to,
        }
    }
}

/// On-disk shape of a rule file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteConfig {
    #[serde(default)]
    pub rules: Vec<RewriteRule>,
}

/// Outcome of resolving a URL against a [`RewriteTable`]
#[derive(Debug, Clone)]
pub struct Rewrite<'a> {
    /// Position of the winning rule in the table
    pub rule_index: usize,
    /// The winning rule's target
    pub target: &'a RewriteTarget,
    /// The match produced by the winning rule's pattern
    pub matched: PathMatch,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: RewriteRule,
    compiled: CompiledPattern,
}

/// Ordered rewrite rules, first match wins
#[derive(Debug, Clone, Default)]
pub struct RewriteTable {
    rules: Vec<CompiledRule>,
}

impl RewriteTable {
    /// Build a table, compiling every rule's pattern
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if a pattern is refused by the regex engine.
    pub fn new(rules: Vec<RewriteRule>) -> Result<Self, PatternError> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let compiled = rule.pattern.compile()?;
                Ok(CompiledRule { rule, compiled })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;

        info!(
            rules_count = rules.len(),
            patterns = ?rules.iter().map(|r| r.rule.pattern.path.as_str()).collect::<Vec<_>>(),
            "Rewrite table loaded"
        );

        Ok(Self { rules })
    }

    /// Load a table from a YAML, JSON or TOML rule file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, its extension is not recognised, it
    /// does not parse, or a pattern cannot be compiled.
    pub fn load(file_path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)
            .with_context(|| format!("failed to read rewrite rules from {}", file_path.display()))?;

        let extension = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let config: RewriteConfig = match extension.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML in {}", file_path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON in {}", file_path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("invalid TOML in {}", file_path.display()))?,
            _ => bail!(
                "unsupported rewrite rule file '{}': expected .yaml, .yml, .json or .toml",
                file_path.display()
            ),
        };

        Ok(Self::new(config.rules)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in priority order
    pub fn rules(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter().map(|r| &r.rule)
    }

    /// Find the first rule whose pattern matches `url`
    #[must_use]
    pub fn resolve(&self, url: &str) -> Option<Rewrite<'_>> {
        self.resolve_with(url, &TracingSink)
    }

    /// Like [`resolve`](Self::resolve) but decode failures go to `sink`
    #[must_use]
    pub fn resolve_with(&self, url: &str, sink: &dyn DiagnosticSink) -> Option<Rewrite<'_>> {
        debug!(url = %url, rules_count = self.rules.len(), "Rewrite resolution attempt");

        for (rule_index, entry) in self.rules.iter().enumerate() {
            if let Some(matched) = entry.compiled.match_path(url, sink) {
                info!(
                    url = %url,
                    rule_index,
                    pattern = %entry.rule.pattern.path,
                    target = ?entry.rule.to,
                    params = ?matched.params,
                    "Rewrite matched"
                );
                return Some(Rewrite {
                    rule_index,
                    target: &entry.rule.to,
                    matched,
                });
            }
        }

        debug!(url = %url, "No rewrite matched");
        None
    }

    /// Rewrite a request's parameters
    ///
    /// The request path is taken from the `path` parameter (see
    /// [`extract_path`]). When a rule matches, the returned set is the input
    /// overlaid with the matched parameters, and `path` replaced by the rule
    /// target. Without a match the input is returned unchanged.
    #[must_use]
    pub fn apply(&self, request: &RequestParams) -> RequestParams {
        self.rewrite_params(request)
            .unwrap_or_else(|| request.clone())
    }

    /// Like [`apply`](Self::apply) but `None` when no rule matched
    #[must_use]
    pub fn rewrite_params(&self, request: &RequestParams) -> Option<RequestParams> {
        let url = extract_path(request);
        let rewrite = self.resolve(&url)?;

        let mut merged = request.clone();
        for (name, value) in rewrite.matched.params.iter() {
            merged.insert(name.to_string(), QueryValue::from(value));
        }
        merged.insert(PATH_PARAM.to_string(), QueryValue::from(rewrite.target));
        Some(merged)
    }
}

/// Turn the catch-all `path` parameter into a request path
///
/// Segment lists are joined with `/`. The result always starts with `/`; a
/// missing parameter yields `/`.
///
/// # Example
///
/// ```rust
/// use pathrewrite::rewrite::{extract_path, QueryValue, RequestParams};
///
/// let mut params = RequestParams::new();
/// assert_eq!(extract_path(&params), "/");
///
/// params.insert("path".to_string(), QueryValue::from(vec!["blog", "7"]));
/// assert_eq!(extract_path(&params), "/blog/7");
/// ```
#[must_use]
pub fn extract_path(params: &RequestParams) -> String {
    let path = match params.get(PATH_PARAM) {
        Some(QueryValue::Multi(segments)) => segments.join("/"),
        Some(QueryValue::Single(path)) => path.clone(),
        None => return "/".to_string(),
    };

    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog_table() -> RewriteTable {
        RewriteTable::new(vec![
            RewriteRule::new(
                "/blog/:blogId",
                RewriteTarget::Segments(vec!["styleguide".to_string()]),
            ),
            RewriteRule::new("/blog/*", RewriteTarget::Path("/blog-index".to_string())),
        ])
        .unwrap()
    }

    fn request(path: Vec<&str>) -> RequestParams {
        let mut params = RequestParams::new();
        params.insert(PATH_PARAM.to_string(), QueryValue::from(path));
        params
    }

    #[test]
    fn test_first_match_wins() {
        let table = blog_table();
        let rewrite = table.resolve("/blog/42").unwrap();
        assert_eq!(rewrite.rule_index, 0);
        assert_eq!(rewrite.matched.get_param("blogId"), Some("42"));

        let rewrite = table.resolve("/blog/2024/01").unwrap();
        assert_eq!(rewrite.rule_index, 1);
        assert_eq!(rewrite.target, &RewriteTarget::Path("/blog-index".to_string()));
    }

    #[test]
    fn test_no_rule_matches() {
        assert!(blog_table().resolve("/shop/1").is_none());
    }

    #[test]
    fn test_apply_merges_params_and_replaces_path() {
        let mut params = request(vec!["blog", "42"]);
        params.insert("lang".to_string(), QueryValue::from("en"));

        let rewritten = blog_table().apply(&params);
        assert_eq!(rewritten["blogId"], QueryValue::from("42"));
        assert_eq!(rewritten["lang"], QueryValue::from("en"));
        assert_eq!(rewritten[PATH_PARAM], QueryValue::from(vec!["styleguide"]));
    }

    #[test]
    fn test_apply_matched_params_override_existing() {
        let mut params = request(vec!["blog", "42"]);
        params.insert("blogId".to_string(), QueryValue::from("stale"));

        let rewritten = blog_table().apply(&params);
        assert_eq!(rewritten["blogId"], QueryValue::from("42"));
    }

    #[test]
    fn test_apply_without_match_is_identity() {
        let params = request(vec!["about"]);
        assert_eq!(blog_table().apply(&params), params);
        assert!(blog_table().rewrite_params(&params).is_none());
    }

    #[test]
    fn test_extract_path_variants() {
        let mut params = RequestParams::new();
        params.insert(PATH_PARAM.to_string(), QueryValue::from("blog/1"));
        assert_eq!(extract_path(&params), "/blog/1");

        params.insert(PATH_PARAM.to_string(), QueryValue::from("/blog/1"));
        assert_eq!(extract_path(&params), "/blog/1");

        params.insert(PATH_PARAM.to_string(), QueryValue::Multi(Vec::new()));
        assert_eq!(extract_path(&params), "/");
    }

    #[test]
    fn test_rule_deserializes_string_or_segments() {
        let rule: RewriteRule =
            serde_json::from_str(r#"{ "path": "/a/:b", "to": ["x", "y"] }"#).unwrap();
        assert_eq!(
            rule.to,
            RewriteTarget::Segments(vec!["x".to_string(), "y".to_string()])
        );
        assert!(!rule.pattern.case_sensitive);

        let rule: RewriteRule =
            serde_json::from_str(r#"{ "path": "/a", "caseSensitive": true, "to": "/b" }"#).unwrap();
        assert_eq!(rule.to, RewriteTarget::Path("/b".to_string()));
        assert!(rule.pattern.case_sensitive);
    }
}
