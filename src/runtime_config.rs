//! # Runtime Configuration Module
//!
//! Environment-variable configuration for the `pathrewrite` binary.
//!
//! ## Environment Variables
//!
//! ### `PATHREWRITE_RULES`
//!
//! Path to the default rewrite-rule file (YAML, JSON or TOML) used by
//! `pathrewrite rewrite` when `--rules` is not given.
//!
//! ### `PATHREWRITE_PATTERN_CACHE`
//!
//! Set to `off`, `false` or `0` to compile patterns on every match instead of
//! going through a [`PatternCache`](crate::cache::PatternCache).
//!
//! Default: on
//!
//! ## Usage
//!
//! ```rust
//! use pathrewrite::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("pattern cache: {}", config.pattern_cache);
//! ```
//!
//! Logging has its own variables, see [`crate::logging::LogConfig`].

use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Default rewrite-rule file
    pub rules_path: Option<PathBuf>,
    /// Whether to memoize compiled patterns (default: true)
    pub pattern_cache: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rules_path: None,
            pattern_cache: true,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let rules_path = lookup("PATHREWRITE_RULES")
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from);
        let pattern_cache = match lookup("PATHREWRITE_PATTERN_CACHE") {
            Some(val) => !matches!(val.trim().to_lowercase().as_str(), "off" | "false" | "0"),
            None => true,
        };
        RuntimeConfig {
            rules_path,
            pattern_cache,
        }
    }
}
