//! # Pattern Cache Module
//!
//! Opt-in memoization of compiled patterns.
//!
//! [`match_path`](crate::router::match_path) compiles its pattern on every
//! call. Callers that match the same patterns repeatedly can own a
//! [`PatternCache`] instead: compiled patterns are keyed by
//! `(path, case_sensitive, end)` and shared as `Arc<CompiledPattern>`.
//! Matching through the cache behaves exactly like `match_path`.
//!
//! ## Thread Safety
//!
//! Entries live in a [`DashMap`], so one cache can be shared between threads
//! behind an `Arc` without external locking.
//!
//! ## Invalidation
//!
//! Entries never go stale (a key fully determines its compiled pattern), so
//! the only policy is size: call [`PatternCache::clear`] if the set of
//! patterns is unbounded.

use crate::decode::{DiagnosticSink, TracingSink};
use crate::error::PatternError;
use crate::pattern::{CompiledPattern, PathPattern};
use crate::router::PathMatch;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Memoizing store of compiled patterns
#[derive(Debug, Default)]
pub struct PatternCache {
    entries: DashMap<PathPattern, Arc<CompiledPattern>>,
}

impl PatternCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled form of `pattern`, compiling it on first use
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the regex engine refuses the pattern.
    /// Refusals are not cached.
    pub fn get_or_compile(&self, pattern: &PathPattern) -> Result<Arc<CompiledPattern>, PatternError> {
        if let Some(entry) = self.entries.get(pattern) {
            return Ok(Arc::clone(entry.value()));
        }

        let compiled = Arc::new(pattern.compile()?);
        // The shard guard must be released before `len()` locks every shard.
        let compiled = Arc::clone(
            self.entries
                .entry(pattern.clone())
                .or_insert(compiled)
                .value(),
        );
        debug!(
            pattern = %pattern.path,
            cache_size = self.entries.len(),
            "Compiled pattern cached"
        );
        Ok(compiled)
    }

    /// Cached equivalent of [`match_path`](crate::router::match_path)
    #[must_use]
    pub fn match_path(&self, pattern: impl Into<PathPattern>, pathname: &str) -> Option<PathMatch> {
        self.match_path_with(pattern, pathname, &TracingSink)
    }

    /// Cached equivalent of [`match_path_with`](crate::router::match_path_with)
    #[must_use]
    pub fn match_path_with(
        &self,
        pattern: impl Into<PathPattern>,
        pathname: &str,
        sink: &dyn DiagnosticSink,
    ) -> Option<PathMatch> {
        let pattern = pattern.into();
        match self.get_or_compile(&pattern) {
            Ok(compiled) => compiled.match_path(pathname, sink),
            Err(err) => {
                warn!(pattern = %pattern.path, error = %err, "Path pattern rejected, treating as no match");
                None
            }
        }
    }

    /// Number of cached patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached pattern
    pub fn clear(&self) {
        self.entries.clear();
    }
}
