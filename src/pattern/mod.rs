//! # Pattern Module
//!
//! Compiles route patterns into regular expressions.
//!
//! ## Pattern syntax
//!
//! - Literal segments match verbatim (regex metacharacters are escaped)
//! - `:name` captures one non-empty segment (no `/`)
//! - A trailing `*` captures the rest of the path, slashes included
//!
//! | pattern | regex | names |
//! |---|---|---|
//! | `/users/:id` | `^(/users/([^/]+))/?$` | `id` |
//! | `/files/*` | `^(/files)/?(.*)$` | `*` |
//! | `/a.b+c` | `^(/a\.b\+c)/?$` | |
//!
//! Group 1 always wraps the pattern body, so the matched pathname never
//! includes the optional trailing slash or the wildcard remainder.
//!
//! Compilation is not cached here. See [`crate::cache::PatternCache`] for an
//! opt-in memoizing wrapper.

mod compile;
mod token;

pub use compile::{compile_path, CompiledPattern, PathPattern, WILDCARD};
pub(crate) use token::{tokenize, Token};
