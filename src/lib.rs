//! # pathrewrite
//!
//! **pathrewrite** compiles route patterns such as `/blog/:blogId` or
//! `/files/*` into matchers, extracts decoded parameters from URLs, and
//! generates concrete URLs back from patterns and parameter values. On top of
//! that it offers ordered rewrite-rule tables for remapping incoming URLs.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - Pattern Compiler: pattern string + options to regex and parameter names
//! - **[`decode`]** - Param Decoder: forgiving percent-decoding with an injectable diagnostic sink
//! - **[`router`]** - Matcher ([`match_path`]) and Path Generator ([`generate_path`])
//! - **[`params`]** - The [`Params`] container shared by all of the above
//! - **[`rewrite`]** - Rewrite-rule tables, first match wins
//! - **[`cache`]** - Opt-in memoization of compiled patterns
//! - **[`logging`]**, **[`runtime_config`]**, **[`cli`]** - The `pathrewrite` binary
//!
//! ### Matching Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Matcher as router::match_path
//!     participant Compiler as pattern::compile_path
//!     participant Decoder as decode::decode_param
//!     participant Sink as DiagnosticSink
//!
//!     Caller->>Matcher: match_path("/q/:term", "/q/a%20b")
//!     Matcher->>Compiler: compile_path(path, case_sensitive, end)
//!     Compiler-->>Matcher: ^(/q/([^/]+))/?$ + ["term"]
//!     Matcher->>Matcher: Regex::captures
//!     alt No match
//!         Matcher-->>Caller: None
//!     end
//!     loop each captured value
//!         Matcher->>Decoder: decode_param(raw, name)
//!         alt Malformed encoding
//!             Decoder->>Sink: malformed_param(name, raw)
//!             Decoder-->>Matcher: raw value
//!         end
//!         Decoder-->>Matcher: decoded value
//!     end
//!     Matcher-->>Caller: Some(PathMatch { path, pathname, params })
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pathrewrite::{generate_path, match_path, Params, PathPattern};
//!
//! let m = match_path("/files/*", "/files/a/b/c").unwrap();
//! assert_eq!(m.params.get("*"), Some("a/b/c"));
//!
//! assert!(match_path(PathPattern::new("/Foo").case_sensitive(true), "/foo").is_none());
//!
//! let path = generate_path("/user/:id", &Params::from([("id", "42")])).unwrap();
//! assert_eq!(path, "/user/42");
//! ```
//!
//! ## Errors
//!
//! - A path that does not match is `None`, not an error.
//! - Malformed percent-encoding is reported to the [`DiagnosticSink`] and the
//!   raw value is kept; the match still succeeds.
//! - [`generate_path`] fails with [`RouteError::MissingParam`] when the
//!   pattern needs a value the caller did not supply.
//!
//! ## Concurrency
//!
//! Every operation is a synchronous pure function of its inputs. All types are
//! `Send + Sync`; a [`cache::PatternCache`] can be shared across threads.

pub mod cache;
pub mod cli;
pub mod decode;
pub mod error;
pub mod logging;
pub mod params;
pub mod pattern;
pub mod rewrite;
pub mod router;
pub mod runtime_config;

pub use decode::{DiagnosticSink, NoopSink, TracingSink};
pub use error::{DecodeError, PatternError, RouteError};
pub use params::Params;
pub use pattern::{compile_path, CompiledPattern, PathPattern};
pub use router::{generate_path, match_path, match_path_with, PathMatch};
