//! # Router Module
//!
//! Matching request paths against route patterns, and generating paths back
//! from patterns.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Matching a request path against one pattern ([`match_path`])
//! - Extracting and percent-decoding named and wildcard parameters
//! - Generating a concrete path from a pattern and parameters ([`generate_path`])
//!
//! Routing dispatch (choosing a handler) is left to the caller. The
//! [`rewrite`](crate::rewrite) module shows the intended use: try an ordered
//! list of patterns, first match wins.
//!
//! ## Round trip
//!
//! For patterns made only of literals and `:name` placeholders, generating a
//! path and matching it again yields the same parameters (modulo
//! percent-encoding):
//!
//! ```rust
//! use pathrewrite::{generate_path, match_path, Params};
//!
//! let params = Params::from([("user", "ada"), ("post", "7")]);
//! let path = generate_path("/u/:user/p/:post", &params).unwrap();
//! assert_eq!(path, "/u/ada/p/7");
//! assert_eq!(match_path("/u/:user/p/:post", &path).unwrap().params, params);
//! ```
//!
//! ## Data flow
//!
//! ```text
//! match_path ──► compile_path ──► Regex::captures ──► decode_param (per value) ──► PathMatch
//! generate_path ──► tokenize ──► substitute ──► String
//! ```

mod core;
mod generate;
#[cfg(test)]
mod tests;

pub use core::{match_path, match_path_with, PathMatch};
pub use generate::generate_path;
