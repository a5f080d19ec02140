//! # CLI Module
//!
//! Command-line access to matching, generation and rewriting, for trying
//! patterns by hand and for scripts. Results are printed to stdout as JSON.
//!
//! ## Commands
//!
//! ### `match`
//!
//! ```bash
//! pathrewrite match '/blog/:blogId' /blog/42 /blog/43
//! pathrewrite match '/Docs' /docs --case-sensitive
//! pathrewrite match '/docs' /docs/intro --prefix
//! ```
//!
//! One JSON line per path (`null` when it does not match). Exits with status
//! 1 if any path did not match.
//!
//! ### `generate`
//!
//! ```bash
//! pathrewrite generate '/users/:id/*' --param id=42 --param '*=avatar.png'
//! ```
//!
//! ### `rewrite`
//!
//! ```bash
//! pathrewrite rewrite /blog/42 --rules rewrites.yaml --param lang=en
//! ```
//!
//! Prints the rewritten request parameters. `--rules` defaults to
//! `PATHREWRITE_RULES`. Exits with status 1 if no rule matched.

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
