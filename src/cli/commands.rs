use crate::cache::PatternCache;
use crate::decode::TracingSink;
use crate::params::Params;
use crate::pattern::PathPattern;
use crate::rewrite::{QueryValue, RequestParams, RewriteTable, PATH_PARAM};
use crate::router::{generate_path, match_path_with, PathMatch};
use crate::runtime_config::RuntimeConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line interface for pathrewrite
#[derive(Parser, Debug)]
#[command(name = "pathrewrite")]
#[command(about = "Match, generate and rewrite URL paths against route patterns", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match one or more paths against a pattern
    Match {
        /// Route pattern, e.g. `/users/:id/*`
        pattern: String,

        /// Paths to test
        #[arg(required = true)]
        paths: Vec<String>,

        /// Require letter case to match exactly
        #[arg(long, default_value_t = false)]
        case_sensitive: bool,

        /// Match a prefix instead of the whole path
        #[arg(long, default_value_t = false)]
        prefix: bool,
    },
    /// Generate a path from a pattern and parameter values
    Generate {
        /// Route pattern, e.g. `/users/:id/*`
        pattern: String,

        /// Parameter value as NAME=VALUE (repeatable, `*` for the wildcard)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// Rewrite a request path through a rule table
    Rewrite {
        /// Request path, e.g. `/blog/42`
        url: String,

        /// Rule file (YAML, JSON or TOML); defaults to PATHREWRITE_RULES
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Extra request parameter as NAME=VALUE (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid NAME=VALUE: no `=` found in `{s}`"))
}

/// Parse arguments and environment, then execute against stdout
///
/// # Errors
///
/// Returns an error if a parameter is missing for `generate`, the rule file
/// cannot be loaded for `rewrite`, or stdout cannot be written.
pub fn run_cli() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if run(&cli, &config, &mut out)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Execute a parsed command, writing results to `out`
///
/// Returns `false` when a `match` path or a `rewrite` URL did not match.
///
/// # Errors
///
/// See [`run_cli`].
pub fn run(cli: &Cli, config: &RuntimeConfig, out: &mut dyn Write) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Match {
            pattern,
            paths,
            case_sensitive,
            prefix,
        } => {
            let pattern = PathPattern::new(pattern.as_str())
                .case_sensitive(*case_sensitive)
                .end(!*prefix);
            let cache = config.pattern_cache.then(PatternCache::new);

            let mut all_matched = true;
            for path in paths {
                let matched: Option<PathMatch> = match &cache {
                    Some(cache) => cache.match_path(&pattern, path),
                    None => match_path_with(&pattern, path, &TracingSink),
                };
                all_matched &= matched.is_some();
                writeln!(out, "{}", serde_json::to_string(&matched)?)?;
            }

            Ok(all_matched)
        }
        Commands::Generate { pattern, params } => {
            let params: Params = params.iter().cloned().collect();
            let path = generate_path(pattern, &params)?;
            writeln!(out, "{path}")?;
            Ok(true)
        }
        Commands::Rewrite { url, rules, params } => {
            let rules_path = rules
                .clone()
                .or_else(|| config.rules_path.clone())
                .context("no rule file: pass --rules or set PATHREWRITE_RULES")?;
            let table = RewriteTable::load(&rules_path)?;

            let mut request: RequestParams = params
                .iter()
                .map(|(k, v)| (k.clone(), QueryValue::from(v.as_str())))
                .collect();
            request.insert(PATH_PARAM.to_string(), QueryValue::Multi(path_segments(url)));

            let rewritten = table.rewrite_params(&request);
            let matched = rewritten.is_some();
            let output = rewritten.unwrap_or(request);
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;

            Ok(matched)
        }
    }
}

/// Split a URL path into the segments a catch-all page route receives
fn path_segments(url: &str) -> Vec<String> {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
