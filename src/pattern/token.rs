use once_cell::sync::Lazy;
use regex::Regex;

/// A `:name` placeholder. Names are ASCII word characters only.
static PARAM_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":([A-Za-z0-9_]+)").expect("param token regex should be valid")
});

/// A piece of a route pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Text that must match verbatim
    Literal(&'a str),
    /// Name of a `:name` placeholder, without the colon
    Param(&'a str),
}

/// Split a pattern body into literal runs and named placeholders, left to right
///
/// A `:` that is not followed by at least one word character stays literal.
pub(crate) fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in PARAM_TOKEN.captures_iter(pattern) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            tokens.push(Token::Literal(&pattern[last..whole.start()]));
        }
        tokens.push(Token::Param(name.as_str()));
        last = whole.end();
    }
    if last < pattern.len() {
        tokens.push(Token::Literal(&pattern[last..]));
    }
    tokens
}
