//! Path Generator - the inverse of matching.

use crate::error::RouteError;
use crate::params::Params;
use crate::pattern::{tokenize, Token, WILDCARD};

/// Build a concrete path from a pattern and parameter values
///
/// Every `:name` is replaced by `params[name]`. A trailing wildcard is
/// replaced by `params["*"]` when present; when the pattern had a `/` before
/// the `*`, the value is joined with exactly one `/`. Without a `*` value the
/// wildcard and the slashes before it are dropped.
///
/// Values are inserted as given, without percent-encoding.
///
/// # Errors
///
/// Returns [`RouteError::MissingParam`] naming the first `:name` placeholder
/// that has no value.
///
/// # Example
///
/// ```rust
/// use pathrewrite::{generate_path, Params};
///
/// let params = Params::from([("id", "42"), ("*", "avatar.png")]);
/// assert_eq!(generate_path("/users/:id/*", &params).unwrap(), "/users/42/avatar.png");
/// assert_eq!(generate_path("/files/*", &Params::new()).unwrap(), "/files");
/// assert!(generate_path("/users/:id", &Params::new()).is_err());
/// ```
pub fn generate_path(path: &str, params: &Params) -> Result<String, RouteError> {
    let (body, wildcard) = split_wildcard(path);
    let mut generated = String::with_capacity(path.len() + 16);

    for token in tokenize(body) {
        match token {
            Token::Literal(text) => generated.push_str(text),
            Token::Param(name) => {
                let value = params.get(name).ok_or_else(|| RouteError::MissingParam {
                    name: name.to_string(),
                })?;
                generated.push_str(value);
            }
        }
    }

    if let (Some(separated), Some(rest)) = (wildcard, params.get(WILDCARD)) {
        if separated {
            generated.push('/');
            generated.push_str(rest.trim_start_matches('/'));
        } else {
            generated.push_str(rest);
        }
    }

    Ok(generated)
}

/// Split off a trailing `*` together with any slashes in front of it
///
/// Returns the remaining body and, when there was a wildcard, whether a slash
/// separated it from the body.
fn split_wildcard(path: &str) -> (&str, Option<bool>) {
    match path.strip_suffix('*') {
        None => (path, None),
        Some(head) => {
            let body = head.trim_end_matches('/');
            (body, Some(body.len() != head.len()))
        }
    }
}
