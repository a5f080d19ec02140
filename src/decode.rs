//! # Param Decoder
//!
//! Turns one raw captured path segment into a usable string. Decoding is
//! forgiving: a malformed value never prevents a route from matching. The
//! failure is reported to a [`DiagnosticSink`] and the raw value is kept.
//!
//! ## Decoding rules
//!
//! 1. Every `+` becomes a space.
//! 2. `%XX` escapes are decoded into bytes.
//! 3. The result must be valid UTF-8.
//!
//! A `%` that is not followed by two hex digits, or bytes that do not form
//! valid UTF-8, make the value malformed.
//!
//! ## Diagnostics
//!
//! The sink is a capability handed to the decoder, so library use stays
//! silent unless the application wants the events:
//!
//! - [`TracingSink`] emits a `warn` event through `tracing` (the default for
//!   [`match_path`](crate::router::match_path))
//! - [`NoopSink`] drops everything
//! - tests implement the trait to record what was reported

use crate::error::DecodeError;
use tracing::warn;

/// Receives decode failures for captured parameters
pub trait DiagnosticSink: Send + Sync {
    /// Called once per parameter whose value could not be decoded
    ///
    /// # Arguments
    ///
    /// * `param_name` - Name of the parameter the value was captured for
    /// * `raw` - The value as it will be returned (`+` already replaced)
    /// * `error` - Why decoding failed
    fn malformed_param(&self, param_name: &str, raw: &str, error: &DecodeError);
}

/// Reports decode failures as `tracing` warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn malformed_param(&self, param_name: &str, raw: &str, error: &DecodeError) {
        warn!(
            param_name = %param_name,
            raw_value = %raw,
            error = %error,
            "URL param will not be decoded: malformed URL segment, probably a bad percent encoding"
        );
    }
}

/// Discards decode failures
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn malformed_param(&self, _param_name: &str, _raw: &str, _error: &DecodeError) {}
}

/// Strictly percent-decode `value` after replacing `+` with a space
///
/// # Errors
///
/// Returns [`DecodeError`] for a malformed escape or invalid UTF-8.
///
/// # Example
///
/// ```rust
/// use pathrewrite::decode::try_decode;
///
/// assert_eq!(try_decode("caf%C3%A9+au+lait").unwrap(), "café au lait");
/// assert!(try_decode("100%").is_err());
/// ```
pub fn try_decode(value: &str) -> Result<String, DecodeError> {
    decode_spaced(&value.replace('+', " "))
}

fn decode_spaced(spaced: &str) -> Result<String, DecodeError> {
    check_escapes(spaced)?;
    urlencoding::decode(spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8)
}

/// `urlencoding` passes stray `%` through untouched; a URI component decoder must not
fn check_escapes(value: &str) -> Result<(), DecodeError> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(DecodeError::InvalidEscape { offset: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Decode a captured value, degrading to the raw value on failure
///
/// Never fails. When the value is malformed the sink is told which parameter
/// and value were affected, and the `+`-substituted but otherwise undecoded
/// value is returned.
///
/// # Example
///
/// ```rust
/// use pathrewrite::decode::{decode_param, NoopSink};
///
/// assert_eq!(decode_param("hello%20world", "q", &NoopSink), "hello world");
/// assert_eq!(decode_param("%E0%A4%A", "q", &NoopSink), "%E0%A4%A");
/// ```
pub fn decode_param(value: &str, param_name: &str, sink: &dyn DiagnosticSink) -> String {
    let spaced = value.replace('+', " ");
    match decode_spaced(&spaced) {
        Ok(decoded) => decoded,
        Err(error) => {
            sink.malformed_param(param_name, &spaced, &error);
            spaced
        }
    }
}
