use std::fmt;

/// Error returned by [`generate_path`](crate::router::generate_path)
///
/// Generation is the only operation in the crate that can fail on caller
/// input: a pattern demands a value the caller did not supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A `:name` placeholder had no value in the supplied params
    MissingParam {
        /// The placeholder name, without the leading `:`
        name: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::MissingParam { name } => write!(f, "Missing \":{name}\" param"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Error returned by [`compile_path`](crate::pattern::compile_path)
///
/// Every pattern string is legal input. The only refusal comes from the regex
/// engine itself when the synthesized expression exceeds its size limit.
#[derive(Debug, Clone)]
pub enum PatternError {
    /// The synthesized expression was rejected by the regex engine
    Compile {
        /// The pattern string as supplied by the caller
        pattern: String,
        /// The engine's error
        source: regex::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Compile { pattern, source } => {
                write!(f, "failed to compile path pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Compile { source, .. } => Some(source),
        }
    }
}

/// Error returned by [`try_decode`](crate::decode::try_decode)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` that is not followed by two hex digits
    InvalidEscape {
        /// Byte offset of the offending `%`
        offset: usize,
    },
    /// The decoded bytes are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidEscape { offset } => {
                write!(f, "URI malformed: invalid percent escape at byte {offset}")
            }
            DecodeError::InvalidUtf8 => {
                write!(f, "URI malformed: percent-decoded bytes are not valid UTF-8")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
