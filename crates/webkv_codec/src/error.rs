//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A `%` escape was truncated or not followed by two hex digits.
    #[error("malformed percent escape at byte {position}")]
    MalformedEscape {
        /// Byte offset of the offending `%`.
        position: usize,
    },

    /// Percent-decoded bytes were not valid UTF-8.
    #[error("percent-decoded bytes are not valid UTF-8")]
    InvalidUtf8,

    /// JSON serialization or parsing failed.
    #[error("JSON error: {message}")]
    Json {
        /// Description of the JSON error.
        message: String,
    },
}

impl CodecError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}
