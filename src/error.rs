//! Error handling for the Linkhub client.
//!
//! Every failure carries a numeric code and a message. Errors raised by the
//! remote authority keep the server's code verbatim; everything raised
//! locally uses [`LOCAL_ERROR_CODE`].

use thiserror::Error;

/// Code attached to every locally raised error.
///
/// Server-issued codes never use this value, so callers can tell a local
/// failure from a rejected request by the code alone.
pub const LOCAL_ERROR_CODE: i64 = -99_999_999;

/// All errors produced by the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkhubError {
    /// A required credential or identifier was missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input is not a valid JSON document.
    #[error("malformed JSON at byte {offset}: {reason}")]
    MalformedJson {
        /// Byte offset where parsing stopped
        offset: u64,
        /// What the parser expected or found
        reason: String,
    },

    /// Input exceeded one of the parser's resource limits.
    #[error("JSON {what} limit exceeded: {got} > {max}")]
    LimitExceeded {
        /// Which limit was hit
        what: &'static str,
        /// Observed size
        got: u64,
        /// Configured maximum
        max: u64,
    },

    /// A JSON scalar cannot satisfy the requested primitive type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Requested Rust-side kind
        expected: &'static str,
        /// What the JSON actually held
        found: String,
    },

    /// A JSON container cannot satisfy the requested shape.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Requested shape
        expected: &'static str,
        /// JSON type that was found
        found: &'static str,
    },

    /// The authority rejected the request with a structured error body.
    #[error("remote error {code}: {message}")]
    RemoteApi {
        /// Server-issued code
        code: i64,
        /// Server-issued message
        message: String,
    },

    /// Network failure or an unstructured non-success response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl LinkhubError {
    /// Get the numeric error code.
    pub fn code(&self) -> i64 {
        match self {
            LinkhubError::RemoteApi { code, .. } => *code,
            _ => LOCAL_ERROR_CODE,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            LinkhubError::Configuration(_) => "ConfigurationError",
            LinkhubError::MalformedJson { .. } => "MalformedJson",
            LinkhubError::LimitExceeded { .. } => "LimitExceeded",
            LinkhubError::TypeMismatch { .. } => "TypeMismatch",
            LinkhubError::ShapeMismatch { .. } => "ShapeMismatch",
            LinkhubError::RemoteApi { .. } => "RemoteApiError",
            LinkhubError::Transport(_) => "TransportError",
        }
    }

    /// Returns the message without the variant prefix.
    ///
    /// For remote errors this is the server's message verbatim.
    pub fn message(&self) -> String {
        match self {
            LinkhubError::Configuration(msg) | LinkhubError::Transport(msg) => msg.clone(),
            LinkhubError::RemoteApi { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        LinkhubError::MalformedJson {
            offset: offset as u64,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        LinkhubError::Configuration(message.into())
    }
}

/// Result type for Linkhub operations.
pub type LinkhubResult<T> = Result<T, LinkhubError>;
