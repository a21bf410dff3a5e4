//! Client-level error types.

use claritycodec_core::{DecodeError, EncodeError};
use thiserror::Error;

/// Errors that can occur during a read-only contract call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not be sent or the connection dropped.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Node answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Node answered HTTP 429.
    #[error("Rate limit exceeded (endpoint: {endpoint})")]
    RateLimited { endpoint: String },

    /// The node evaluated the call and reported `okay: false`.
    #[error("Read-only call failed: {cause}")]
    CallFailed { cause: String },

    #[error("Response has okay=true but no result")]
    MissingResult,

    #[error("Invalid contract identifier {id:?}: {reason}")]
    InvalidContractId { id: String, reason: String },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Argument encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Result decoding failed: {0}")]
    Decode(#[from] DecodeError),
}

impl ClientError {
    /// Returns `true` if the error is transient and the call may be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout { .. } | Self::RateLimited { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ClientError::Http("reset".into()).is_retryable());
        assert!(ClientError::Timeout { ms: 10 }.is_retryable());
        assert!(ClientError::RateLimited { endpoint: "http://node".into() }.is_retryable());
        assert!(ClientError::Status { status: 503, body: String::new() }.is_retryable());
        assert!(!ClientError::Status { status: 404, body: String::new() }.is_retryable());
        assert!(!ClientError::CallFailed { cause: "x".into() }.is_retryable());
        assert!(!ClientError::MissingResult.is_retryable());
    }
}
