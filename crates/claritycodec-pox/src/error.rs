//! Harvester and export error types.

use claritycodec_address::AddressError;
use claritycodec_rpc::ClientError;
use thiserror::Error;

/// Errors from reading and projecting reward-set entries.
#[derive(Debug, Error)]
pub enum PoxError {
    /// A decoded value does not have the shape the contract is known to return.
    #[error("unexpected shape for {field}: expected {expected}, got {got}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
        got: String,
    },

    #[error("contract call failed: {0}")]
    Client(#[from] ClientError),

    #[error("address encoding failed: {0}")]
    Address(#[from] AddressError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PoxError {
    pub(crate) fn shape(field: impl Into<String>, expected: &'static str, got: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            field: field.into(),
            expected,
            got: got.into(),
        }
    }
}

/// Errors from writing records out.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
