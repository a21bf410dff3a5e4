use thiserror::Error;

/// Errors from c32 / c32check address handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Address version {version} does not fit a c32 character (must be < 32)")]
    InvalidVersion { version: u8 },

    #[error("Invalid c32 character {ch:?}")]
    InvalidCharacter { ch: char },

    #[error("Address {address:?} does not start with 'S'")]
    InvalidPrefix { address: String },

    #[error("c32check checksum mismatch")]
    BadChecksum,

    #[error("Invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
