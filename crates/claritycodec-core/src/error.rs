//! Error types for the Clarity value codec.

use thiserror::Error;

/// Errors that can occur while decoding a single Clarity value.
///
/// Every variant is terminal for the decode call that raised it: the decoder
/// never hands back a partially-populated value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Buffer underrun at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Unknown type tag 0x{tag:02x} at offset {offset}")]
    UnknownTypeTag { tag: u8, offset: usize },

    #[error("Invalid {encoding} text: {reason}")]
    InvalidText {
        encoding: &'static str,
        reason: String,
    },

    #[error("Duplicate tuple key: {key}")]
    DuplicateTupleKey { key: String },

    #[error("Maximum nesting depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },

    #[error("Invalid hex encoding: {reason}")]
    InvalidHexEncoding { reason: String },

    #[error("{remaining} trailing bytes after top-level value")]
    TrailingBytes { remaining: usize },
}

impl DecodeError {
    /// Short machine-friendly name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BufferUnderrun { .. } => "buffer_underrun",
            Self::UnknownTypeTag { .. } => "unknown_type_tag",
            Self::InvalidText { .. } => "invalid_text",
            Self::DuplicateTupleKey { .. } => "duplicate_tuple_key",
            Self::MaxDepthExceeded { .. } => "max_depth_exceeded",
            Self::InvalidHexEncoding { .. } => "invalid_hex_encoding",
            Self::TrailingBytes { .. } => "trailing_bytes",
        }
    }
}

/// Errors that can occur while serializing a value back to wire form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{what} length {len} exceeds the {max}-byte limit of its prefix")]
    LengthOverflow {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Invalid {encoding} text in {what}")]
    InvalidText {
        encoding: &'static str,
        what: &'static str,
    },
}

/// Errors that can occur during batch decoding.
#[derive(Debug, Error)]
pub enum BatchDecodeError {
    #[error("Decode error at index {index}: {source}")]
    ItemFailed {
        index: usize,
        #[source]
        source: DecodeError,
    },
}
