//! # claritycodec-core
//!
//! Wire codec for Clarity values, the tag-prefixed binary format Stacks
//! nodes use for read-only call results and transaction arguments.
//!
//! ```
//! use claritycodec_core::{decode_hex, ClarityValue};
//!
//! // (some u5)
//! let v = decode_hex("0x0a0100000000000000000000000000000005").unwrap();
//! assert_eq!(v, ClarityValue::some(ClarityValue::UInt(5)));
//! ```
//!
//! Decoding is a pure function of the input bytes: no I/O, no shared state,
//! bounded recursion. Address rendering, HTTP and export live in sibling
//! crates.

pub mod batch;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod value;

pub use batch::{decode_batch, BatchDecodeResult, ErrorMode};
pub use cursor::ByteCursor;
pub use decoder::{decode, decode_hex, parse_hex, DecodeOptions, Decoder, DEFAULT_MAX_DEPTH};
pub use error::{BatchDecodeError, DecodeError, EncodeError};
pub use value::{ClarityValue, ContractPrincipal, StandardPrincipal, TupleData, TypeTag};
