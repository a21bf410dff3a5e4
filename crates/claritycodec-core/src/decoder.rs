//! Recursive tag-dispatch decoder for Clarity values.
//!
//! Each value starts with a one-byte [`TypeTag`]; composite tags recurse into
//! their children in encoded order. Nesting is bounded by
//! [`DecodeOptions::max_depth`] so adversarial input cannot exhaust the stack.

use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::value::{ClarityValue, ContractPrincipal, StandardPrincipal, TupleData, TypeTag};

/// Default bound on composite nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// The top-level value sits at depth 0; each nested child is one deeper.
    /// A value deeper than this bound fails with `MaxDepthExceeded`.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Stateless Clarity value decoder.
/// Thread-safe, cheap to copy; each call owns its own cursor.
#[derive(Debug, Default, Clone, Copy)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::with_options(DecodeOptions { max_depth })
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decode one value from the front of `bytes`. Trailing bytes are ignored.
    pub fn decode(&self, bytes: &[u8]) -> Result<ClarityValue, DecodeError> {
        let mut cursor = ByteCursor::new(bytes);
        self.decode_cursor(&mut cursor)
    }

    /// Decode one value that must span all of `bytes`.
    pub fn decode_exact(&self, bytes: &[u8]) -> Result<ClarityValue, DecodeError> {
        let mut cursor = ByteCursor::new(bytes);
        let value = self.decode_cursor(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(DecodeError::TrailingBytes {
                remaining: cursor.remaining(),
            });
        }
        Ok(value)
    }

    /// Decode one value from hex text, with or without a leading `0x`.
    pub fn decode_hex(&self, hex_str: &str) -> Result<ClarityValue, DecodeError> {
        let bytes = parse_hex(hex_str)?;
        tracing::trace!(len = bytes.len(), "decoding clarity value from hex");
        self.decode(&bytes)
    }

    /// Decode one value starting at the cursor's current position.
    pub fn decode_cursor(&self, cursor: &mut ByteCursor<'_>) -> Result<ClarityValue, DecodeError> {
        self.decode_value(cursor, 0)
    }

    fn decode_value(
        &self,
        cursor: &mut ByteCursor<'_>,
        depth: usize,
    ) -> Result<ClarityValue, DecodeError> {
        if depth > self.options.max_depth {
            return Err(DecodeError::MaxDepthExceeded {
                max_depth: self.options.max_depth,
            });
        }

        let offset = cursor.position();
        let tag = TypeTag::try_from(cursor.read_u8()?)
            .map_err(|tag| DecodeError::UnknownTypeTag { tag, offset })?;

        let value = match tag {
            TypeTag::Int => ClarityValue::Int(i128::from_be_bytes(cursor.read_array::<16>()?)),
            TypeTag::UInt => ClarityValue::UInt(u128::from_be_bytes(cursor.read_array::<16>()?)),
            TypeTag::Buffer => {
                let len = read_len(cursor)?;
                ClarityValue::Buffer(cursor.read_bytes(len)?.to_vec())
            }
            TypeTag::BoolTrue => ClarityValue::BoolTrue,
            TypeTag::BoolFalse => ClarityValue::BoolFalse,
            TypeTag::PrincipalStandard => {
                ClarityValue::PrincipalStandard(read_standard_principal(cursor)?)
            }
            TypeTag::PrincipalContract => {
                let issuer = read_standard_principal(cursor)?;
                let name = read_short_ascii(cursor)?;
                ClarityValue::PrincipalContract(ContractPrincipal::new(issuer, name))
            }
            TypeTag::ResponseOk => ClarityValue::ok(self.decode_value(cursor, depth + 1)?),
            TypeTag::ResponseErr => ClarityValue::err(self.decode_value(cursor, depth + 1)?),
            TypeTag::OptionalNone => ClarityValue::OptionalNone,
            TypeTag::OptionalSome => ClarityValue::some(self.decode_value(cursor, depth + 1)?),
            TypeTag::List => {
                let count = read_len(cursor)?;
                // Every element is at least one byte, so the remaining input
                // bounds any honest count.
                let mut items = Vec::with_capacity(count.min(cursor.remaining()));
                for _ in 0..count {
                    items.push(self.decode_value(cursor, depth + 1)?);
                }
                ClarityValue::List(items)
            }
            TypeTag::Tuple => {
                let count = read_len(cursor)?;
                let mut tuple = TupleData::with_capacity(count.min(cursor.remaining()));
                for _ in 0..count {
                    let key = read_short_ascii(cursor)?;
                    if tuple.get(&key).is_some() {
                        return Err(DecodeError::DuplicateTupleKey { key });
                    }
                    let value = self.decode_value(cursor, depth + 1)?;
                    tuple.try_insert(key, value)?;
                }
                ClarityValue::Tuple(tuple)
            }
            TypeTag::StringAscii => {
                let len = read_len(cursor)?;
                ClarityValue::StringAscii(ascii_string(cursor.read_bytes(len)?)?)
            }
            TypeTag::StringUtf8 => {
                let len = read_len(cursor)?;
                let text = std::str::from_utf8(cursor.read_bytes(len)?).map_err(|e| {
                    DecodeError::InvalidText {
                        encoding: "UTF-8",
                        reason: e.to_string(),
                    }
                })?;
                ClarityValue::StringUtf8(text.to_owned())
            }
        };

        Ok(value)
    }
}

/// Decode one value from raw bytes with default options.
pub fn decode(bytes: &[u8]) -> Result<ClarityValue, DecodeError> {
    Decoder::new().decode(bytes)
}

/// Decode one value from hex text (optional `0x`) with default options.
pub fn decode_hex(hex_str: &str) -> Result<ClarityValue, DecodeError> {
    Decoder::new().decode_hex(hex_str)
}

/// Strip an optional `0x` prefix and decode hex digits.
pub fn parse_hex(hex_str: &str) -> Result<Vec<u8>, DecodeError> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(stripped).map_err(|e| DecodeError::InvalidHexEncoding {
        reason: e.to_string(),
    })
}

fn read_len(cursor: &mut ByteCursor<'_>) -> Result<usize, DecodeError> {
    Ok(cursor.read_u32_be()? as usize)
}

fn read_standard_principal(cursor: &mut ByteCursor<'_>) -> Result<StandardPrincipal, DecodeError> {
    let version = cursor.read_u8()?;
    let hash160 = cursor.read_array::<20>()?;
    Ok(StandardPrincipal::new(version, hash160))
}

/// u8-length-prefixed ASCII, used for tuple keys and contract names.
fn read_short_ascii(cursor: &mut ByteCursor<'_>) -> Result<String, DecodeError> {
    let len = cursor.read_u8()? as usize;
    ascii_string(cursor.read_bytes(len)?)
}

fn ascii_string(bytes: &[u8]) -> Result<String, DecodeError> {
    match bytes.iter().position(|b| !b.is_ascii()) {
        // All-ASCII input is valid UTF-8.
        None => Ok(bytes.iter().map(|&b| b as char).collect()),
        Some(pos) => Err(DecodeError::InvalidText {
            encoding: "ASCII",
            reason: format!("non-ASCII byte 0x{:02x} at position {pos}", bytes[pos]),
        }),
    }
}
