//! Serialize a `ClarityValue` back to its wire form.
//!
//! Used to build read-only call arguments; the output is byte-for-byte what
//! the decoder accepts.

use crate::error::EncodeError;
use crate::value::{ClarityValue, StandardPrincipal};

impl ClarityValue {
    /// Encode to wire bytes.
    pub fn serialize_to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        write_value(self, &mut out)?;
        Ok(out)
    }

    /// Encode to `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> Result<String, EncodeError> {
        Ok(format!("0x{}", hex::encode(self.serialize_to_vec()?)))
    }
}

fn write_value(value: &ClarityValue, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    out.push(value.type_tag().as_u8());
    match value {
        ClarityValue::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
        ClarityValue::UInt(v) => out.extend_from_slice(&v.to_be_bytes()),
        ClarityValue::Buffer(bytes) => {
            write_u32_len("buffer", bytes.len(), out)?;
            out.extend_from_slice(bytes);
        }
        ClarityValue::BoolTrue | ClarityValue::BoolFalse | ClarityValue::OptionalNone => {}
        ClarityValue::PrincipalStandard(p) => write_standard_principal(p, out),
        ClarityValue::PrincipalContract(p) => {
            write_standard_principal(p.issuer(), out);
            write_short_ascii("contract name", p.name(), out)?;
        }
        ClarityValue::ResponseOk(inner)
        | ClarityValue::ResponseErr(inner)
        | ClarityValue::OptionalSome(inner) => write_value(inner, out)?,
        ClarityValue::List(items) => {
            write_u32_len("list", items.len(), out)?;
            for item in items {
                write_value(item, out)?;
            }
        }
        ClarityValue::Tuple(tuple) => {
            write_u32_len("tuple", tuple.len(), out)?;
            for (key, item) in tuple.iter() {
                write_short_ascii("tuple key", key, out)?;
                write_value(item, out)?;
            }
        }
        ClarityValue::StringAscii(s) => {
            if !s.is_ascii() {
                return Err(EncodeError::InvalidText {
                    encoding: "ASCII",
                    what: "string-ascii",
                });
            }
            write_u32_len("string-ascii", s.len(), out)?;
            out.extend_from_slice(s.as_bytes());
        }
        ClarityValue::StringUtf8(s) => {
            write_u32_len("string-utf8", s.len(), out)?;
            out.extend_from_slice(s.as_bytes());
        }
    }
    Ok(())
}

fn write_standard_principal(p: &StandardPrincipal, out: &mut Vec<u8>) {
    out.push(p.version());
    out.extend_from_slice(p.hash160());
}

fn write_u32_len(what: &'static str, len: usize, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let len32 = u32::try_from(len).map_err(|_| EncodeError::LengthOverflow {
        what,
        len,
        max: u32::MAX as usize,
    })?;
    out.extend_from_slice(&len32.to_be_bytes());
    Ok(())
}

fn write_short_ascii(what: &'static str, s: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    if !s.is_ascii() {
        return Err(EncodeError::InvalidText {
            encoding: "ASCII",
            what,
        });
    }
    let len = u8::try_from(s.len()).map_err(|_| EncodeError::LengthOverflow {
        what,
        len: s.len(),
        max: u8::MAX as usize,
    })?;
    out.push(len);
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use crate::value::{ContractPrincipal, TupleData};

    #[test]
    fn uint_argument_hex() {
        // The form read-only calls expect for a reward cycle argument.
        assert_eq!(
            ClarityValue::UInt(90).to_hex().unwrap(),
            "0x010000000000000000000000000000005a"
        );
    }

    #[test]
    fn optional_tuple_layout() {
        let v = ClarityValue::some(ClarityValue::Tuple(
            TupleData::from_entries([("a", ClarityValue::BoolTrue)]).unwrap(),
        ));
        assert_eq!(
            v.serialize_to_vec().unwrap(),
            vec![0x0a, 0x0c, 0, 0, 0, 1, 1, b'a', 0x03]
        );
    }

    #[test]
    fn nested_value_survives_decode() {
        let issuer = StandardPrincipal::new(22, [7u8; 20]);
        let v = ClarityValue::ok(ClarityValue::List(vec![
            ClarityValue::Int(i128::MIN),
            ClarityValue::PrincipalContract(ContractPrincipal::new(issuer, "pox-4")),
            ClarityValue::StringUtf8("héllo".into()),
            ClarityValue::OptionalNone,
        ]));
        let bytes = v.serialize_to_vec().unwrap();
        assert_eq!(decode(&bytes).unwrap(), v);
    }

    #[test]
    fn long_contract_name_overflows_prefix() {
        let name = "x".repeat(256);
        let v = ClarityValue::PrincipalContract(ContractPrincipal::new(
            StandardPrincipal::new(22, [0u8; 20]),
            name,
        ));
        assert_eq!(
            v.serialize_to_vec().unwrap_err(),
            EncodeError::LengthOverflow {
                what: "contract name",
                len: 256,
                max: 255
            }
        );
    }

    #[test]
    fn non_ascii_string_ascii_is_rejected() {
        let v = ClarityValue::StringAscii("é".into());
        assert!(matches!(
            v.serialize_to_vec(),
            Err(EncodeError::InvalidText { encoding: "ASCII", .. })
        ));
    }

    #[test]
    fn wire_encoding_coexists_with_serde() {
        use serde::Serialize;

        let v = ClarityValue::UInt(5);
        let mut json = Vec::new();
        v.serialize(&mut serde_json::Serializer::new(&mut json)).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), r#"{"type":"uint","value":"5"}"#);
        assert_eq!(v.serialize_to_vec().unwrap().len(), 17);
    }
}
