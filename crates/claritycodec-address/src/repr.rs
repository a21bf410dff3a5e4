//! Render decoded values in Clarity surface syntax.

use claritycodec_core::{ClarityValue, ContractPrincipal, StandardPrincipal};

use crate::c32::c32_address;
use crate::error::AddressError;

/// Checksummed `S…` address of a standard principal.
pub fn principal_address(p: &StandardPrincipal) -> Result<String, AddressError> {
    c32_address(p.version(), p.hash160())
}

/// `ADDR.contract-name` identifier of a contract principal.
pub fn contract_identifier(p: &ContractPrincipal) -> Result<String, AddressError> {
    Ok(format!("{}.{}", principal_address(p.issuer())?, p.name()))
}

/// Render `value` the way Clarity prints it, e.g. `(some (tuple (amount u5)))`.
///
/// Fails only when a principal carries a version byte ≥ 32, which has no
/// c32 representation.
pub fn to_repr(value: &ClarityValue) -> Result<String, AddressError> {
    let mut out = String::new();
    write_repr(value, &mut out)?;
    Ok(out)
}

fn write_repr(value: &ClarityValue, out: &mut String) -> Result<(), AddressError> {
    match value {
        ClarityValue::Int(v) => out.push_str(&v.to_string()),
        ClarityValue::UInt(v) => {
            out.push('u');
            out.push_str(&v.to_string());
        }
        ClarityValue::Buffer(b) => {
            out.push_str("0x");
            out.push_str(&hex::encode(b));
        }
        ClarityValue::BoolTrue => out.push_str("true"),
        ClarityValue::BoolFalse => out.push_str("false"),
        ClarityValue::PrincipalStandard(p) => {
            out.push('\'');
            out.push_str(&principal_address(p)?);
        }
        ClarityValue::PrincipalContract(p) => {
            out.push('\'');
            out.push_str(&contract_identifier(p)?);
        }
        ClarityValue::ResponseOk(inner) => wrap("ok", inner, out)?,
        ClarityValue::ResponseErr(inner) => wrap("err", inner, out)?,
        ClarityValue::OptionalNone => out.push_str("none"),
        ClarityValue::OptionalSome(inner) => wrap("some", inner, out)?,
        ClarityValue::List(items) => {
            out.push_str("(list");
            for item in items {
                out.push(' ');
                write_repr(item, out)?;
            }
            out.push(')');
        }
        ClarityValue::Tuple(tuple) => {
            out.push_str("(tuple");
            for (key, item) in tuple.iter() {
                out.push_str(" (");
                out.push_str(key);
                out.push(' ');
                write_repr(item, out)?;
                out.push(')');
            }
            out.push(')');
        }
        ClarityValue::StringAscii(s) => quote(s, out),
        ClarityValue::StringUtf8(s) => {
            out.push('u');
            quote(s, out);
        }
    }
    Ok(())
}

fn wrap(keyword: &str, inner: &ClarityValue, out: &mut String) -> Result<(), AddressError> {
    out.push('(');
    out.push_str(keyword);
    out.push(' ');
    write_repr(inner, out)?;
    out.push(')');
    Ok(())
}

fn quote(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use claritycodec_core::TupleData;

    #[test]
    fn scalars() {
        assert_eq!(to_repr(&ClarityValue::Int(-3)).unwrap(), "-3");
        assert_eq!(to_repr(&ClarityValue::UInt(5)).unwrap(), "u5");
        assert_eq!(to_repr(&ClarityValue::Buffer(vec![0x0a, 0xff])).unwrap(), "0x0aff");
        assert_eq!(to_repr(&ClarityValue::OptionalNone).unwrap(), "none");
        assert_eq!(
            to_repr(&ClarityValue::StringAscii("say \"hi\"".into())).unwrap(),
            r#""say \"hi\"""#
        );
        assert_eq!(to_repr(&ClarityValue::StringUtf8("é".into())).unwrap(), "u\"é\"");
    }

    #[test]
    fn composites() {
        let v = ClarityValue::some(ClarityValue::Tuple(
            TupleData::from_entries([
                ("total-ustx", ClarityValue::UInt(100)),
                ("ok", ClarityValue::ok(ClarityValue::BoolTrue)),
                ("items", ClarityValue::List(vec![ClarityValue::Int(1), ClarityValue::Int(2)])),
            ])
            .unwrap(),
        ));
        assert_eq!(
            to_repr(&v).unwrap(),
            "(some (tuple (total-ustx u100) (ok (ok true)) (items (list 1 2))))"
        );
    }

    #[test]
    fn principals() {
        let boot = StandardPrincipal::new(22, [0u8; 20]);
        assert_eq!(
            to_repr(&ClarityValue::PrincipalStandard(boot)).unwrap(),
            "'SP000000000000000000002Q6VF78"
        );
        let pox = ContractPrincipal::new(boot, "pox-4");
        assert_eq!(
            contract_identifier(&pox).unwrap(),
            "SP000000000000000000002Q6VF78.pox-4"
        );
    }

    #[test]
    fn principal_with_out_of_range_version() {
        let bad = StandardPrincipal::new(0x80, [0u8; 20]);
        assert_eq!(
            to_repr(&ClarityValue::PrincipalStandard(bad)),
            Err(AddressError::InvalidVersion { version: 0x80 })
        );
    }
}
