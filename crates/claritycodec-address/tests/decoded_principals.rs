//! Principals coming out of the decoder render as the addresses Stacks tools show.

use claritycodec_address::{c32_address, c32_address_decode, principal_address, to_repr, MAINNET_SINGLESIG};
use claritycodec_core::{decode_hex, ClarityValue};

#[test]
fn decoded_contract_principal_renders_identifier() {
    let hex = format!("0x0616{}05{}", "00".repeat(20), hex::encode("pox-4"));
    let value = decode_hex(&hex).unwrap();
    assert_eq!(to_repr(&value).unwrap(), "'SP000000000000000000002Q6VF78.pox-4");
}

#[test]
fn address_survives_wire_roundtrip() {
    let sender = "SP3TRVBX53CN78AS8C3HNTM3GPNDHGA34F9M7MAH2";
    let (version, hash160) = c32_address_decode(sender).unwrap();
    assert_eq!(version, MAINNET_SINGLESIG);

    let wire = format!("0x05{:02x}{}", version, hex::encode(hash160));
    let value = decode_hex(&wire).unwrap();
    let principal = value.as_standard_principal().unwrap();
    assert_eq!(principal_address(principal).unwrap(), sender);
    assert_eq!(c32_address(principal.version(), principal.hash160()).unwrap(), sender);
}

#[test]
fn optional_stacker_field() {
    let (version, hash160) = c32_address_decode("SP000000000000000000002Q6VF78").unwrap();
    let wire = format!("0x0a05{:02x}{}", version, hex::encode(hash160));
    let value = decode_hex(&wire).unwrap();
    assert!(matches!(value, ClarityValue::OptionalSome(_)));
    assert_eq!(to_repr(&value).unwrap(), "(some 'SP000000000000000000002Q6VF78)");
}
