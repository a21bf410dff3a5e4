//! c32 / c32check encoding.
//!
//! c32 is a base-32 encoding over the alphabet
//! `0123456789ABCDEFGHJKMNPQRSTVWXYZ`; each leading zero byte of the input is
//! kept as a leading `0` character. c32check prefixes a version character and
//! appends the first 4 bytes of `sha256(sha256(version ‖ data))`.

use sha2::{Digest, Sha256};

use crate::error::AddressError;

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Mainnet single-sig (`SP…`).
pub const MAINNET_SINGLESIG: u8 = 22;
/// Mainnet multi-sig (`SM…`).
pub const MAINNET_MULTISIG: u8 = 20;
/// Testnet single-sig (`ST…`).
pub const TESTNET_SINGLESIG: u8 = 26;
/// Testnet multi-sig (`SN…`).
pub const TESTNET_MULTISIG: u8 = 21;

/// Encode bytes as c32.
pub fn c32_encode(input: &[u8]) -> String {
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 8 / 5 + 1);
    let mut carry: u32 = 0;
    let mut carry_bits: u32 = 0;

    // Least-significant byte first; digits come out reversed.
    for &byte in input.iter().rev() {
        let byte = u32::from(byte);
        let take = 5 - carry_bits;
        let low = byte & ((1 << take) - 1);
        digits.push(C32_ALPHABET[((low << carry_bits) + carry) as usize]);
        carry_bits = 8 + carry_bits - 5;
        carry = byte >> (8 - carry_bits);

        if carry_bits >= 5 {
            digits.push(C32_ALPHABET[(carry & 0x1f) as usize]);
            carry_bits -= 5;
            carry >>= 5;
        }
    }
    if carry_bits > 0 {
        digits.push(C32_ALPHABET[carry as usize]);
    }

    while digits.last() == Some(&b'0') {
        digits.pop();
    }
    for _ in input.iter().take_while(|&&b| b == 0) {
        digits.push(b'0');
    }

    digits.iter().rev().map(|&d| d as char).collect()
}

/// Decode c32 text. Case-insensitive; `O` reads as `0`, `I` and `L` as `1`.
pub fn c32_decode(input: &str) -> Result<Vec<u8>, AddressError> {
    let values = input
        .chars()
        .map(c32_value)
        .collect::<Result<Vec<u8>, AddressError>>()?;

    let mut out: Vec<u8> = Vec::with_capacity(values.len() * 5 / 8 + 1);
    let mut carry: u32 = 0;
    let mut carry_bits: u32 = 0;

    for &v in values.iter().rev() {
        carry += u32::from(v) << carry_bits;
        carry_bits += 5;
        if carry_bits >= 8 {
            out.push((carry & 0xff) as u8);
            carry_bits -= 8;
            carry >>= 8;
        }
    }
    if carry_bits > 0 {
        out.push(carry as u8);
    }

    while out.last() == Some(&0) {
        out.pop();
    }
    for _ in values.iter().take_while(|&&v| v == 0) {
        out.push(0);
    }

    out.reverse();
    Ok(out)
}

fn c32_value(c: char) -> Result<u8, AddressError> {
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'I' | 'L' => '1',
        other => other,
    };
    C32_ALPHABET
        .iter()
        .position(|&a| a as char == normalized)
        .map(|p| p as u8)
        .ok_or(AddressError::InvalidCharacter { ch: c })
}

fn checksum(version: u8, data: &[u8]) -> [u8; 4] {
    let mut hasher = Sha256::new();
    hasher.update([version]);
    hasher.update(data);
    let first = hasher.finalize();
    let second = Sha256::digest(first);
    let mut out = [0u8; 4];
    out.copy_from_slice(&second[..4]);
    out
}

/// `version-char ‖ c32(data ‖ checksum)`.
pub fn c32check_encode(version: u8, data: &[u8]) -> Result<String, AddressError> {
    if version >= 32 {
        return Err(AddressError::InvalidVersion { version });
    }
    let mut payload = Vec::with_capacity(data.len() + 4);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum(version, data));

    let mut out = String::with_capacity(payload.len() * 8 / 5 + 2);
    out.push(C32_ALPHABET[version as usize] as char);
    out.push_str(&c32_encode(&payload));
    Ok(out)
}

/// Inverse of [`c32check_encode`]; verifies the checksum.
pub fn c32check_decode(input: &str) -> Result<(u8, Vec<u8>), AddressError> {
    let mut chars = input.chars();
    let version_char = chars.next().ok_or(AddressError::InvalidLength {
        expected: 1,
        got: 0,
    })?;
    let version = c32_value(version_char)?;

    let payload = c32_decode(chars.as_str())?;
    if payload.len() < 4 {
        return Err(AddressError::InvalidLength {
            expected: 4,
            got: payload.len(),
        });
    }
    let (data, sum) = payload.split_at(payload.len() - 4);
    if sum != checksum(version, data) {
        return Err(AddressError::BadChecksum);
    }
    Ok((version, data.to_vec()))
}

/// `S` ‖ c32check(version, hash160).
pub fn c32_address(version: u8, hash160: &[u8; 20]) -> Result<String, AddressError> {
    Ok(format!("S{}", c32check_encode(version, hash160)?))
}

/// Parse an `S…` address back into version and hash160.
pub fn c32_address_decode(address: &str) -> Result<(u8, [u8; 20]), AddressError> {
    let body = address
        .strip_prefix('S')
        .ok_or_else(|| AddressError::InvalidPrefix {
            address: address.to_string(),
        })?;
    let (version, data) = c32check_decode(body)?;
    let hash160: [u8; 20] = data
        .as_slice()
        .try_into()
        .map_err(|_| AddressError::InvalidLength {
            expected: 20,
            got: data.len(),
        })?;
    Ok((version, hash160))
}
