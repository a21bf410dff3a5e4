//! Flat stacker records projected from `get-reward-set-pox-address` tuples.

use claritycodec_address::{contract_identifier, principal_address};
use claritycodec_core::{ClarityValue, TupleData};
use serde::Serialize;

use crate::error::PoxError;

/// One reward-set slot. Field names on the wire match the CSV export columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackerRecord {
    pub index: u64,
    pub cycle: u64,
    #[serde(rename = "poxAddrHash")]
    pub pox_addr_hash: String,
    #[serde(rename = "poxAddrVersion")]
    pub pox_addr_version: String,
    pub signer: String,
    /// Total locked micro-STX, decimal.
    pub ustx: String,
    #[serde(rename = "stackerAddress")]
    pub stacker_address: Option<String>,
}

/// CSV header, in column order.
pub const CSV_COLUMNS: [&str; 7] = [
    "index",
    "cycle",
    "poxAddrHash",
    "poxAddrVersion",
    "signer",
    "ustx",
    "stackerAddress",
];

impl StackerRecord {
    /// Project a reward-set entry tuple:
    ///
    /// ```text
    /// (tuple (pox-addr (tuple (hashbytes buff) (version buff)))
    ///        (signer buff) (stacker (optional principal)) (total-ustx uint))
    /// ```
    pub fn from_tuple(cycle: u64, index: u64, entry: &TupleData) -> Result<Self, PoxError> {
        let pox_addr = field(entry, "pox-addr")?
            .as_tuple()
            .ok_or_else(|| mistyped("pox-addr", "tuple", entry))?;
        let hashbytes = buffer_hex(pox_addr, "pox-addr.hashbytes", "hashbytes")?;
        let version = buffer_hex(pox_addr, "pox-addr.version", "version")?;
        let signer = buffer_hex(entry, "signer", "signer")?;

        let ustx = field(entry, "total-ustx")?
            .as_u128()
            .ok_or_else(|| mistyped("total-ustx", "uint", entry))?;

        let stacker = field(entry, "stacker")?;
        let stacker_address = match stacker.as_optional() {
            Some(None) => None,
            Some(Some(principal)) => Some(principal_text(principal)?),
            None => return Err(PoxError::shape("stacker", "optional principal", stacker.type_name())),
        };

        Ok(Self {
            index,
            cycle,
            pox_addr_hash: hashbytes,
            pox_addr_version: version,
            signer,
            ustx: ustx.to_string(),
            stacker_address,
        })
    }
}

fn field<'a>(tuple: &'a TupleData, key: &str) -> Result<&'a ClarityValue, PoxError> {
    tuple.get(key).ok_or_else(|| PoxError::shape(key, "present", "missing"))
}

fn mistyped(key: &str, expected: &'static str, tuple: &TupleData) -> PoxError {
    let got = tuple.get(key).map_or("missing", ClarityValue::type_name);
    PoxError::shape(key, expected, got)
}

fn buffer_hex(tuple: &TupleData, path: &str, key: &str) -> Result<String, PoxError> {
    let value = tuple.get(key).ok_or_else(|| PoxError::shape(path, "present", "missing"))?;
    value
        .as_buffer()
        .map(|b| format!("0x{}", hex::encode(b)))
        .ok_or_else(|| PoxError::shape(path, "buffer", value.type_name()))
}

fn principal_text(value: &ClarityValue) -> Result<String, PoxError> {
    if let Some(p) = value.as_standard_principal() {
        return Ok(principal_address(p)?);
    }
    if let Some(p) = value.as_contract_principal() {
        return Ok(contract_identifier(p)?);
    }
    Err(PoxError::shape("stacker", "principal", value.type_name()))
}
