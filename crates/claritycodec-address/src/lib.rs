//! # claritycodec-address
//!
//! Stacks c32check addresses and Clarity `repr` rendering.
//!
//! The codec only carries a principal's raw version byte and hash160; this
//! crate turns them into the checksummed `SP…` / `ST…` text form and back.

pub mod c32;
pub mod error;
pub mod repr;

pub use c32::{
    c32_address, c32_address_decode, c32_decode, c32_encode, c32check_decode, c32check_encode,
    MAINNET_MULTISIG, MAINNET_SINGLESIG, TESTNET_MULTISIG, TESTNET_SINGLESIG,
};
pub use error::AddressError;
pub use repr::{contract_identifier, principal_address, to_repr};
