//! # Ethereum-Style Addresses
//!
//! A 20-byte account address, parsed from `0x`-prefixed hex. Parsing accepts
//! any hex casing; the byte representation makes comparisons case-insensitive
//! by construction.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Errors produced when parsing an address from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Input is not 40 hex characters (plus optional `0x` prefix).
    #[error("Invalid address length: expected 40 hex characters, got {0}")]
    InvalidLength(usize),

    /// Input contains non-hex characters.
    #[error("Invalid address: not valid hexadecimal")]
    InvalidHex,
}

/// A 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Wrap raw address bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string, with or without the `0x` prefix.
    ///
    /// Casing is irrelevant: `0xAB..` and `0xab..` parse to the same value.
    pub fn from_hex(input: &str) -> Result<Self, AddressError> {
        let stripped = input.strip_prefix("0x").unwrap_or(input);
        if stripped.len() != 40 {
            return Err(AddressError::InvalidLength(stripped.len()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(stripped, &mut bytes).map_err(|_| AddressError::InvalidHex)?;
        Ok(Self(bytes))
    }

    /// Derive an address from an uncompressed secp256k1 public key
    /// (65 bytes: `0x04 || x || y`): last 20 bytes of keccak256 of `x || y`.
    pub fn from_uncompressed_pubkey(pubkey: &[u8]) -> Self {
        let mut hasher = Keccak256::new();
        // Skip the 0x04 prefix
        hasher.update(&pubkey[1..]);
        let digest = hasher.finalize();

        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Self(bytes)
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex rendering with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Abbreviated rendering for logs and views: `0x1234…abcd`.
    pub fn short(&self) -> String {
        let full = self.to_hex();
        format!("{}…{}", &full[..6], &full[full.len() - 4..])
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
