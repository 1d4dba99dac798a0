//! Identifiers, fingerprints and Base58Check addresses.
//!
//! Address format:
//! - Version byte: network address or script-hash version (1 byte)
//! - Content: HASH160 of the serialized point or script (20 bytes)
//! - Encoded: Base58Check(version || content)

#![forbid(unsafe_code)]

use std::fmt;

use hdkey_core::Result;
use hdkey_crypto::{base58, hash};
use hdkey_network::Network;

/// Identifier length in bytes.
pub const IDENTIFIER_LEN: usize = 20;

/// Fingerprint length in bytes.
pub const FINGERPRINT_LEN: usize = 4;

/// RIPEMD160(SHA256(serialized public key)).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identifier(pub [u8; IDENTIFIER_LEN]);

impl Identifier {
    /// Hash a serialized public key.
    pub fn from_serialized_key(bytes: &[u8]) -> Self {
        Self(hash::hash160(bytes))
    }

    /// First four bytes of the identifier.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut bytes = [0u8; FINGERPRINT_LEN];
        bytes.copy_from_slice(&self.0[..FINGERPRINT_LEN]);
        Fingerprint(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; IDENTIFIER_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parent reference carried by child keys. Zero for roots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; FINGERPRINT_LEN]);

impl Fingerprint {
    pub const ZERO: Self = Self([0u8; FINGERPRINT_LEN]);

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Encode `version || hash` as Base58Check.
pub fn encode_address(version: u8, hash: &[u8; IDENTIFIER_LEN]) -> String {
    let mut payload = [0u8; 1 + IDENTIFIER_LEN];
    payload[0] = version;
    payload[1..].copy_from_slice(hash);
    base58::encode_check(&payload)
}

/// Encode a script hash with the network's script-hash version.
pub fn encode_p2sh(script_hash: &[u8; IDENTIFIER_LEN], network: Network) -> Result<String> {
    Ok(encode_address(network.p2sh_version()?, script_hash))
}
