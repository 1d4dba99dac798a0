//! Private key: a secp256k1 scalar in `1..n`, always handled as 32 bytes.
//!
//! Leading zero bytes are part of the value; every rendering (hex, base64,
//! WIF) is fixed-width so the scalar round-trips losslessly.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hdkey_core::{Error, Result};
use hdkey_crypto::secp256k1::{self, SecretKey};
use hdkey_network::Network;
use rand::{CryptoRng, RngCore};
use tracing::trace;

use crate::public_key::PublicKey;
use crate::wif;

/// Private key length in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

const HEX_LEN: usize = PRIVATE_KEY_LEN * 2;
const BASE64_LEN: usize = 44;

/// Text encoding a private key was parsed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyFormat {
    Hex,
    Base64,
    Wif { network: Network, compressed: bool },
}

/// Result of [`PrivateKey::parse`]: the key plus the format that matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPrivateKey {
    pub key: PrivateKey,
    pub format: KeyFormat,
}

/// secp256k1 private key.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: SecretKey,
}

impl PrivateKey {
    /// Generate a random key.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self {
            secret: SecretKey::random(rng),
        }
    }

    /// Create from a 32-byte big-endian scalar.
    ///
    /// Fails if the scalar is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LEN]) -> Result<Self> {
        secp256k1::secret_from_bytes(bytes)
            .map(|secret| Self { secret })
            .ok_or_else(|| Error::InvalidKey("scalar is zero or not below the curve order".into()))
    }

    /// Create from a byte slice that must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; PRIVATE_KEY_LEN] = bytes.try_into().map_err(|_| {
            Error::InvalidKey(format!(
                "expected {PRIVATE_KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Self::from_bytes(bytes)
    }

    /// Parse 64 hex characters.
    pub fn from_hex(text: &str) -> Result<Self> {
        if text.len() != HEX_LEN {
            return Err(Error::InvalidHexFormat(format!(
                "expected {HEX_LEN} characters, got {}",
                text.len()
            )));
        }
        let bytes = hex::decode(text).map_err(|e| Error::InvalidHexFormat(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Parse padded standard base64 of the 32-byte scalar.
    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text)
            .map_err(|e| Error::InvalidBase64Format(e.to_string()))?;
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(Error::InvalidBase64Format(format!(
                "decodes to {} bytes, expected {PRIVATE_KEY_LEN}",
                bytes.len()
            )));
        }
        Self::from_slice(&bytes)
    }

    /// Parse WIF text, discarding the network and compression flag.
    ///
    /// Use [`wif::decode`] to keep them.
    pub fn from_wif(text: &str) -> Result<Self> {
        let decoded = wif::decode(text)?;
        Self::from_bytes(&decoded.secret)
    }

    /// Try hex, base64 and WIF in that order; the first that parses wins.
    pub fn parse(text: &str) -> Result<ParsedPrivateKey> {
        let attempts: [fn(&str) -> Result<ParsedPrivateKey>; 3] =
            [parse_hex, parse_base64, parse_wif];

        for attempt in attempts {
            match attempt(text) {
                Ok(parsed) => {
                    trace!(format = ?parsed.format, "parsed private key");
                    return Ok(parsed);
                }
                Err(e) => trace!(error = %e, "private key format attempt failed"),
            }
        }
        Err(Error::KeyFormatNotFound)
    }

    /// Big-endian scalar bytes.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        secp256k1::secret_to_bytes(&self.secret)
    }

    /// 64 lowercase hex characters, zero-padded.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// 44 characters of padded standard base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// WIF for the given network.
    pub fn to_wif(&self, network: Network, compressed: bool) -> Result<String> {
        wif::encode(&self.to_bytes(), network, compressed)
    }

    /// The public key `k·G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_private_key(self)
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub(crate) fn from_secret(secret: SecretKey) -> Self {
        Self { secret }
    }

    /// `(tweak + self) mod n`, or None if the tweak is >= n or the sum is zero.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Option<Self> {
        secp256k1::tweak_add_secret(&self.secret, tweak).map(Self::from_secret)
    }
}

fn parse_hex(text: &str) -> Result<ParsedPrivateKey> {
    Ok(ParsedPrivateKey {
        key: PrivateKey::from_hex(text)?,
        format: KeyFormat::Hex,
    })
}

fn parse_base64(text: &str) -> Result<ParsedPrivateKey> {
    if text.len() != BASE64_LEN {
        return Err(Error::InvalidBase64Format(format!(
            "expected {BASE64_LEN} characters, got {}",
            text.len()
        )));
    }
    Ok(ParsedPrivateKey {
        key: PrivateKey::from_base64(text)?,
        format: KeyFormat::Base64,
    })
}

fn parse_wif(text: &str) -> Result<ParsedPrivateKey> {
    let decoded = wif::decode(text)?;
    Ok(ParsedPrivateKey {
        key: PrivateKey::from_bytes(&decoded.secret)?,
        format: KeyFormat::Wif {
            network: decoded.network,
            compressed: decoded.compressed,
        },
    })
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).map(|parsed| parsed.key)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("scalar", &"[REDACTED]")
            .finish()
    }
}
