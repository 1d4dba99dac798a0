//! BIP32 child key derivation.
//!
//! Master key from a seed, CKDpriv (hardened and normal) and CKDpub
//! (normal only). An IL >= n or a zero result is surfaced as
//! `InvalidDerivationResult` rather than skipped.

#![forbid(unsafe_code)]

use std::fmt;

use hdkey_core::{Error, Result};
use hdkey_crypto::hmac::{hmac_sha512, split};
use hdkey_keys::{PrivateKey, PublicKey};
use tracing::trace;

/// Hardened derivation flag.
pub const HARDENED: u32 = 0x8000_0000;

/// HMAC key for master key generation.
pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

pub const MIN_SEED_LEN: usize = 16;
pub const MAX_SEED_LEN: usize = 64;

/// HMAC input length: 33 bytes of key material plus a 4-byte index.
const DATA_LEN: usize = 33 + 4;

/// True if bit 31 of the child number is set.
pub const fn is_hardened(index: u32) -> bool {
    index & HARDENED != 0
}

/// 32-byte chain code carried by every node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainCode(pub [u8; 32]);

impl ChainCode {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainCode({})", self.to_hex())
    }
}

/// Derive the master key and chain code from a seed.
///
/// Uses HMAC-SHA512("Bitcoin seed", seed). Seeds must be 16 to 64 bytes.
pub fn master_key(seed: &[u8]) -> Result<(PrivateKey, ChainCode)> {
    if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
        return Err(Error::InvalidSeedLength { got: seed.len() });
    }

    let (il, ir) = split(&hmac_sha512(MASTER_HMAC_KEY, seed));
    let key =
        PrivateKey::from_bytes(&il).map_err(|_| Error::InvalidDerivationResult { index: 0 })?;

    Ok((key, ChainCode(ir)))
}

/// CKDpriv: derive a child private key at `index`.
///
/// Hardened: data = 0x00 || key || index
/// Normal:   data = compressed_pubkey || index
pub fn derive_private(
    parent: &PrivateKey,
    chain_code: &ChainCode,
    index: u32,
) -> Result<(PrivateKey, ChainCode)> {
    let mut data = [0u8; DATA_LEN];
    if is_hardened(index) {
        data[1..33].copy_from_slice(&parent.to_bytes());
    } else {
        data[..33].copy_from_slice(&parent.public_key().to_compressed_bytes());
    }
    data[33..].copy_from_slice(&index.to_be_bytes());

    let (il, ir) = split(&hmac_sha512(chain_code.as_bytes(), &data));

    // child = IL + parent (mod n)
    let child = parent
        .tweak_add(&il)
        .ok_or(Error::InvalidDerivationResult { index })?;

    trace!(index, hardened = is_hardened(index), "derived private child");
    Ok((child, ChainCode(ir)))
}

/// CKDpub: derive a child public key at a non-hardened `index`.
pub fn derive_public(
    parent: &PublicKey,
    chain_code: &ChainCode,
    index: u32,
) -> Result<(PublicKey, ChainCode)> {
    if is_hardened(index) {
        return Err(Error::PrivatePublicMismatch("hardened derivation"));
    }

    let mut data = [0u8; DATA_LEN];
    data[..33].copy_from_slice(&parent.to_compressed_bytes());
    data[33..].copy_from_slice(&index.to_be_bytes());

    let (il, ir) = split(&hmac_sha512(chain_code.as_bytes(), &data));

    // child = IL·G + parent
    let child = parent
        .compressed()
        .tweak_add(&il)
        .ok_or(Error::InvalidDerivationResult { index })?;

    trace!(index, "derived public child");
    Ok((child, ChainCode(ir)))
}
