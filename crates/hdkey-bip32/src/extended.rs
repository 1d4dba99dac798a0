//! Extended key serialization.
//!
//! Layout (78 bytes):
//! version(4) || depth(1) || parent_fingerprint(4) || index(4, BE)
//!   || chain_code(32) || key(33)
//!
//! Private keys are stored as 0x00 || scalar, public keys as the compressed
//! point. The version word selects both network and key kind.

#![forbid(unsafe_code)]

use hdkey_core::{Error, Result};
use hdkey_crypto::base58;
use hdkey_keys::{Fingerprint, PrivateKey, PublicKey};
use hdkey_network::{KeyKind, Network};
use tracing::debug;

use crate::derivation::ChainCode;
use crate::node::{KeyMaterial, Node};

/// Serialized extended key length.
pub const EXTENDED_KEY_LEN: usize = 78;

const VERSION: std::ops::Range<usize> = 0..4;
const DEPTH: usize = 4;
const PARENT_FINGERPRINT: std::ops::Range<usize> = 5..9;
const INDEX: std::ops::Range<usize> = 9..13;
const CHAIN_CODE: std::ops::Range<usize> = 13..45;
const KEY: std::ops::Range<usize> = 45..78;

impl Node {
    /// 78-byte extended key of the given kind.
    ///
    /// A private serialization requires a private key.
    pub fn to_serialized_bytes(&self, kind: KeyKind) -> Result<[u8; EXTENDED_KEY_LEN]> {
        let mut out = [0u8; EXTENDED_KEY_LEN];
        out[VERSION].copy_from_slice(&self.network().extended_version(kind)?);
        out[DEPTH] = self.depth();
        out[PARENT_FINGERPRINT].copy_from_slice(self.parent_fingerprint().as_bytes());
        out[INDEX].copy_from_slice(&self.index().to_be_bytes());
        out[CHAIN_CODE].copy_from_slice(self.chain_code().as_bytes());

        match kind {
            KeyKind::Private => {
                let key = self
                    .private_key()
                    .ok_or(Error::PrivatePublicMismatch("private serialization"))?;
                out[KEY.start] = 0x00;
                out[KEY.start + 1..].copy_from_slice(&key.to_bytes());
            }
            KeyKind::Public => {
                out[KEY].copy_from_slice(&self.public_key().to_compressed_bytes());
            }
        }

        Ok(out)
    }

    pub fn to_serialized_hex(&self, kind: KeyKind) -> Result<String> {
        Ok(hex::encode(self.to_serialized_bytes(kind)?))
    }

    /// Base58Check text such as `xprv...` or `xpub...`.
    pub fn to_serialized_address(&self, kind: KeyKind) -> Result<String> {
        Ok(base58::encode_check(&self.to_serialized_bytes(kind)?))
    }

    /// Decode a 78-byte extended key.
    pub fn from_serialized_bytes(bytes: &[u8]) -> Result<Node> {
        if bytes.len() != EXTENDED_KEY_LEN {
            return Err(Error::InvalidExtendedKeyLength { got: bytes.len() });
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&bytes[VERSION]);
        let (network, kind) =
            Network::from_extended_version(version).ok_or(Error::UnrecognizedVersion(version))?;

        let depth = bytes[DEPTH];
        let mut fingerprint = [0u8; 4];
        fingerprint.copy_from_slice(&bytes[PARENT_FINGERPRINT]);
        let parent_fingerprint = Fingerprint(fingerprint);
        let mut index = [0u8; 4];
        index.copy_from_slice(&bytes[INDEX]);
        let index = u32::from_be_bytes(index);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&bytes[CHAIN_CODE]);

        if depth == 0 && (parent_fingerprint != Fingerprint::ZERO || index != 0) {
            return Err(Error::InvalidKey(
                "root key with non-zero parent fingerprint or index".into(),
            ));
        }

        let key = &bytes[KEY];
        let material = match kind {
            KeyKind::Private => {
                if key[0] != 0x00 {
                    return Err(Error::InvalidKey(format!(
                        "private key material starts with {:#04x}",
                        key[0]
                    )));
                }
                KeyMaterial::Private(PrivateKey::from_slice(&key[1..])?)
            }
            KeyKind::Public => {
                if !matches!(key[0], 0x02 | 0x03) {
                    return Err(Error::InvalidKey(format!(
                        "public key material starts with {:#04x}",
                        key[0]
                    )));
                }
                let point = PublicKey::from_bytes(key)
                    .map_err(|_| Error::InvalidKey("point is not on the curve".into()))?;
                KeyMaterial::Public(point)
            }
        };

        debug!(%network, ?kind, depth, index, "decoded extended key");
        Ok(Node::from_parts(
            network,
            depth,
            index,
            parent_fingerprint,
            ChainCode(chain_code),
            material,
        ))
    }

    /// Decode the hex form of an extended key.
    pub fn from_serialized_hex(text: &str) -> Result<Node> {
        let bytes = hex::decode(text).map_err(|e| Error::InvalidHexFormat(e.to_string()))?;
        Self::from_serialized_bytes(&bytes)
    }

    /// Decode Base58Check extended key text.
    pub fn from_serialized_address(text: &str) -> Result<Node> {
        Self::from_serialized_bytes(&base58::decode_check(text)?)
    }
}
