//! Wallet Import Format.
//!
//! WIF = Base58Check(version || scalar(32) || [compression flag])
//! The flag byte is present only for keys whose public key is used compressed.

#![forbid(unsafe_code)]

use hdkey_core::{Error, Result};
use hdkey_crypto::base58;
use hdkey_network::Network;

const UNCOMPRESSED_PAYLOAD_LEN: usize = 1 + 32;
const COMPRESSED_PAYLOAD_LEN: usize = 1 + 32 + 1;

/// A decoded WIF string.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedWif {
    pub secret: [u8; 32],
    /// Network whose version byte prefixed the payload.
    pub network: Network,
    /// Whether the compression flag byte was present.
    pub compressed: bool,
}

impl std::fmt::Debug for DecodedWif {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedWif")
            .field("secret", &"[REDACTED]")
            .field("network", &self.network)
            .field("compressed", &self.compressed)
            .finish()
    }
}

/// Encode a 32-byte scalar as WIF for the given network.
pub fn encode(secret: &[u8; 32], network: Network, compressed: bool) -> Result<String> {
    let mut payload = Vec::with_capacity(COMPRESSED_PAYLOAD_LEN);
    payload.push(network.privkey_version()?);
    payload.extend_from_slice(secret);
    if compressed {
        payload.push(network.privkey_compression_flag()?);
    }
    Ok(base58::encode_check(&payload))
}

/// Decode WIF text.
///
/// The network is identified by the version byte and compression by the
/// payload length. Any failure is reported as `InvalidWifFormat`.
pub fn decode(text: &str) -> Result<DecodedWif> {
    let payload = base58::decode_check(text).map_err(|e| match e {
        Error::ChecksumMismatch { .. } => Error::InvalidWifFormat("checksum mismatch".into()),
        other => Error::InvalidWifFormat(other.to_string()),
    })?;

    let compressed = match payload.len() {
        UNCOMPRESSED_PAYLOAD_LEN => false,
        COMPRESSED_PAYLOAD_LEN => true,
        got => {
            return Err(Error::InvalidWifFormat(format!(
                "payload is {got} bytes, expected {UNCOMPRESSED_PAYLOAD_LEN} or {COMPRESSED_PAYLOAD_LEN}"
            )))
        }
    };

    let network = Network::from_privkey_version(payload[0]).ok_or_else(|| {
        Error::InvalidWifFormat(format!("unknown version byte {:#04x}", payload[0]))
    })?;

    if compressed {
        let flag = payload[COMPRESSED_PAYLOAD_LEN - 1];
        if Some(flag) != network.params().privkey_compression_flag {
            return Err(Error::InvalidWifFormat(format!(
                "unexpected compression flag {flag:#04x}"
            )));
        }
    }

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&payload[1..33]);

    Ok(DecodedWif {
        secret,
        network,
        compressed,
    })
}
