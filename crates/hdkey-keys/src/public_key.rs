//! Public key: a secp256k1 point plus the SEC1 form it renders in.
//!
//! The compression mode only selects a rendering. [`PublicKey::compressed`]
//! and [`PublicKey::uncompressed`] return new views and never touch the
//! receiver; equality compares points.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use hdkey_core::{Error, Result};
use hdkey_crypto::secp256k1::{self, COMPRESSED_LEN, UNCOMPRESSED_LEN};
use hdkey_network::Network;

use crate::address::{encode_address, Fingerprint, Identifier};
use crate::private_key::PrivateKey;

/// secp256k1 public key.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    point: secp256k1::PublicKey,
    compressed: bool,
}

impl PublicKey {
    /// `k·G` for the given private key, rendered compressed.
    pub fn from_private_key(private_key: &PrivateKey) -> Self {
        Self {
            point: private_key.secret().public_key(),
            compressed: true,
        }
    }

    /// Parse a 33-byte compressed or 65-byte uncompressed SEC1 point.
    ///
    /// The view keeps the compression of its input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = secp256k1::point_from_sec1(bytes).ok_or(Error::KeyFormatNotFound)?;
        Ok(Self {
            point,
            compressed: bytes.len() == COMPRESSED_LEN,
        })
    }

    /// Parse hex of a compressed or uncompressed point.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text).map_err(|_| Error::KeyFormatNotFound)?;
        Self::from_bytes(&bytes)
    }

    /// Same point, rendered compressed.
    pub fn compressed(&self) -> Self {
        Self {
            point: self.point,
            compressed: true,
        }
    }

    /// Same point, rendered uncompressed.
    pub fn uncompressed(&self) -> Self {
        Self {
            point: self.point,
            compressed: false,
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// SEC1 bytes in this view's compression mode.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.to_compressed_bytes().to_vec()
        } else {
            secp256k1::point_to_uncompressed(&self.point).to_vec()
        }
    }

    /// 33-byte compressed encoding regardless of view.
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_LEN] {
        secp256k1::point_to_compressed(&self.point)
    }

    /// 65-byte uncompressed encoding regardless of view.
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_LEN] {
        secp256k1::point_to_uncompressed(&self.point)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// HASH160 of the bytes in this view's compression mode.
    pub fn to_identifier(&self) -> Identifier {
        Identifier::from_serialized_key(&self.to_bytes())
    }

    pub fn to_fingerprint(&self) -> Fingerprint {
        self.to_identifier().fingerprint()
    }

    /// Pay-to-pubkey-hash address for this view.
    pub fn to_address(&self, network: Network) -> String {
        encode_address(network.address_version(), self.to_identifier().as_bytes())
    }

    /// `tweak·G + self`, or None if the tweak is >= n or the sum is infinity.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Option<Self> {
        secp256k1::tweak_add_point(&self.point, tweak).map(|point| Self {
            point,
            compressed: self.compressed,
        })
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for PublicKey {}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_HEX: &str = "5eae5375fb5f7a0ea650566363befa2830ef441bdcb19198adf318faee86d64b";
    const COMPRESSED_HEX: &str =
        "022dfc2557a007c93092c2915f11e8aa70c4f399a6753e2e908330014091580e4b";
    const UNCOMPRESSED_HEX: &str = "042dfc2557a007c93092c2915f11e8aa70c4f399a6753e2e908330014091580e4b\
                                    11203096f1a1c5276a73f91b9465357004c2103cc42c63d6d330df589080d2e4";

    fn from_private() -> PublicKey {
        PrivateKey::from_hex(PRIVATE_HEX).unwrap().public_key()
    }

    #[test]
    fn test_from_private_key_renders() {
        let key = from_private();
        assert_eq!(key.to_hex(), COMPRESSED_HEX);
        assert_eq!(key.to_hex().len(), 66);
        assert_eq!(key.uncompressed().to_hex(), UNCOMPRESSED_HEX);
        assert_eq!(key.uncompressed().to_hex().len(), 130);
    }

    #[test]
    fn test_fingerprint() {
        assert_eq!(from_private().to_fingerprint().to_hex(), "1fddf42e");
    }

    #[test]
    fn test_addresses() {
        let key = from_private();
        let compressed = key.to_address(Network::Bitcoin);
        let uncompressed = key.uncompressed().to_address(Network::Bitcoin);
        assert_eq!(compressed, "13uVqa35BMo4mYq9LiZrXVzoz9EFZ6aoXe");
        assert_eq!(uncompressed, "133bJA2xoVqBUsiR3uSkciMo5r15fLAaZg");
        assert_eq!(compressed.len(), 34);
        assert_eq!(uncompressed.len(), 34);
    }

    #[test]
    fn test_without_private_key() {
        let key = PublicKey::from_hex(UNCOMPRESSED_HEX).unwrap();
        assert!(!key.is_compressed());
        assert_eq!(key.to_hex(), UNCOMPRESSED_HEX);
        assert_eq!(key.compressed().to_hex(), COMPRESSED_HEX);
        assert_eq!(key.compressed().to_fingerprint().to_hex(), "1fddf42e");
        assert_eq!(
            key.compressed().to_address(Network::Bitcoin),
            "13uVqa35BMo4mYq9LiZrXVzoz9EFZ6aoXe"
        );
        assert_eq!(key, from_private());
    }

    #[test]
    fn test_compression_roundtrip() {
        let original = PublicKey::from_hex(UNCOMPRESSED_HEX).unwrap();
        let roundtrip = original.compressed().uncompressed();
        assert_eq!(roundtrip.to_hex(), original.to_hex());

        let compressed = PublicKey::from_hex(COMPRESSED_HEX).unwrap();
        assert_eq!(
            compressed.uncompressed().compressed().to_address(Network::Bitcoin),
            compressed.to_address(Network::Bitcoin)
        );
    }

    #[test]
    fn test_views_do_not_mutate() {
        let key = PublicKey::from_hex(COMPRESSED_HEX).unwrap();
        let before = key.to_string();
        let _ = key.uncompressed();
        assert_eq!(key.to_string(), before);

        let key = PublicKey::from_hex(UNCOMPRESSED_HEX).unwrap();
        let before = key.to_string();
        let _ = key.compressed();
        assert_eq!(key.to_string(), before);
    }

    #[test]
    fn test_reconstruction_is_deterministic() {
        let results: std::collections::HashSet<String> = (0..100)
            .map(|_| PublicKey::from_hex(UNCOMPRESSED_HEX).unwrap().to_string())
            .collect();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_bad_key() {
        assert_eq!(
            PublicKey::from_hex("THISISNOTAVALIDKEY"),
            Err(Error::KeyFormatNotFound)
        );
        assert_eq!(
            PublicKey::from_bytes(&[0x02; 20]),
            Err(Error::KeyFormatNotFound)
        );
        // x = 5 is not on the curve
        let mut off_curve = [0u8; 33];
        off_curve[0] = 0x02;
        off_curve[32] = 0x05;
        assert_eq!(
            PublicKey::from_bytes(&off_curve),
            Err(Error::KeyFormatNotFound)
        );
    }

    #[test]
    fn test_network_address_prefixes() {
        let testnet = PublicKey::from_hex(
            "0297b033ba894611345a0e777861237ef1632370fbd58ebe644eb9f3714e8fe2bc",
        )
        .unwrap();
        assert_eq!(
            testnet.to_address(Network::BitcoinTestnet),
            "mjeetrCgrFS8DksWokVhFeQQC4ijcFUkkm"
        );

        let doge = PublicKey::from_hex(
            "02fcba7ecf41bc7e1be4ee122d9d22e3333671eb0a3a87b5cdf099d59874e1940f",
        )
        .unwrap();
        assert_eq!(
            doge.to_address(Network::Dogecoin),
            "DSztgmhTsjfS7xxDPyVNeunmBbjaJMfz92"
        );
        assert_eq!(
            doge.to_address(Network::DogecoinTestnet),
            "nr3xQnSNoi89zwXQRo8puKP4RU7sG4DoRe"
        );
    }

    #[test]
    fn test_tweak_add_keeps_view() {
        let key = PublicKey::from_hex(UNCOMPRESSED_HEX).unwrap();
        let mut tweak = [0u8; 32];
        tweak[31] = 1;
        let tweaked = key.tweak_add(&tweak).unwrap();
        assert!(!tweaked.is_compressed());
        assert_ne!(tweaked, key);
    }
}
