//! Network types and their version bytes.
//!
//! Only the bitcoin and dogecoin families carry WIF and extended-key
//! versions; the rest know their address prefix and nothing else.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use hdkey_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which half of a key pair an extended key carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    Private,
    Public,
}

/// Supported networks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    #[default]
    Bitcoin,
    BitcoinTestnet,
    Dogecoin,
    DogecoinTestnet,
    Litecoin,
    LitecoinTestnet,
    Peercoin,
    PeercoinTestnet,
    Blackcoin,
    BlackcoinTestnet,
    Darkcoin,
    DarkcoinTestnet,
}

/// Version bytes and prefixes for one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkParams {
    pub address_version: u8,
    pub p2sh_version: Option<u8>,
    /// First character of script-hash addresses.
    pub p2sh_char: Option<char>,
    pub privkey_version: Option<u8>,
    pub privkey_compression_flag: Option<u8>,
    pub extended_privkey_version: Option<[u8; 4]>,
    pub extended_pubkey_version: Option<[u8; 4]>,
    /// Leading characters of compressed WIF keys. Informational only.
    pub compressed_wif_chars: &'static [char],
    /// Leading characters of uncompressed WIF keys. Informational only.
    pub uncompressed_wif_chars: &'static [char],
    pub protocol_version: Option<u32>,
}

const fn address_only(address_version: u8, protocol_version: Option<u32>) -> NetworkParams {
    NetworkParams {
        address_version,
        p2sh_version: None,
        p2sh_char: None,
        privkey_version: None,
        privkey_compression_flag: None,
        extended_privkey_version: None,
        extended_pubkey_version: None,
        compressed_wif_chars: &[],
        uncompressed_wif_chars: &[],
        protocol_version,
    }
}

const BITCOIN: NetworkParams = NetworkParams {
    address_version: 0x00,
    p2sh_version: Some(0x05),
    p2sh_char: Some('3'),
    privkey_version: Some(0x80),
    privkey_compression_flag: Some(0x01),
    extended_privkey_version: Some([0x04, 0x88, 0xad, 0xe4]),
    extended_pubkey_version: Some([0x04, 0x88, 0xb2, 0x1e]),
    compressed_wif_chars: &['K', 'L'],
    uncompressed_wif_chars: &['5'],
    protocol_version: Some(70001),
};

const BITCOIN_TESTNET: NetworkParams = NetworkParams {
    address_version: 0x6f,
    p2sh_version: Some(0xc4),
    p2sh_char: Some('2'),
    privkey_version: Some(0xef),
    privkey_compression_flag: Some(0x01),
    extended_privkey_version: Some([0x04, 0x35, 0x83, 0x94]),
    extended_pubkey_version: Some([0x04, 0x35, 0x87, 0xcf]),
    compressed_wif_chars: &['c'],
    uncompressed_wif_chars: &['9'],
    protocol_version: Some(70001),
};

const DOGECOIN: NetworkParams = NetworkParams {
    address_version: 0x1e,
    p2sh_version: Some(0x16),
    p2sh_char: Some('A'),
    privkey_version: Some(0x9e),
    privkey_compression_flag: Some(0x01),
    extended_privkey_version: Some([0x02, 0xfa, 0xc3, 0x98]),
    extended_pubkey_version: Some([0x02, 0xfa, 0xca, 0xfd]),
    compressed_wif_chars: &['Q'],
    uncompressed_wif_chars: &['6'],
    protocol_version: Some(70002),
};

const DOGECOIN_TESTNET: NetworkParams = NetworkParams {
    address_version: 0x71,
    p2sh_version: Some(0xc4),
    p2sh_char: Some('2'),
    privkey_version: Some(0xf1),
    privkey_compression_flag: Some(0x01),
    extended_privkey_version: Some([0x04, 0x32, 0xa2, 0x43]),
    extended_pubkey_version: Some([0x04, 0x32, 0xa9, 0xa8]),
    compressed_wif_chars: &['c'],
    uncompressed_wif_chars: &['9'],
    protocol_version: Some(70002),
};

const LITECOIN: NetworkParams = address_only(0x30, Some(70002));
const LITECOIN_TESTNET: NetworkParams = address_only(0x6f, Some(70002));
const PEERCOIN: NetworkParams = address_only(0x37, Some(60004));
const PEERCOIN_TESTNET: NetworkParams = address_only(0x6f, None);
const BLACKCOIN: NetworkParams = address_only(0x19, Some(60014));
const BLACKCOIN_TESTNET: NetworkParams = address_only(0x6f, None);
const DARKCOIN: NetworkParams = address_only(0x4c, Some(70018));
const DARKCOIN_TESTNET: NetworkParams = address_only(0x6f, None);

impl Network {
    /// Every network, in lookup order.
    pub const ALL: [Network; 12] = [
        Self::Bitcoin,
        Self::BitcoinTestnet,
        Self::Dogecoin,
        Self::DogecoinTestnet,
        Self::Litecoin,
        Self::LitecoinTestnet,
        Self::Peercoin,
        Self::PeercoinTestnet,
        Self::Blackcoin,
        Self::BlackcoinTestnet,
        Self::Darkcoin,
        Self::DarkcoinTestnet,
    ];

    /// Get the parameter table entry.
    pub const fn params(self) -> &'static NetworkParams {
        match self {
            Self::Bitcoin => &BITCOIN,
            Self::BitcoinTestnet => &BITCOIN_TESTNET,
            Self::Dogecoin => &DOGECOIN,
            Self::DogecoinTestnet => &DOGECOIN_TESTNET,
            Self::Litecoin => &LITECOIN,
            Self::LitecoinTestnet => &LITECOIN_TESTNET,
            Self::Peercoin => &PEERCOIN,
            Self::PeercoinTestnet => &PEERCOIN_TESTNET,
            Self::Blackcoin => &BLACKCOIN,
            Self::BlackcoinTestnet => &BLACKCOIN_TESTNET,
            Self::Darkcoin => &DARKCOIN,
            Self::DarkcoinTestnet => &DARKCOIN_TESTNET,
        }
    }

    /// Snake-case identifier, as accepted by `FromStr`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bitcoin => "bitcoin",
            Self::BitcoinTestnet => "bitcoin_testnet",
            Self::Dogecoin => "dogecoin",
            Self::DogecoinTestnet => "dogecoin_testnet",
            Self::Litecoin => "litecoin",
            Self::LitecoinTestnet => "litecoin_testnet",
            Self::Peercoin => "peercoin",
            Self::PeercoinTestnet => "peercoin_testnet",
            Self::Blackcoin => "blackcoin",
            Self::BlackcoinTestnet => "blackcoin_testnet",
            Self::Darkcoin => "darkcoin",
            Self::DarkcoinTestnet => "darkcoin_testnet",
        }
    }

    pub fn address_version(self) -> u8 {
        self.params().address_version
    }

    pub fn p2sh_version(self) -> Result<u8> {
        self.require(self.params().p2sh_version, "p2sh version")
    }

    pub fn privkey_version(self) -> Result<u8> {
        self.require(self.params().privkey_version, "private key version")
    }

    pub fn privkey_compression_flag(self) -> Result<u8> {
        self.require(
            self.params().privkey_compression_flag,
            "private key compression flag",
        )
    }

    /// 4-byte version prefix of extended keys of the given kind.
    pub fn extended_version(self, kind: KeyKind) -> Result<[u8; 4]> {
        match kind {
            KeyKind::Private => self.require(
                self.params().extended_privkey_version,
                "extended private key version",
            ),
            KeyKind::Public => self.require(
                self.params().extended_pubkey_version,
                "extended public key version",
            ),
        }
    }

    /// Find the network and key kind an extended-key version belongs to.
    pub fn from_extended_version(version: [u8; 4]) -> Option<(Network, KeyKind)> {
        Self::ALL.into_iter().find_map(|network| {
            let params = network.params();
            if params.extended_privkey_version == Some(version) {
                Some((network, KeyKind::Private))
            } else if params.extended_pubkey_version == Some(version) {
                Some((network, KeyKind::Public))
            } else {
                None
            }
        })
    }

    /// Find the network whose WIF version byte matches.
    pub fn from_privkey_version(version: u8) -> Option<Network> {
        Self::ALL
            .into_iter()
            .find(|network| network.params().privkey_version == Some(version))
    }

    fn require<T>(self, value: Option<T>, field: &'static str) -> Result<T> {
        value.ok_or(Error::UnsupportedByNetwork {
            network: self.name(),
            field,
        })
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|network| network.name() == s)
            .ok_or_else(|| Error::UnknownNetwork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitcoin_versions() {
        let net = Network::Bitcoin;
        assert_eq!(net.address_version(), 0x00);
        assert_eq!(net.p2sh_version().unwrap(), 0x05);
        assert_eq!(net.privkey_version().unwrap(), 0x80);
        assert_eq!(net.privkey_compression_flag().unwrap(), 0x01);
        assert_eq!(
            net.extended_version(KeyKind::Private).unwrap(),
            [0x04, 0x88, 0xad, 0xe4]
        );
        assert_eq!(
            net.extended_version(KeyKind::Public).unwrap(),
            [0x04, 0x88, 0xb2, 0x1e]
        );
    }

    #[test]
    fn test_default_is_bitcoin() {
        assert_eq!(Network::default(), Network::Bitcoin);
    }

    #[test]
    fn test_extended_version_lookup() {
        assert_eq!(
            Network::from_extended_version([0x04, 0x35, 0x83, 0x94]),
            Some((Network::BitcoinTestnet, KeyKind::Private))
        );
        assert_eq!(
            Network::from_extended_version([0x02, 0xfa, 0xca, 0xfd]),
            Some((Network::Dogecoin, KeyKind::Public))
        );
        assert_eq!(Network::from_extended_version([0, 0, 0, 0]), None);
    }

    #[test]
    fn test_extended_versions_are_unique() {
        for a in Network::ALL {
            for kind in [KeyKind::Private, KeyKind::Public] {
                if let Ok(version) = a.extended_version(kind) {
                    assert_eq!(Network::from_extended_version(version), Some((a, kind)));
                }
            }
        }
    }

    #[test]
    fn test_privkey_version_lookup() {
        assert_eq!(Network::from_privkey_version(0x80), Some(Network::Bitcoin));
        assert_eq!(Network::from_privkey_version(0xef), Some(Network::BitcoinTestnet));
        assert_eq!(Network::from_privkey_version(0x9e), Some(Network::Dogecoin));
        assert_eq!(Network::from_privkey_version(0xf1), Some(Network::DogecoinTestnet));
        assert_eq!(Network::from_privkey_version(0x00), None);
    }

    #[test]
    fn test_address_only_networks() {
        assert_eq!(Network::Litecoin.address_version(), 0x30);
        assert_eq!(
            Network::Litecoin.privkey_version(),
            Err(Error::UnsupportedByNetwork {
                network: "litecoin",
                field: "private key version",
            })
        );
        assert!(Network::Peercoin.extended_version(KeyKind::Public).is_err());
    }

    #[test]
    fn test_name_roundtrip() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
        assert_eq!(
            "mainnet".parse::<Network>(),
            Err(Error::UnknownNetwork("mainnet".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        for network in Network::ALL {
            let json = serde_json::to_string(&network).unwrap();
            assert_eq!(json, format!("\"{}\"", network.name()));
            let back: Network = serde_json::from_str(&json).unwrap();
            assert_eq!(back, network);
        }
    }
}
