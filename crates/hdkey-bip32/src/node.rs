//! HD tree node.
//!
//! A node is immutable: every derivation returns a new value. When a private
//! key is present the public key is always its image, so the two are never
//! stored independently of each other.

#![forbid(unsafe_code)]

use std::fmt;

use hdkey_core::{Error, Result};
use hdkey_keys::{Fingerprint, Identifier, PrivateKey, PublicKey};
use hdkey_network::{KeyKind, Network};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::derivation::{self, is_hardened, ChainCode};

/// Length of the seed drawn by [`Node::generate`].
pub const GENERATED_SEED_LEN: usize = 32;

/// One node of the HD tree.
#[derive(Clone, PartialEq, Eq)]
pub struct Node {
    network: Network,
    depth: u8,
    index: u32,
    parent_fingerprint: Fingerprint,
    chain_code: ChainCode,
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
}

impl Node {
    /// Master node from a 16 to 64 byte seed.
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Self> {
        let (key, chain_code) = derivation::master_key(seed)?;
        debug!(%network, seed_len = seed.len(), "created master node");
        Ok(Self::from_private_key(key, chain_code, network))
    }

    /// Master node from a random 32-byte seed.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R, network: Network) -> Result<Self> {
        let mut seed = [0u8; GENERATED_SEED_LEN];
        rng.fill_bytes(&mut seed);
        Self::from_seed(&seed, network)
    }

    /// Root node holding an existing private key.
    pub fn from_private_key(key: PrivateKey, chain_code: ChainCode, network: Network) -> Self {
        Self {
            network,
            depth: 0,
            index: 0,
            parent_fingerprint: Fingerprint::ZERO,
            chain_code,
            public_key: key.public_key(),
            private_key: Some(key),
        }
    }

    /// Public-only root node.
    pub fn from_public_key(key: PublicKey, chain_code: ChainCode, network: Network) -> Self {
        Self {
            network,
            depth: 0,
            index: 0,
            parent_fingerprint: Fingerprint::ZERO,
            chain_code,
            private_key: None,
            public_key: key.compressed(),
        }
    }

    /// Assemble a node from decoded extended-key fields.
    pub(crate) fn from_parts(
        network: Network,
        depth: u8,
        index: u32,
        parent_fingerprint: Fingerprint,
        chain_code: ChainCode,
        key: KeyMaterial,
    ) -> Self {
        let (private_key, public_key) = match key {
            KeyMaterial::Private(key) => {
                let public_key = key.public_key();
                (Some(key), public_key)
            }
            KeyMaterial::Public(key) => (None, key.compressed()),
        };
        Self {
            network,
            depth,
            index,
            parent_fingerprint,
            chain_code,
            private_key,
            public_key,
        }
    }

    /// Derive the child at the 32-bit child number `index`.
    ///
    /// Private nodes use CKDpriv; public-only nodes use CKDpub and fail with
    /// `PrivatePublicMismatch` on hardened indices.
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        let depth = self.depth.checked_add(1).ok_or(Error::DepthOverflow)?;

        let (material, chain_code) = match &self.private_key {
            Some(private_key) => {
                let (child, chain_code) =
                    derivation::derive_private(private_key, &self.chain_code, index)?;
                (KeyMaterial::Private(child), chain_code)
            }
            None => {
                let (child, chain_code) =
                    derivation::derive_public(&self.public_key, &self.chain_code, index)?;
                (KeyMaterial::Public(child), chain_code)
            }
        };

        Ok(Self::from_parts(
            self.network,
            depth,
            index,
            self.to_fingerprint(),
            chain_code,
            material,
        ))
    }

    /// Same node without the private key.
    pub fn to_public(&self) -> Self {
        Self {
            private_key: None,
            ..self.clone()
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// 32-bit child number, hardened bit included.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn is_hardened(&self) -> bool {
        is_hardened(self.index)
    }

    /// True if the node holds a private key.
    pub fn is_private(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    pub fn chain_code_hex(&self) -> String {
        self.chain_code.to_hex()
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    /// Compressed public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// HASH160 of the compressed public key.
    pub fn to_identifier(&self) -> Identifier {
        self.public_key.to_identifier()
    }

    pub fn to_fingerprint(&self) -> Fingerprint {
        self.public_key.to_fingerprint()
    }

    /// Pay-to-pubkey-hash address on the node's network.
    pub fn to_address(&self) -> String {
        self.public_key.to_address(self.network)
    }
}

/// Key half of a node under construction.
pub(crate) enum KeyMaterial {
    Private(PrivateKey),
    Public(PublicKey),
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("network", &self.network)
            .field("depth", &self.depth)
            .field("index", &self.index)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("chain_code", &self.chain_code)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("public_key", &self.public_key.to_hex())
            .finish()
    }
}

/// Renders the public extended key, or the public key hex on networks
/// without extended-key versions.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_serialized_address(KeyKind::Public) {
            Ok(address) => f.write_str(&address),
            Err(_) => f.write_str(&self.public_key.to_hex()),
        }
    }
}
