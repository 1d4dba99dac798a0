//! BIP32 hierarchical deterministic key trees.
//!
//! - `derivation`: master key from seed, CKDpriv and CKDpub
//! - `node`: immutable tree nodes
//! - `path`: `m/0'/1/2h.pub` style path parsing and resolution
//! - `extended`: 78-byte extended key codec (xprv/xpub and friends)

#![forbid(unsafe_code)]

pub mod derivation;
pub mod extended;
pub mod node;
pub mod path;

pub use derivation::{ChainCode, HARDENED};
pub use extended::EXTENDED_KEY_LEN;
pub use hdkey_core::{Error, Result};
pub use hdkey_keys::{Fingerprint, Identifier, KeyFormat, PrivateKey, PublicKey};
pub use hdkey_network::{KeyKind, Network};
pub use node::Node;
pub use path::{DerivationPath, PathRoot, PathStep};
