//! Key material: private scalars, public points and their text encodings.

#![forbid(unsafe_code)]

pub mod address;
pub mod private_key;
pub mod public_key;
pub mod wif;

pub use address::{encode_address, encode_p2sh, Fingerprint, Identifier};
pub use private_key::{KeyFormat, ParsedPrivateKey, PrivateKey};
pub use public_key::PublicKey;
pub use wif::DecodedWif;
