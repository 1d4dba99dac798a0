//! Cryptographic primitives for hdkey.
//!
//! Hashing, HMAC and curve arithmetic come from the RustCrypto crates;
//! this crate only fixes the shapes the rest of the workspace needs.
//! Base58 is implemented here because leading-zero handling must be exact.

#![forbid(unsafe_code)]

pub mod base58;
pub mod hash;
pub mod hmac;
pub mod secp256k1;
