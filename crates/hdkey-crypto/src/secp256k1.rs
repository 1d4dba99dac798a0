//! secp256k1 scalar and point helpers over k256.
//!
//! Scalars travel as 32-byte big-endian arrays, points as SEC1 encodings:
//! - compressed: [0x02 | 0x03][x] (33 bytes, prefix carries y parity)
//! - uncompressed: [0x04][x][y] (65 bytes)

#![forbid(unsafe_code)]

use k256::elliptic_curve::ff::PrimeField;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, NonZeroScalar, ProjectivePoint, Scalar};

pub use k256::{PublicKey, SecretKey};

/// Compressed SEC1 point length.
pub const COMPRESSED_LEN: usize = 33;

/// Uncompressed SEC1 point length.
pub const UNCOMPRESSED_LEN: usize = 65;

/// Parse a big-endian scalar. Returns None if the value is >= n.
pub fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*bytes)))
}

/// Parse a secret key. Returns None if the value is zero or >= n.
pub fn secret_from_bytes(bytes: &[u8; 32]) -> Option<SecretKey> {
    SecretKey::from_bytes(&FieldBytes::from(*bytes)).ok()
}

/// Big-endian bytes of a secret key, always 32 long.
pub fn secret_to_bytes(secret: &SecretKey) -> [u8; 32] {
    secret.to_bytes().into()
}

/// Compute `(tweak + secret) mod n`.
///
/// Returns None if the tweak is >= n or the sum is zero.
pub fn tweak_add_secret(secret: &SecretKey, tweak: &[u8; 32]) -> Option<SecretKey> {
    let tweak = scalar_from_bytes(tweak)?;
    let sum = tweak + *secret.to_nonzero_scalar();
    let sum = Option::<NonZeroScalar>::from(NonZeroScalar::new(sum))?;
    Some(SecretKey::from(sum))
}

/// Compute `tweak·G + point`.
///
/// Returns None if the tweak is >= n or the sum is the point at infinity.
pub fn tweak_add_point(point: &PublicKey, tweak: &[u8; 32]) -> Option<PublicKey> {
    let tweak = scalar_from_bytes(tweak)?;
    let sum = ProjectivePoint::GENERATOR * tweak + point.to_projective();
    PublicKey::from_affine(sum.to_affine()).ok()
}

/// Parse a 33-byte compressed or 65-byte uncompressed SEC1 point.
pub fn point_from_sec1(bytes: &[u8]) -> Option<PublicKey> {
    match bytes.len() {
        COMPRESSED_LEN | UNCOMPRESSED_LEN => PublicKey::from_sec1_bytes(bytes).ok(),
        _ => None,
    }
}

/// Compressed SEC1 encoding.
pub fn point_to_compressed(point: &PublicKey) -> [u8; COMPRESSED_LEN] {
    let encoded = point.to_encoded_point(true);
    let mut bytes = [0u8; COMPRESSED_LEN];
    bytes.copy_from_slice(encoded.as_bytes());
    bytes
}

/// Uncompressed SEC1 encoding.
pub fn point_to_uncompressed(point: &PublicKey) -> [u8; UNCOMPRESSED_LEN] {
    let encoded = point.to_encoded_point(false);
    let mut bytes = [0u8; UNCOMPRESSED_LEN];
    bytes.copy_from_slice(encoded.as_bytes());
    bytes
}
