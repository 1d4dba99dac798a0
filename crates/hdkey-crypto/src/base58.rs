//! Base58 and Base58Check encoding.
//!
//! Uses the Bitcoin alphabet (excludes 0, O, I, l to avoid confusion).
//! Each leading zero byte maps to a leading '1' and back, so fixed-width
//! payloads such as 78-byte extended keys keep their length.

#![forbid(unsafe_code)]

use crate::hash::checksum;
use hdkey_core::{Error, Result};

/// Base58 alphabet (Bitcoin style).
const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Checksum length appended by Base58Check.
pub const CHECKSUM_LEN: usize = 4;

/// Encode bytes to Base58 string.
pub fn encode(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();

    // log(256)/log(58) ≈ 1.37
    let size = (data.len() * 138 / 100) + 1;
    let mut buf = vec![0u8; size];

    for &byte in data {
        let mut carry = byte as u32;
        for digit in buf.iter_mut().rev() {
            carry += (*digit as u32) * 256;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
    }

    let first_non_zero = buf.iter().position(|&b| b != 0).unwrap_or(buf.len());

    let mut result = String::with_capacity(leading_zeros + buf.len() - first_non_zero);
    for _ in 0..leading_zeros {
        result.push('1');
    }
    for &digit in &buf[first_non_zero..] {
        result.push(ALPHABET[digit as usize] as char);
    }

    result
}

/// Decode a Base58 string to bytes.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let leading_ones = text.bytes().take_while(|&b| b == b'1').count();

    // log(58)/log(256) ≈ 0.733
    let size = (text.len() * 733 / 1000) + 1;
    let mut buf = vec![0u8; size];

    for (position, character) in text.chars().enumerate() {
        let value = digit_value(character)
            .ok_or(Error::InvalidBase58Character { character, position })?;

        let mut carry = value as u32;
        for byte in buf.iter_mut().rev() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
    }

    let first_non_zero = buf.iter().position(|&b| b != 0).unwrap_or(buf.len());

    let mut result = vec![0u8; leading_ones];
    result.extend_from_slice(&buf[first_non_zero..]);
    Ok(result)
}

/// Encode `payload || sha256d(payload)[0..4]` as Base58.
pub fn encode_check(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    encode(&data)
}

/// Decode Base58Check text and verify its trailing checksum.
///
/// Returns the payload without the checksum.
pub fn decode_check(text: &str) -> Result<Vec<u8>> {
    let mut data = decode(text)?;
    if data.len() < CHECKSUM_LEN {
        return Err(Error::Base58CheckTooShort { got: data.len() });
    }

    let split = data.len() - CHECKSUM_LEN;
    let mut expected = [0u8; CHECKSUM_LEN];
    expected.copy_from_slice(&data[split..]);
    data.truncate(split);

    let computed = checksum(&data);
    if computed != expected {
        return Err(Error::ChecksumMismatch { expected, computed });
    }
    Ok(data)
}

fn digit_value(character: char) -> Option<u8> {
    if !character.is_ascii() {
        return None;
    }
    ALPHABET
        .iter()
        .position(|&a| a == character as u8)
        .map(|p| p as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_single_zero() {
        assert_eq!(encode(&[0]), "1");
        assert_eq!(decode("1").unwrap(), vec![0]);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(encode(&[0, 0, 0, 1]), "1112");
        assert_eq!(decode("1112").unwrap(), vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_hello_world() {
        assert_eq!(encode(b"Hello World!"), "2NEpo7TZRRrLZSi2U");
        assert_eq!(decode("2NEpo7TZRRrLZSi2U").unwrap(), b"Hello World!");
    }

    #[test]
    fn test_against_bs58_crate() {
        let test_cases: &[&[u8]] = &[
            b"",
            b"a",
            b"abc",
            b"Hello World!",
            &[0],
            &[0, 0, 0],
            &[0, 0, 0, 1, 2, 3],
            &[0xff; 32],
            &[0x00, 0xff, 0x00, 0xff],
            &[0x04; 82],
        ];

        for data in test_cases {
            let ours = encode(data);
            let reference = bs58::encode(data).into_string();
            assert_eq!(ours, reference, "encode mismatch for {:?}", data);

            let back = decode(&reference).unwrap();
            let reference_back = bs58::decode(&reference).into_vec().unwrap();
            assert_eq!(back, reference_back, "decode mismatch for {:?}", data);
        }
    }

    #[test]
    fn test_check_against_bs58_crate() {
        let payload = [0x80u8, 0x01, 0x02, 0x03];
        let ours = encode_check(&payload);
        let reference = bs58::encode(&payload).with_check().into_string();
        assert_eq!(ours, reference);
        assert_eq!(decode_check(&ours).unwrap(), payload);
    }

    #[test]
    fn test_check_known_vectors() {
        assert_eq!(encode_check(b""), "3QJmnh");
        assert_eq!(encode_check(&[0, 0, 1]), "11BwW2qR");
    }

    #[test]
    fn test_invalid_character() {
        // '0' is excluded from the alphabet
        let err = decode("12a0b").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidBase58Character {
                character: '0',
                position: 3
            }
        );
        assert!(matches!(
            decode("abcé"),
            Err(Error::InvalidBase58Character { character: 'é', .. })
        ));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut text = encode_check(b"payload");
        // Flip the last character to another alphabet member
        let last = text.pop().unwrap();
        text.push(if last == '2' { '3' } else { '2' });
        assert!(matches!(
            decode_check(&text),
            Err(Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_check_too_short() {
        assert_eq!(
            decode_check("11"),
            Err(Error::Base58CheckTooShort { got: 2 })
        );
    }
}
