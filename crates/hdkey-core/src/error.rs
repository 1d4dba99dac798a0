use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("input matches none of the recognized key formats (hex, base64, WIF)")]
    KeyFormatNotFound,

    #[error("invalid WIF: {0}")]
    InvalidWifFormat(String),

    #[error("invalid base64 key: {0}")]
    InvalidBase64Format(String),

    #[error("invalid hex: {0}")]
    InvalidHexFormat(String),

    #[error("invalid base58 character {character:?} at position {position}")]
    InvalidBase58Character { character: char, position: usize },

    #[error("base58check payload of {got} bytes is shorter than its checksum")]
    Base58CheckTooShort { got: usize },

    #[error("checksum mismatch: expected {expected:02x?}, computed {computed:02x?}")]
    ChecksumMismatch { expected: [u8; 4], computed: [u8; 4] },

    #[error("{0} requires a private key but the node is public-only")]
    PrivatePublicMismatch(&'static str),

    #[error("unrecognized extended key version {0:02x?}")]
    UnrecognizedVersion([u8; 4]),

    #[error("invalid extended key length {got}: expected 78 bytes")]
    InvalidExtendedKeyLength { got: usize },

    #[error("derivation at child number {index:#010x} produced an invalid key")]
    InvalidDerivationResult { index: u32 },

    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid seed length {got}: expected 16 to 64 bytes")]
    InvalidSeedLength { got: usize },

    #[error("depth exceeds 255")]
    DepthOverflow,

    #[error("network {network} has no {field}")]
    UnsupportedByNetwork {
        network: &'static str,
        field: &'static str,
    },

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}
