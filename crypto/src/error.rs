use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("unsupported signature scheme flag: {0:#04x}")]
    UnsupportedScheme(u8),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid base64: {0}")]
    Base64(String),

    #[error("invalid serialized signature: {0}")]
    InvalidSignature(String),
}
