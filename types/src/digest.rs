//! 32-byte digests for objects and transactions (base58 in text form).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A 32-byte digest.
///
/// Text form is base58. In BCS the digest is a length-prefixed byte vector.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest([u8; 32]);

/// Digest of an object version.
pub type ObjectDigest = Digest;

/// Digest of an executed transaction.
pub type TransactionDigest = Digest;

impl Digest {
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn base58_encode(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    pub fn base58_decode(s: &str) -> Result<Self, TypesError> {
        let raw = bs58::decode(s)
            .into_vec()
            .map_err(|e| TypesError::InvalidDigest(format!("{s} ({e})")))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|v: Vec<u8>| TypesError::InvalidDigest(format!("{s} ({} bytes)", v.len())))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base58_encode())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl FromStr for Digest {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::base58_decode(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.base58_encode())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::base58_decode(&s).map_err(serde::de::Error::custom)
        } else {
            let raw = Vec::<u8>::deserialize(deserializer)?;
            let bytes: [u8; 32] = raw
                .try_into()
                .map_err(|v: Vec<u8>| serde::de::Error::invalid_length(v.len(), &"32 bytes"))?;
            Ok(Self(bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base58_text_form() {
        let d = Digest::new([7u8; 32]);
        let parsed: Digest = d.to_string().parse().unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn wrong_length_rejected() {
        let short = bs58::encode([1u8; 16]).into_string();
        assert!(Digest::base58_decode(&short).is_err());
        assert!(Digest::base58_decode("0OIl").is_err());
    }

    #[test]
    fn bcs_is_length_prefixed() {
        let bytes = bcs::to_bytes(&Digest::new([9u8; 32])).unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], 32);
        let back: Digest = bcs::from_bytes(&bytes).unwrap();
        assert_eq!(back, Digest::new([9u8; 32]));
    }
}
