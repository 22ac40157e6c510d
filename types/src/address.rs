//! Sui account addresses and object ids.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A 32-byte Sui address.
///
/// Accounts and objects share the same id space, so [`ObjectId`] is an alias.
/// The textual form is `0x` followed by up to 64 hex digits; short forms such as
/// `0x6` are left-padded with zeros.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SuiAddress([u8; 32]);

/// Identifier of an on-chain object.
pub type ObjectId = SuiAddress;

/// The Sui framework package (`0x2`).
pub const SUI_FRAMEWORK_ADDRESS: SuiAddress = SuiAddress::from_low_byte(0x2);

/// The shared system clock object (`0x6`).
pub const CLOCK_OBJECT_ID: ObjectId = SuiAddress::from_low_byte(0x6);

impl SuiAddress {
    pub const LENGTH: usize = 32;
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    const fn from_low_byte(b: u8) -> Self {
        let mut bytes = [0u8; 32];
        bytes[31] = b;
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Parse a `0x`-prefixed hex literal, accepting short forms.
    pub fn from_hex_literal(s: &str) -> Result<Self, TypesError> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| TypesError::InvalidAddress(format!("{s} (missing 0x prefix)")))?;
        if digits.is_empty() || digits.len() > 64 {
            return Err(TypesError::InvalidAddress(s.to_string()));
        }
        let padded = format!("{digits:0>64}");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| TypesError::InvalidAddress(format!("{s} ({e})")))?;
        Ok(Self(bytes))
    }

    /// Full-length lowercase hex with `0x` prefix.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Abbreviated form for log lines: `0x1234…abcd`.
    pub fn short(&self) -> String {
        let full = hex::encode(self.0);
        format!("0x{}…{}", &full[..4], &full[60..])
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({self})")
    }
}

impl FromStr for SuiAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s)
    }
}

impl From<[u8; 32]> for SuiAddress {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for SuiAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex_literal())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex_literal(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}
