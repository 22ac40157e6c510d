//! Sui address derivation from public keys.
//!
//! Address = Blake2b-256(scheme flag ‖ public key). Ed25519 uses flag `0x00`.

use paystream_types::{PublicKey, SuiAddress};

use crate::hash::blake2b_256_multi;
use crate::sign::ED25519_FLAG;

/// Derive the Sui address of an Ed25519 public key.
pub fn derive_address(public_key: &PublicKey) -> SuiAddress {
    SuiAddress::new(blake2b_256_multi(&[&[ED25519_FLAG], &public_key.0]))
}
