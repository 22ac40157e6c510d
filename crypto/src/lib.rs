//! Cryptographic primitives for paystream.
//!
//! - **Ed25519** for signing and signature verification
//! - **Blake2b-256** for address derivation and the transaction signing digest
//! - Sui intent messages and the flag-prefixed serialized signature format

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{
    intent_digest, sign_message, sign_transaction, verify_signature, Intent,
    SerializedSignature, ED25519_FLAG,
};
