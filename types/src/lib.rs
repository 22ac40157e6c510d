//! Fundamental types for paystream.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses and object ids, digests, MIST amounts and the unit converter, timestamps,
//! networks and key material.

pub mod address;
pub mod amount;
pub mod digest;
pub mod error;
pub mod keys;
pub mod network;
pub mod time;

pub use address::{ObjectId, SuiAddress, CLOCK_OBJECT_ID, SUI_FRAMEWORK_ADDRESS};
pub use amount::{
    ensure_positive, parse_amount, parse_seconds, stream_duration, to_smallest_unit, Mist, MIST_PER_SUI,
    SUI_DECIMALS,
};
pub use digest::{Digest, ObjectDigest, TransactionDigest};
pub use error::{TypesError, UnitError};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::Network;
pub use time::{Clock, SystemClock, Timestamp};
