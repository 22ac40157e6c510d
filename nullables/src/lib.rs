//! Nullable infrastructure for deterministic testing.
//!
//! Everything the client touches outside the process (clock, fullnode, wallet)
//! sits behind a trait. This crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record what was asked of them for later assertions
//!
//! Usage: swap real implementations for nullables in tests.

pub mod chain;
pub mod clock;
pub mod wallet;

pub use chain::{ExecutedTransaction, NullChain};
pub use clock::NullClock;
pub use wallet::NullWallet;
