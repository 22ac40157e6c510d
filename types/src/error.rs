//! Error types shared across crates.

use thiserror::Error;

/// Errors from parsing identifiers and names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

/// Errors from converting user-entered amounts and durations into on-chain integers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("amount must be greater than 0: {0:?}")]
    NotPositive(String),

    #[error("amount {0:?} is too small, use a larger value")]
    AmountTooSmall(String),

    #[error("amount {0:?} does not fit in 64 bits")]
    AmountOverflow(String),

    #[error("amount per second ({rate}) cannot be greater than total balance ({balance})")]
    RateExceedsBalance { rate: u64, balance: u64 },

    #[error("duration is too short")]
    DurationTooShort,

    #[error("timestamp overflow")]
    TimestampOverflow,
}
