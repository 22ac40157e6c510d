use paystream_types::UnitError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("amount must be positive: {field}")]
    ZeroAmount { field: &'static str },

    #[error("invalid time window: {reason}")]
    InvalidTimeWindow { reason: String },

    #[error("invalid argument reference in command {command}: {reason}")]
    InvalidArgument { command: usize, reason: String },

    #[error("transaction has no commands")]
    Empty,

    #[error("too many inputs ({0})")]
    TooManyInputs(usize),

    #[error("invalid type tag {input:?}: {reason}")]
    InvalidTypeTag { input: String, reason: String },

    #[error("input {index} is unresolved")]
    UnresolvedInput { index: usize },

    #[error("expected {expected} resolved inputs, got {actual}")]
    InputCountMismatch { expected: usize, actual: usize },

    #[error("unsupported coin type {0}: payments are split from the SUI gas coin")]
    UnsupportedCoinType(String),

    #[error("no gas payment coins")]
    NoGasPayment,

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("BCS encoding failed: {0}")]
    Encoding(String),
}
