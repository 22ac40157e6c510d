use paystream_crypto::CryptoError;
use paystream_transactions::TransactionError;
use paystream_types::{Mist, ObjectId, TransactionDigest, UnitError};
use thiserror::Error;

/// Failures of the signing wallet.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no account is connected")]
    NoAccount,

    #[error("signing was rejected")]
    Rejected,

    #[error("keystore error: {0}")]
    Keystore(String),

    #[error("key error: {0}")]
    Key(#[from] CryptoError),

    #[error("transaction encoding error: {0}")]
    Encoding(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to a fullnode.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("node returned HTTP {0}")]
    Http(u16),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Every way a user action can fail.
///
/// `Display` is the technical form for logs; [`ActionError::user_message`] is the
/// short text shown to the person who triggered the action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("account {account} is not the recipient of stream {stream_id}")]
    NotRecipient { stream_id: ObjectId, account: String },

    #[error("{kind} {id} not found")]
    ObjectNotFound { kind: &'static str, id: ObjectId },

    #[error("signing rejected by the wallet")]
    SigningRejected,

    #[error("wallet error: {0}")]
    Wallet(WalletError),

    #[error("insufficient SUI balance: need {needed}, have {available}")]
    InsufficientFunds { needed: Mist, available: Mist },

    #[error("network error: {0}")]
    Network(#[from] ChainError),

    #[error("transaction {digest} failed: {reason}")]
    ExecutionFailed {
        digest: TransactionDigest,
        reason: String,
    },

    #[error("transaction {digest} did not create a `{object_type}` object")]
    MissingCreatedObject {
        digest: TransactionDigest,
        object_type: &'static str,
    },

    #[error("an action is already being submitted")]
    AlreadySubmitting,

    #[error("failed to build transaction: {0}")]
    Build(#[from] TransactionError),
}

impl From<WalletError> for ActionError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::Rejected => Self::SigningRejected,
            WalletError::NoAccount => Self::WalletNotConnected,
            other => Self::Wallet(other),
        }
    }
}

impl ActionError {
    pub fn user_message(&self) -> String {
        match self {
            Self::WalletNotConnected => "Please connect your wallet first".into(),
            Self::InvalidInput(msg) => msg.clone(),
            Self::Unit(e) => unit_message(e),
            Self::NotRecipient { .. } => "You are not the recipient of this stream".into(),
            Self::ObjectNotFound { kind, .. } => format!("{kind} not found"),
            Self::SigningRejected => "Transaction was rejected in the wallet".into(),
            Self::Wallet(e) => format!("Wallet error: {e}"),
            Self::InsufficientFunds { needed, available } => format!(
                "Insufficient SUI balance: need {}, have {}",
                needed.to_sui_string(),
                available.to_sui_string()
            ),
            Self::Network(e) => format!("Network error: {e}"),
            Self::ExecutionFailed { reason, .. } => format!("Transaction failed: {reason}"),
            Self::MissingCreatedObject { digest, .. } => {
                format!("Transaction {digest} succeeded but the created object was not found")
            }
            Self::AlreadySubmitting => "A transaction is already in progress".into(),
            Self::Build(e) => format!("Could not build transaction: {e}"),
        }
    }
}

fn unit_message(e: &UnitError) -> String {
    match e {
        UnitError::InvalidAmount(_) => "Invalid number values".into(),
        UnitError::NotPositive(_) => "Amounts must be greater than 0".into(),
        UnitError::AmountTooSmall(_) => "Amounts are too small - use larger values".into(),
        UnitError::AmountOverflow(_) => "Amount is too large".into(),
        UnitError::RateExceedsBalance { .. } => {
            "Amount per second cannot be greater than total balance".into()
        }
        UnitError::DurationTooShort => "Stream duration is too short".into(),
        UnitError::TimestampOverflow => "Time is out of range".into(),
    }
}
