//! Wallet-side core for paystream.
//!
//! - [`WalletSigner`]: the connected wallet, with [`KeystoreWallet`] reading the Sui CLI keystore
//! - [`ChainClient`]: fullnode access, with [`SuiRpcClient`] over JSON-RPC
//! - [`submit`]: resolve inputs and gas, sign, execute, check effects
//! - [`PaystreamClient`]: the stream, vesting and payroll actions
//! - [`ActionSlot`]: idle / submitting / succeeded / failed tracking for front ends

pub mod actions;
pub mod chain;
pub mod config;
pub mod distribution;
pub mod error;
pub mod extract;
pub mod keystore;
pub mod node_client;
pub mod preview;
pub mod resolve;
pub mod signer;
pub mod state;
pub mod submit;

pub use actions::{
    ClientSettings, EmployeeOutcome, ItemOutcome, PayrollCreated, PayrollRunReport,
    PaystreamClient, StreamCreated, StreamRequest, VestingCreated, VestingRequest,
};
pub use chain::{
    ChainClient, Coin, CoinPage, ExecuteOptions, ExecutionStatus, ObjectChange, ObjectContent,
    ObjectData, ObjectOptions, Owner, TransactionEffects, TransactionResult,
};
pub use config::ClientConfig;
pub use distribution::{DistributionList, DistributionMode, PayrollDistribution};
pub use error::{ActionError, ChainError, ConfigError, WalletError};
pub use extract::extract_object_id;
pub use keystore::KeystoreWallet;
pub use node_client::SuiRpcClient;
pub use preview::{StreamPreview, VestingPreview};
pub use signer::{SignedTransaction, WalletSigner};
pub use state::{ActionSlot, ActionState};
pub use submit::submit;
