//! User actions against the streaming, vesting and payroll contracts.
//!
//! Each action checks that a wallet is connected, validates its raw input,
//! converts amounts and times, then goes through [`crate::submit::submit`].
//! Created object ids are extracted best-effort: a missing id is logged and
//! returned as `None`.

mod payroll;
mod stream;
mod vesting;

pub use payroll::{EmployeeOutcome, ItemOutcome, PayrollCreated, PayrollRunReport};
pub use stream::{StreamCreated, StreamRequest};
pub use vesting::{VestingCreated, VestingRequest};

use paystream_transactions::payroll::{DEFAULT_BOOTSTRAP_FUNDING, DEFAULT_PAYROLL_DURATION};
use paystream_transactions::{Contracts, Operation};
use paystream_types::{Clock, Mist, ObjectId, SuiAddress, SystemClock};

use crate::chain::{ChainClient, TransactionResult};
use crate::config::{ClientConfig, DEFAULT_GAS_BUDGET};
use crate::error::{ActionError, ConfigError};
use crate::signer::WalletSigner;
use crate::submit::submit;

/// Contract locations and transaction parameters shared by every action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    pub contracts: Contracts,
    pub gas_budget: u64,
    pub payroll_funding: Mist,
    pub payroll_duration: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            contracts: Contracts::default(),
            gas_budget: DEFAULT_GAS_BUDGET,
            payroll_funding: DEFAULT_BOOTSTRAP_FUNDING,
            payroll_duration: DEFAULT_PAYROLL_DURATION,
        }
    }
}

impl ClientSettings {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            contracts: config.contracts()?,
            gas_budget: config.gas_budget,
            payroll_funding: config.bootstrap_funding(),
            payroll_duration: config.payroll.duration,
        })
    }
}

/// Entry point for every action: a chain, a wallet and a clock.
pub struct PaystreamClient<C, W, K = SystemClock> {
    chain: C,
    wallet: W,
    clock: K,
    settings: ClientSettings,
}

impl<C, W> PaystreamClient<C, W, SystemClock> {
    pub fn new(chain: C, wallet: W, settings: ClientSettings) -> Self {
        Self {
            chain,
            wallet,
            clock: SystemClock,
            settings,
        }
    }
}

impl<C, W, K> PaystreamClient<C, W, K> {
    /// Replace the time source used for stream and vesting schedules.
    pub fn with_clock<K2>(self, clock: K2) -> PaystreamClient<C, W, K2> {
        PaystreamClient {
            chain: self.chain,
            wallet: self.wallet,
            clock,
            settings: self.settings,
        }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

impl<C: ChainClient, W: WalletSigner, K: Clock> PaystreamClient<C, W, K> {
    /// The connected account, or `WalletNotConnected`.
    pub fn account(&self) -> Result<SuiAddress, ActionError> {
        self.wallet
            .current_account()
            .ok_or(ActionError::WalletNotConnected)
    }

    async fn execute(&self, operation: &Operation) -> Result<TransactionResult, ActionError> {
        submit(
            &self.chain,
            &self.wallet,
            &self.settings.contracts,
            operation,
            self.settings.gas_budget,
        )
        .await
    }

    /// Id of the object `operation` created, logging when it cannot be found.
    fn created_id(&self, operation: &Operation, result: &TransactionResult) -> Option<ObjectId> {
        let object_type = operation.created_object_type()?;
        let id = result.created_object_id(object_type);
        match id {
            Some(id) => tracing::info!(object_type, object = %id, "created object"),
            None => tracing::warn!(
                object_type,
                digest = %result.digest,
                "could not find created object in transaction effects"
            ),
        }
        id
    }
}

/// Reject empty required fields.
pub(crate) fn require_filled(fields: &[&str], message: &str) -> Result<(), ActionError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ActionError::InvalidInput(message.to_string()));
    }
    Ok(())
}

/// Parse a `0x`-prefixed address or object id; anything else is `message`.
pub(crate) fn parse_hex_id(input: &str, message: &str) -> Result<SuiAddress, ActionError> {
    let input = input.trim();
    if !input.starts_with("0x") {
        return Err(ActionError::InvalidInput(message.to_string()));
    }
    input
        .parse()
        .map_err(|_| ActionError::InvalidInput(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_ids_need_prefix() {
        assert!(matches!(
            parse_hex_id("abc", "bad"),
            Err(ActionError::InvalidInput(m)) if m == "bad"
        ));
        assert!(parse_hex_id("0xzz", "bad").is_err());
        assert_eq!(
            parse_hex_id(" 0x6 ", "bad").unwrap(),
            paystream_types::CLOCK_OBJECT_ID
        );
    }

    #[test]
    fn blank_fields_rejected() {
        assert!(require_filled(&["a", " "], "fill").is_err());
        assert!(require_filled(&["a", "b"], "fill").is_ok());
    }

    #[test]
    fn settings_from_default_config() {
        let settings = ClientSettings::from_config(&ClientConfig::default()).unwrap();
        assert_eq!(settings, ClientSettings::default());
    }
}
