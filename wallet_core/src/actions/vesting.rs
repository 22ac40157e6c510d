use paystream_transactions::vesting::{ClaimVestingTx, CreateVestingTx};
use paystream_transactions::Operation;
use paystream_types::{ensure_positive, parse_seconds, to_smallest_unit, Clock, ObjectId};
use serde::{Deserialize, Serialize};

use super::{parse_hex_id, require_filled, PaystreamClient};
use crate::chain::{ChainClient, TransactionResult};
use crate::error::ActionError;
use crate::signer::WalletSigner;

/// Form input for a vesting schedule.
///
/// `release_rate` is validated but not sent: the contract releases linearly
/// over `period_seconds`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingRequest {
    pub beneficiary_address: String,
    pub amount: String,
    pub cliff_seconds: String,
    pub release_rate: String,
    pub period_seconds: String,
}

#[derive(Clone, Debug)]
pub struct VestingCreated {
    pub result: TransactionResult,
    pub vesting_id: Option<ObjectId>,
    pub plan: CreateVestingTx,
}

impl<C: ChainClient, W: WalletSigner, K: Clock> PaystreamClient<C, W, K> {
    /// Lock `amount` for the beneficiary, vesting from `now + cliff` over the period.
    pub async fn create_vesting(&self, request: &VestingRequest) -> Result<VestingCreated, ActionError> {
        self.account()?;
        require_filled(
            &[
                &request.beneficiary_address,
                &request.amount,
                &request.cliff_seconds,
                &request.release_rate,
                &request.period_seconds,
            ],
            "Please fill all fields",
        )?;
        let beneficiary =
            parse_hex_id(&request.beneficiary_address, "Invalid beneficiary address format")?;
        let amount = to_smallest_unit(&request.amount)?;
        let cliff_secs = parse_seconds(&request.cliff_seconds, true)?;
        ensure_positive(&request.release_rate)?;
        let period_secs = parse_seconds(&request.period_seconds, false)?;

        let plan = CreateVestingTx::plan(beneficiary, amount, cliff_secs, period_secs, self.clock.now())?;
        tracing::debug!(
            beneficiary = %beneficiary,
            amount = amount.raw(),
            start = plan.start.as_secs(),
            period = period_secs,
            "creating vesting wallet"
        );

        let operation = Operation::CreateVesting(plan.clone());
        let result = self.execute(&operation).await?;
        let vesting_id = self.created_id(&operation, &result);
        Ok(VestingCreated {
            result,
            vesting_id,
            plan,
        })
    }

    /// Claim whatever has vested so far.
    pub async fn claim_vesting(&self, vesting_id: &str) -> Result<TransactionResult, ActionError> {
        self.account()?;
        require_filled(&[vesting_id], "Please provide a vesting ID")?;
        let wallet_id = parse_hex_id(vesting_id, "Invalid vesting ID format")?;
        self.execute(&Operation::ClaimVesting(ClaimVestingTx { wallet_id }))
            .await
    }
}
