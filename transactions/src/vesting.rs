//! Linear vesting transactions: create a vesting wallet and claim from it.

use paystream_types::{Mist, ObjectId, SuiAddress, Timestamp, UnitError};

use crate::contracts::Contracts;
use crate::ptb::{PtbBuilder, UnresolvedTransaction};

/// Lock `amount` for `beneficiary`, unlocking linearly over `period_secs` from `start`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateVestingTx {
    pub beneficiary: SuiAddress,
    pub amount: Mist,
    pub start: Timestamp,
    pub period_secs: u64,
}

impl CreateVestingTx {
    /// Vesting starts once the cliff has passed.
    pub fn plan(
        beneficiary: SuiAddress,
        amount: Mist,
        cliff_secs: u64,
        period_secs: u64,
        now: Timestamp,
    ) -> Result<Self, UnitError> {
        Ok(Self {
            beneficiary,
            amount,
            start: now.checked_add_secs(cliff_secs)?,
            period_secs,
        })
    }

    /// `entry_new(coin, clock, start, period, beneficiary)`
    pub(crate) fn build(&self, contracts: &Contracts) -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let coin = b.split_gas(self.amount);
        let clock = b.clock();
        let start = b.pure_u64(self.start.as_secs());
        let period = b.pure_u64(self.period_secs);
        let beneficiary = b.pure_address(self.beneficiary);
        b.move_call(
            &contracts.new_vesting(),
            contracts.coin_type_args(),
            vec![coin, clock, start, period, beneficiary],
        );
        b.finish()
    }
}

/// Claim the unlocked part of a vesting wallet. Only the beneficiary may claim; the
/// contract enforces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimVestingTx {
    pub wallet_id: ObjectId,
}

impl ClaimVestingTx {
    /// `entry_claim(wallet, clock)`
    pub(crate) fn build(&self, contracts: &Contracts) -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let wallet = b.object(self.wallet_id, true);
        let clock = b.clock();
        b.move_call(
            &contracts.claim_vesting(),
            contracts.coin_type_args(),
            vec![wallet, clock],
        );
        b.finish()
    }
}
