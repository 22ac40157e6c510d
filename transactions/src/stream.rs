//! Token stream transactions: create and withdraw.

use paystream_types::{stream_duration, Mist, ObjectId, SuiAddress, Timestamp, UnitError};

use crate::contracts::Contracts;
use crate::ptb::{PtbBuilder, UnresolvedTransaction};

/// Create a stream paying `recipient` from `topup` at `amount_per_second`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateStreamTx {
    pub recipient: SuiAddress,
    pub amount_per_second: Mist,
    pub topup: Mist,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl CreateStreamTx {
    /// Derive the stream window from the rate and balance, starting at `now`.
    ///
    /// The duration is `floor(topup / amount_per_second)`; the remainder of the
    /// balance that does not fill a whole second is still deposited.
    pub fn plan(
        recipient: SuiAddress,
        amount_per_second: Mist,
        topup: Mist,
        now: Timestamp,
    ) -> Result<Self, UnitError> {
        let duration = stream_duration(amount_per_second, topup)?;
        Ok(Self {
            recipient,
            amount_per_second,
            topup,
            start: now,
            end: now.checked_add_secs(duration)?,
        })
    }

    pub fn duration_secs(&self) -> u64 {
        self.start.secs_until(self.end)
    }

    /// `create_stream_entry(coin, recipient, start, end, clock)`
    pub(crate) fn build(&self, contracts: &Contracts) -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let coin = b.split_gas(self.topup);
        let recipient = b.pure_address(self.recipient);
        let start = b.pure_u64(self.start.as_secs());
        let end = b.pure_u64(self.end.as_secs());
        let clock = b.clock();
        b.move_call(
            &contracts.create_stream(),
            contracts.coin_type_args(),
            vec![coin, recipient, start, end, clock],
        );
        b.finish()
    }
}

/// Withdraw whatever has streamed so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawStreamTx {
    pub stream_id: ObjectId,
}

impl WithdrawStreamTx {
    /// `withdraw_entry(stream, clock)`
    pub(crate) fn build(&self, contracts: &Contracts) -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let stream = b.object(self.stream_id, true);
        let clock = b.clock();
        b.move_call(
            &contracts.withdraw_stream(),
            contracts.coin_type_args(),
            vec![stream, clock],
        );
        b.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ptb::{Argument, Command, UnresolvedInput};
    use paystream_types::to_smallest_unit;

    fn recipient() -> SuiAddress {
        "0xab".parse().unwrap()
    }

    #[test]
    fn plan_matches_worked_example() {
        let rate = to_smallest_unit("0.001").unwrap();
        let topup = to_smallest_unit("1000").unwrap();
        let now = Timestamp::new(1_700_000_000);
        let tx = CreateStreamTx::plan(recipient(), rate, topup, now).unwrap();
        assert_eq!(tx.amount_per_second, Mist::new(1_000_000));
        assert_eq!(tx.topup, Mist::new(1_000_000_000_000));
        assert_eq!(tx.duration_secs(), 1_000_000);
        assert_eq!(tx.end, Timestamp::new(1_701_000_000));
    }

    #[test]
    fn plan_rejects_rate_above_balance() {
        let err = CreateStreamTx::plan(recipient(), Mist::new(10), Mist::new(5), Timestamp::new(0));
        assert!(matches!(err, Err(UnitError::RateExceedsBalance { .. })));
    }

    #[test]
    fn create_builds_split_then_call() {
        let tx = CreateStreamTx::plan(recipient(), Mist::new(1), Mist::new(100), Timestamp::new(50))
            .unwrap()
            .build(&Contracts::default());
        assert_eq!(tx.gas_spend, Mist::new(100));
        assert_eq!(tx.commands.len(), 2);
        assert!(matches!(tx.commands[0], Command::SplitCoins(Argument::GasCoin, _)));
        let call = tx.move_calls().next().unwrap();
        assert_eq!(call.function, "create_stream_entry");
        assert_eq!(call.arguments[0], Argument::NestedResult(0, 0));
        assert_eq!(call.arguments.len(), 5);
        // recipient, start, end as pure inputs
        assert_eq!(tx.inputs[1], UnresolvedInput::Pure(recipient().to_vec()));
        assert_eq!(tx.inputs[2], UnresolvedInput::Pure(50u64.to_le_bytes().to_vec()));
        assert_eq!(tx.inputs[3], UnresolvedInput::Pure(150u64.to_le_bytes().to_vec()));
    }

    #[test]
    fn withdraw_uses_stream_and_clock() {
        let id: ObjectId = "0x5eed".parse().unwrap();
        let tx = WithdrawStreamTx { stream_id: id }.build(&Contracts::default());
        assert_eq!(tx.object_ids(), vec![id]);
        assert_eq!(tx.gas_spend, Mist::ZERO);
        let call = tx.move_calls().next().unwrap();
        assert_eq!(call.function, "withdraw_entry");
        assert_eq!(call.arguments, vec![Argument::Input(0), Argument::Input(1)]);
    }
}
