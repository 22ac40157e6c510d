use paystream_transactions::stream::{CreateStreamTx, WithdrawStreamTx};
use paystream_transactions::Operation;
use paystream_types::{to_smallest_unit, Clock, ObjectId, SuiAddress};
use serde::{Deserialize, Serialize};

use super::{parse_hex_id, require_filled, PaystreamClient};
use crate::chain::{ChainClient, ObjectOptions, TransactionResult};
use crate::error::ActionError;
use crate::signer::WalletSigner;

/// Form input for a new stream. Amounts are decimal SUI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRequest {
    pub recipient_address: String,
    pub amount_per_second: String,
    pub topup_balance: String,
}

#[derive(Clone, Debug)]
pub struct StreamCreated {
    pub result: TransactionResult,
    pub stream_id: Option<ObjectId>,
    pub plan: CreateStreamTx,
}

impl<C: ChainClient, W: WalletSigner, K: Clock> PaystreamClient<C, W, K> {
    /// Open a stream that runs for `floor(topup / rate)` seconds from now.
    pub async fn create_stream(&self, request: &StreamRequest) -> Result<StreamCreated, ActionError> {
        self.account()?;
        require_filled(
            &[
                &request.recipient_address,
                &request.amount_per_second,
                &request.topup_balance,
            ],
            "Please fill all fields",
        )?;
        let recipient = parse_hex_id(&request.recipient_address, "Invalid recipient address format")?;
        let rate = to_smallest_unit(&request.amount_per_second)?;
        let topup = to_smallest_unit(&request.topup_balance)?;
        let plan = CreateStreamTx::plan(recipient, rate, topup, self.clock.now())?;
        tracing::debug!(
            recipient = %recipient,
            rate = rate.raw(),
            topup = topup.raw(),
            start = plan.start.as_secs(),
            end = plan.end.as_secs(),
            "creating stream"
        );

        let operation = Operation::CreateStream(plan.clone());
        let result = self.execute(&operation).await?;
        let stream_id = self.created_id(&operation, &result);
        Ok(StreamCreated {
            result,
            stream_id,
            plan,
        })
    }

    /// Withdraw what has streamed so far. Only the stream's recipient may withdraw;
    /// this is checked before anything is signed.
    pub async fn withdraw_from_stream(&self, stream_id: &str) -> Result<TransactionResult, ActionError> {
        let account = self.account()?;
        require_filled(&[stream_id], "Stream ID is required")?;
        let stream_id = parse_hex_id(stream_id, "Invalid stream ID format")?;

        self.ensure_recipient(stream_id, account).await?;
        self.execute(&Operation::WithdrawStream(WithdrawStreamTx { stream_id }))
            .await
    }

    /// An existing object whose recipient cannot be read counts as someone else's stream.
    async fn ensure_recipient(&self, stream_id: ObjectId, account: SuiAddress) -> Result<(), ActionError> {
        let object = self
            .chain
            .get_object(stream_id, ObjectOptions::content())
            .await?
            .ok_or(ActionError::ObjectNotFound {
                kind: "Stream",
                id: stream_id,
            })?;
        let recipient = object
            .field_str("recipient")
            .and_then(|r| r.parse::<SuiAddress>().ok());
        if recipient != Some(account) {
            tracing::debug!(stream = %stream_id, ?recipient, "withdrawal refused: not the recipient");
            return Err(ActionError::NotRecipient {
                stream_id,
                account: account.to_string(),
            });
        }
        Ok(())
    }
}
