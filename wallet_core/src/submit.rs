//! Resolve, sign, execute: the shared path every action takes to the chain.

use paystream_transactions::{Contracts, Operation};

use crate::chain::{ChainClient, ExecuteOptions, TransactionResult};
use crate::error::ActionError;
use crate::resolve::resolve_transaction;
use crate::signer::WalletSigner;

/// Build, resolve, sign and execute `operation` for the wallet's active account.
///
/// A transaction that executes but fails on chain is returned as
/// [`ActionError::ExecutionFailed`]. Failing to hand effects back to the wallet is
/// logged and otherwise ignored.
pub async fn submit<C: ChainClient, W: WalletSigner>(
    chain: &C,
    wallet: &W,
    contracts: &Contracts,
    operation: &Operation,
    gas_budget: u64,
) -> Result<TransactionResult, ActionError> {
    let sender = wallet
        .current_account()
        .ok_or(ActionError::WalletNotConnected)?;
    let tx = operation.build(contracts)?;
    let data = resolve_transaction(chain, tx, sender, gas_budget).await?;
    let signed = wallet.sign_transaction(&data).await?;

    let result = chain
        .execute_transaction_block(&signed.tx_bytes, &signed.signatures, ExecuteOptions::default())
        .await?;
    tracing::info!(
        operation = operation.name(),
        digest = %result.digest,
        "transaction executed"
    );

    if !result.raw_effects.is_empty() {
        if let Err(e) = wallet.report_effects(&result.raw_effects).await {
            tracing::warn!(digest = %result.digest, error = %e, "failed to report effects to wallet");
        }
    }

    if let Some(reason) = result.failure_reason() {
        tracing::warn!(operation = operation.name(), digest = %result.digest, %reason, "transaction failed");
        return Err(ActionError::ExecutionFailed {
            digest: result.digest,
            reason,
        });
    }
    Ok(result)
}
