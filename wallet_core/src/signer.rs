//! The signing capability of a connected wallet.

use paystream_transactions::TransactionData;
use paystream_types::SuiAddress;

use crate::error::WalletError;

/// BCS transaction bytes together with the signatures to submit them with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_bytes: Vec<u8>,
    /// Base64 flag-prefixed signatures.
    pub signatures: Vec<String>,
}

/// A wallet that holds the active account and can sign for it.
#[allow(async_fn_in_trait)]
pub trait WalletSigner {
    /// The connected account, if any.
    fn current_account(&self) -> Option<SuiAddress>;

    /// Sign `data`. Returns [`WalletError::Rejected`] when the user declines.
    async fn sign_transaction(&self, data: &TransactionData) -> Result<SignedTransaction, WalletError>;

    /// Pass the raw effects of an executed transaction back to the wallet so it
    /// can update its view of owned objects.
    async fn report_effects(&self, _raw_effects: &[u8]) -> Result<(), WalletError> {
        Ok(())
    }
}
