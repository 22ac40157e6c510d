//! Nullable wallet: deterministic keys, scriptable approval.

use paystream_crypto::{derive_address, keypair_from_seed, sign_transaction};
use paystream_transactions::TransactionData;
use paystream_types::{KeyPair, SuiAddress};
use paystream_wallet_core::{SignedTransaction, WalletError, WalletSigner};
use std::cell::{Cell, RefCell};

/// A wallet backed by a key derived from a fixed seed.
///
/// Signatures are real Ed25519 signatures, so the chain side can verify them.
pub struct NullWallet {
    keypair: Option<KeyPair>,
    reject: Cell<bool>,
    fail_reporting: Cell<bool>,
    signed: RefCell<Vec<TransactionData>>,
    reported: RefCell<Vec<Vec<u8>>>,
}

impl NullWallet {
    /// A connected wallet whose key is derived from `seed`.
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            keypair: Some(keypair_from_seed(&seed)),
            ..Self::disconnected()
        }
    }

    /// A wallet with no connected account.
    pub fn disconnected() -> Self {
        Self {
            keypair: None,
            reject: Cell::new(false),
            fail_reporting: Cell::new(false),
            signed: RefCell::new(Vec::new()),
            reported: RefCell::new(Vec::new()),
        }
    }

    /// Decline every signing request from now on.
    pub fn reject_signing(&self, reject: bool) {
        self.reject.set(reject);
    }

    /// Fail `report_effects` from now on.
    pub fn fail_reporting(&self, fail: bool) {
        self.fail_reporting.set(fail);
    }

    pub fn address(&self) -> Option<SuiAddress> {
        self.keypair.as_ref().map(|kp| derive_address(&kp.public))
    }

    /// Transactions signed so far (for assertions).
    pub fn signed(&self) -> Vec<TransactionData> {
        self.signed.borrow().clone()
    }

    /// Raw effects handed back after execution.
    pub fn reported(&self) -> Vec<Vec<u8>> {
        self.reported.borrow().clone()
    }
}

impl WalletSigner for NullWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.address()
    }

    async fn sign_transaction(&self, data: &TransactionData) -> Result<SignedTransaction, WalletError> {
        let keypair = self.keypair.as_ref().ok_or(WalletError::NoAccount)?;
        if self.reject.get() {
            return Err(WalletError::Rejected);
        }
        let tx_bytes = data
            .to_bcs_bytes()
            .map_err(|e| WalletError::Encoding(e.to_string()))?;
        let signature = sign_transaction(&tx_bytes, keypair);
        self.signed.borrow_mut().push(data.clone());
        Ok(SignedTransaction {
            tx_bytes,
            signatures: vec![signature.to_base64()],
        })
    }

    async fn report_effects(&self, raw_effects: &[u8]) -> Result<(), WalletError> {
        if self.fail_reporting.get() {
            return Err(WalletError::Keystore("effects rejected".into()));
        }
        self.reported.borrow_mut().push(raw_effects.to_vec());
        Ok(())
    }
}
