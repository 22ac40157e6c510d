//! File-backed wallet using the Sui CLI keystore format.
//!
//! The keystore is a JSON array of base64 strings. Each entry decodes to a
//! one-byte scheme flag followed by the 32-byte secret key. Only Ed25519
//! (flag `0x00`) entries can sign; other schemes are skipped on load.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use paystream_crypto::{
    derive_address, keypair_from_private, sign_transaction, CryptoError, ED25519_FLAG,
};
use paystream_transactions::TransactionData;
use paystream_types::{KeyPair, PrivateKey, SuiAddress};
use std::path::Path;

use crate::error::WalletError;
use crate::signer::{SignedTransaction, WalletSigner};

/// Decode one keystore entry.
pub fn decode_key(entry: &str) -> Result<KeyPair, CryptoError> {
    let raw = BASE64
        .decode(entry.trim())
        .map_err(|e| CryptoError::Base64(e.to_string()))?;
    if raw.len() != 33 {
        return Err(CryptoError::InvalidKeyLength {
            expected: 33,
            actual: raw.len(),
        });
    }
    if raw[0] != ED25519_FLAG {
        return Err(CryptoError::UnsupportedScheme(raw[0]));
    }
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&raw[1..]);
    Ok(keypair_from_private(PrivateKey(secret)))
}

/// Encode a key pair as a keystore entry.
pub fn encode_key(keypair: &KeyPair) -> String {
    let mut raw = Vec::with_capacity(33);
    raw.push(ED25519_FLAG);
    raw.extend_from_slice(&keypair.private.0);
    BASE64.encode(raw)
}

/// Load every Ed25519 key from a keystore file.
pub fn load_keystore(path: &Path) -> Result<Vec<KeyPair>, WalletError> {
    let json = std::fs::read_to_string(path)?;
    let entries: Vec<String> = serde_json::from_str(&json)
        .map_err(|e| WalletError::Keystore(format!("{}: {e}", path.display())))?;

    let mut keys = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match decode_key(entry) {
            Ok(kp) => keys.push(kp),
            Err(CryptoError::UnsupportedScheme(flag)) => {
                tracing::debug!(index, flag, "skipping non-ed25519 keystore entry");
            }
            Err(e) => return Err(WalletError::Keystore(format!("entry {index}: {e}"))),
        }
    }
    Ok(keys)
}

/// Write keys to a keystore file, replacing its contents.
pub fn save_keystore(path: &Path, keys: &[KeyPair]) -> Result<(), WalletError> {
    let entries: Vec<String> = keys.iter().map(encode_key).collect();
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| WalletError::Keystore(format!("serialization failed: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// A wallet holding local keys with one active account.
pub struct KeystoreWallet {
    keys: Vec<KeyPair>,
    active: Option<usize>,
}

impl KeystoreWallet {
    /// A wallet with a single key, active.
    pub fn from_keypair(keypair: KeyPair) -> Self {
        Self {
            keys: vec![keypair],
            active: Some(0),
        }
    }

    /// Load a keystore. The active account is `active` if given, else the first key.
    pub fn open(path: &Path, active: Option<SuiAddress>) -> Result<Self, WalletError> {
        let keys = load_keystore(path)?;
        let mut wallet = Self { keys, active: None };
        match active {
            Some(address) => wallet.switch_account(address)?,
            None if !wallet.keys.is_empty() => wallet.active = Some(0),
            None => tracing::warn!(path = %path.display(), "keystore holds no usable keys"),
        }
        Ok(wallet)
    }

    pub fn addresses(&self) -> Vec<SuiAddress> {
        self.keys.iter().map(|kp| derive_address(&kp.public)).collect()
    }

    /// Make `address` the active account.
    pub fn switch_account(&mut self, address: SuiAddress) -> Result<(), WalletError> {
        let index = self
            .keys
            .iter()
            .position(|kp| derive_address(&kp.public) == address)
            .ok_or_else(|| WalletError::Keystore(format!("no key for address {address}")))?;
        self.active = Some(index);
        Ok(())
    }

    fn active_key(&self) -> Option<&KeyPair> {
        self.active.and_then(|i| self.keys.get(i))
    }
}

impl WalletSigner for KeystoreWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.active_key().map(|kp| derive_address(&kp.public))
    }

    async fn sign_transaction(&self, data: &TransactionData) -> Result<SignedTransaction, WalletError> {
        let keypair = self.active_key().ok_or(WalletError::NoAccount)?;
        let tx_bytes = data
            .to_bcs_bytes()
            .map_err(|e| WalletError::Encoding(e.to_string()))?;
        let signature = sign_transaction(&tx_bytes, keypair);
        Ok(SignedTransaction {
            tx_bytes,
            signatures: vec![signature.to_base64()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paystream_crypto::keypair_from_seed;

    #[test]
    fn entry_roundtrip() {
        let kp = keypair_from_seed(&[4u8; 32]);
        let decoded = decode_key(&encode_key(&kp)).unwrap();
        assert_eq!(decoded.public, kp.public);
    }

    #[test]
    fn rejects_other_schemes_and_lengths() {
        let mut raw = vec![0x01u8];
        raw.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            decode_key(&BASE64.encode(&raw)).err(),
            Some(CryptoError::UnsupportedScheme(0x01))
        );
        assert_eq!(
            decode_key(&BASE64.encode([0u8; 10])).err(),
            Some(CryptoError::InvalidKeyLength {
                expected: 33,
                actual: 10
            })
        );
    }

    #[test]
    fn open_picks_requested_account() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sui.keystore");
        let a = keypair_from_seed(&[1u8; 32]);
        let b = keypair_from_seed(&[2u8; 32]);
        let b_addr = derive_address(&b.public);
        save_keystore(&path, &[a, b]).unwrap();

        let wallet = KeystoreWallet::open(&path, None).unwrap();
        assert_eq!(wallet.addresses().len(), 2);
        assert_eq!(wallet.current_account(), wallet.addresses().first().copied());

        let wallet = KeystoreWallet::open(&path, Some(b_addr)).unwrap();
        assert_eq!(wallet.current_account(), Some(b_addr));

        let unknown: SuiAddress = "0x99".parse().unwrap();
        assert!(KeystoreWallet::open(&path, Some(unknown)).is_err());
    }

    #[test]
    fn unsupported_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sui.keystore");
        let mut secp = vec![0x01u8];
        secp.extend_from_slice(&[9u8; 32]);
        let good = encode_key(&keypair_from_seed(&[3u8; 32]));
        std::fs::write(
            &path,
            serde_json::to_string(&vec![BASE64.encode(&secp), good]).unwrap(),
        )
        .unwrap();
        assert_eq!(load_keystore(&path).unwrap().len(), 1);
    }

    #[test]
    fn empty_keystore_has_no_account() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sui.keystore");
        std::fs::write(&path, "[]").unwrap();
        let wallet = KeystoreWallet::open(&path, None).unwrap();
        assert_eq!(wallet.current_account(), None);
    }
}
