//! Ed25519 signing of Sui intent messages.
//!
//! A transaction is signed over `Blake2b-256(intent ‖ bcs(TransactionData))`.
//! The wire signature is `flag ‖ signature ‖ public key`, base64 encoded.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use paystream_types::{KeyPair, PrivateKey, PublicKey, Signature};

use crate::error::CryptoError;
use crate::hash::blake2b_256_multi;

/// Signature scheme flag for Ed25519.
pub const ED25519_FLAG: u8 = 0x00;

/// Intent prefix prepended to a message before hashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intent {
    pub scope: u8,
    pub version: u8,
    pub app_id: u8,
}

impl Intent {
    /// Transaction data, version 0, Sui application.
    pub const fn sui_transaction() -> Self {
        Self {
            scope: 0,
            version: 0,
            app_id: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        [self.scope, self.version, self.app_id]
    }
}

/// The 32-byte digest that gets signed for `message` under `intent`.
pub fn intent_digest(intent: Intent, message: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[&intent.to_bytes(), message])
}

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &dalek_sig).is_ok()
}

/// A flag-prefixed signature as accepted by `sui_executeTransactionBlock`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializedSignature {
    pub signature: Signature,
    pub public_key: PublicKey,
}

impl SerializedSignature {
    pub const LENGTH: usize = 1 + 64 + 32;

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LENGTH);
        out.push(ED25519_FLAG);
        out.extend_from_slice(&self.signature.0);
        out.extend_from_slice(&self.public_key.0);
        out
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    pub fn from_base64(s: &str) -> Result<Self, CryptoError> {
        let raw = BASE64
            .decode(s)
            .map_err(|e| CryptoError::Base64(e.to_string()))?;
        if raw.len() != Self::LENGTH {
            return Err(CryptoError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                Self::LENGTH,
                raw.len()
            )));
        }
        if raw[0] != ED25519_FLAG {
            return Err(CryptoError::UnsupportedScheme(raw[0]));
        }
        let mut sig = [0u8; 64];
        sig.copy_from_slice(&raw[1..65]);
        let mut pk = [0u8; 32];
        pk.copy_from_slice(&raw[65..]);
        Ok(Self {
            signature: Signature(sig),
            public_key: PublicKey(pk),
        })
    }

    /// Check this signature against BCS transaction bytes.
    pub fn verify_transaction(&self, tx_bytes: &[u8]) -> bool {
        let digest = intent_digest(Intent::sui_transaction(), tx_bytes);
        verify_signature(&digest, &self.signature, &self.public_key)
    }
}

/// Sign BCS-encoded transaction data under the transaction intent.
pub fn sign_transaction(tx_bytes: &[u8], keypair: &KeyPair) -> SerializedSignature {
    let digest = intent_digest(Intent::sui_transaction(), tx_bytes);
    SerializedSignature {
        signature: sign_message(&digest, &keypair.private),
        public_key: keypair.public.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn sign_and_verify() {
        let kp = keypair_from_seed(&[11u8; 32]);
        let sig = sign_message(b"payload", &kp.private);
        assert!(verify_signature(b"payload", &sig, &kp.public));
        assert!(!verify_signature(b"other", &sig, &kp.public));
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair_from_seed(&[99u8; 32]);
        let sig1 = sign_message(b"deterministic", &kp.private);
        let sig2 = sign_message(b"deterministic", &kp.private);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn transaction_signature_layout() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let sig = sign_transaction(b"tx-bytes", &kp);
        let bytes = sig.to_bytes();
        assert_eq!(bytes.len(), SerializedSignature::LENGTH);
        assert_eq!(bytes[0], ED25519_FLAG);
        assert_eq!(&bytes[65..], &kp.public.0);
    }

    #[test]
    fn transaction_signature_covers_intent() {
        let kp = keypair_from_seed(&[1u8; 32]);
        let sig = sign_transaction(b"tx-bytes", &kp);
        assert!(sig.verify_transaction(b"tx-bytes"));
        assert!(!sig.verify_transaction(b"tx-bytez"));
        // Signing the raw bytes without the intent prefix must not verify.
        let raw = sign_message(b"tx-bytes", &kp.private);
        assert_ne!(raw, sig.signature);
    }

    #[test]
    fn base64_roundtrip_and_rejections() {
        let kp = keypair_from_seed(&[2u8; 32]);
        let sig = sign_transaction(b"abc", &kp);
        let parsed = SerializedSignature::from_base64(&sig.to_base64()).unwrap();
        assert_eq!(parsed, sig);

        let mut wrong_flag = sig.to_bytes();
        wrong_flag[0] = 0x01;
        assert_eq!(
            SerializedSignature::from_base64(&BASE64.encode(&wrong_flag)),
            Err(CryptoError::UnsupportedScheme(0x01))
        );
        assert!(SerializedSignature::from_base64("AAAA").is_err());
    }
}
