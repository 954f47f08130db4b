//! # Local Signer
//!
//! Holds a decrypted secp256k1 key and exposes it only as a signing
//! capability. The secret never leaves this module except through
//! [`LocalSigner::export_secret`], which exists solely so the key-file
//! writer can re-seal it.

use ethmission_types::{Address, Hash};
use k256::ecdsa::SigningKey;
use zeroize::Zeroizing;

use crate::errors::KeystoreError;

/// A recoverable ECDSA signature: `r || s` plus the recovery parity bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// R component (32 bytes).
    pub r: [u8; 32],
    /// S component (32 bytes), always in the lower half of the curve order.
    pub s: [u8; 32],
    /// Recovery parity (0 or 1).
    pub v: u8,
}

/// An in-memory signing key decrypted from a key file.
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl LocalSigner {
    /// Construct from a raw 32-byte secret scalar.
    pub fn from_secret(secret: &[u8]) -> Result<Self, KeystoreError> {
        let key = SigningKey::from_slice(secret)
            .map_err(|_| KeystoreError::DecryptError("not a valid secp256k1 key".to_string()))?;
        let address = derive_address(&key);
        Ok(Self { key, address })
    }

    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = derive_address(&key);
        Self { key, address }
    }

    /// The account address controlled by this key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte prehash, producing a low-S recoverable signature.
    pub fn sign(&self, prehash: &Hash) -> Result<RecoverableSignature, KeystoreError> {
        let (mut sig, mut recid) = self
            .key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| KeystoreError::SignFailure(e.to_string()))?;

        // Normalize to low S; flipping S flips the recovery parity.
        if let Some(normalized) = sig.normalize_s() {
            sig = normalized;
            recid = k256::ecdsa::RecoveryId::try_from(recid.to_byte() ^ 1)
                .map_err(|e| KeystoreError::SignFailure(e.to_string()))?;
        }

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            v: recid.to_byte(),
        })
    }

    /// The raw secret, zeroized on drop. Only for re-sealing into a key file.
    pub(crate) fn export_secret(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.key.to_bytes().into())
    }
}

// Deliberately redacted: the signing key must never reach logs.
impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Ethereum address derivation: keccak256 of the uncompressed public key.
fn derive_address(key: &SigningKey) -> Address {
    let pubkey = key.verifying_key().to_encoded_point(false);
    Address::from_uncompressed_pubkey(pubkey.as_bytes())
}
