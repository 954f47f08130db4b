//! # Password Sealing
//!
//! Seals a private key under a password: HKDF-SHA256 stretches the password
//! and salt into a 256-bit key, XChaCha20-Poly1305 provides authenticated
//! encryption with a 24-byte random nonce.
//!
//! The AEAD tag doubles as the password check: a wrong password derives a
//! wrong key, and decryption fails authentication without revealing anything
//! about the plaintext.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::KeystoreError;

/// Domain separator mixed into key derivation.
const KDF_CONTEXT: &[u8] = b"ethmission-keyfile-v1";

/// Salt length in bytes.
pub const SALT_LEN: usize = 32;

/// XChaCha20 nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// Derive a 256-bit sealing key from a password and salt.
fn derive_key(password: &str, salt: &[u8]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(Some(salt), password.as_bytes());
    let mut key = [0u8; 32];
    hk.expand(KDF_CONTEXT, &mut key)
        .expect("32 bytes is a valid HKDF-SHA256 output length");
    key
}

/// Seal plaintext under a password. Returns (salt, nonce, ciphertext).
pub fn seal(
    password: &str,
    plaintext: &[u8],
) -> Result<([u8; SALT_LEN], [u8; NONCE_LEN], Vec<u8>), KeystoreError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);

    let mut key = derive_key(password, &salt);
    let cipher = XChaCha20Poly1305::new((&key).into());
    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|e| KeystoreError::DecryptError(e.to_string()));
    key.zeroize();

    Ok((salt, nonce, ciphertext?))
}

/// Open a sealed payload. Authentication failure means a wrong password.
pub fn unseal(
    password: &str,
    salt: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, KeystoreError> {
    if nonce.len() != NONCE_LEN {
        return Err(KeystoreError::DecryptError(format!(
            "nonce must be {} bytes, got {}",
            NONCE_LEN,
            nonce.len()
        )));
    }

    let mut key = derive_key(password, salt);
    let cipher = XChaCha20Poly1305::new((&key).into());
    let plaintext = cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| KeystoreError::BadPassword);
    key.zeroize();

    plaintext
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_unseal_roundtrip() {
        let (salt, nonce, ciphertext) = seal("hunter2", b"secret key bytes").unwrap();
        let plaintext = unseal("hunter2", &salt, &nonce, &ciphertext).unwrap();
        assert_eq!(plaintext, b"secret key bytes");
    }

    #[test]
    fn test_wrong_password_fails_as_bad_password() {
        let (salt, nonce, ciphertext) = seal("correct", b"payload").unwrap();
        let result = unseal("incorrect", &salt, &nonce, &ciphertext);
        assert_eq!(result, Err(KeystoreError::BadPassword));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let (salt, nonce, mut ciphertext) = seal("pw", b"payload").unwrap();
        ciphertext[0] ^= 0xFF;
        assert!(unseal("pw", &salt, &nonce, &ciphertext).is_err());
    }

    #[test]
    fn test_salts_and_nonces_are_unique() {
        let (salt1, nonce1, _) = seal("pw", b"x").unwrap();
        let (salt2, nonce2, _) = seal("pw", b"x").unwrap();
        assert_ne!(salt1, salt2);
        assert_ne!(nonce1, nonce2);
    }
}
