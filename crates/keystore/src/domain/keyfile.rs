//! # Encrypted Key Files
//!
//! JSON key-file format for locally held wallets:
//!
//! ```json
//! {
//!   "version": 1,
//!   "address": "0x…",
//!   "crypto": {
//!     "kdf": "hkdf-sha256",
//!     "salt": "…hex…",
//!     "nonce": "…hex…",
//!     "ciphertext": "…hex…"
//!   }
//! }
//! ```
//!
//! The ciphertext is the 32-byte secret scalar sealed per [`super::cipher`].
//! The address field is advisory for display before unlock; after unlock it is
//! checked against the address derived from the decrypted key.

use ethmission_types::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use super::cipher;
use super::signer::LocalSigner;
use crate::errors::KeystoreError;

/// Current key-file format version.
const KEY_FILE_VERSION: u32 = 1;

/// KDF identifier written into key files.
const KDF_NAME: &str = "hkdf-sha256";

/// A parsed but still-encrypted key file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedKeyFile {
    /// Format version.
    pub version: u32,
    /// Account address, shown to the user before unlock.
    pub address: Address,
    /// Encrypted payload.
    pub crypto: CryptoSection,
}

/// The encrypted payload of a key file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoSection {
    /// Key-derivation function identifier.
    pub kdf: String,
    /// KDF salt, hex.
    pub salt: String,
    /// AEAD nonce, hex.
    pub nonce: String,
    /// Sealed secret, hex.
    pub ciphertext: String,
}

/// Parse raw uploaded bytes into a key file.
pub fn parse_key_file(bytes: &[u8]) -> Result<EncryptedKeyFile, KeystoreError> {
    let file: EncryptedKeyFile = serde_json::from_slice(bytes)
        .map_err(|e| KeystoreError::ParseError(e.to_string()))?;

    if file.version != KEY_FILE_VERSION {
        return Err(KeystoreError::ParseError(format!(
            "unsupported key file version {}",
            file.version
        )));
    }
    if file.crypto.kdf != KDF_NAME {
        return Err(KeystoreError::ParseError(format!(
            "unsupported kdf '{}'",
            file.crypto.kdf
        )));
    }

    debug!(address = %file.address, "parsed key file");
    Ok(file)
}

impl EncryptedKeyFile {
    /// Decrypt with the supplied password and produce a signing capability.
    ///
    /// A wrong password fails AEAD authentication and surfaces as
    /// [`KeystoreError::BadPassword`]; structurally broken contents surface as
    /// [`KeystoreError::DecryptError`].
    pub fn unlock(&self, password: &str) -> Result<LocalSigner, KeystoreError> {
        let salt = decode_hex_field(&self.crypto.salt, "salt")?;
        let nonce = decode_hex_field(&self.crypto.nonce, "nonce")?;
        let ciphertext = decode_hex_field(&self.crypto.ciphertext, "ciphertext")?;

        let secret = Zeroizing::new(cipher::unseal(password, &salt, &nonce, &ciphertext)?);
        let signer = LocalSigner::from_secret(&secret)?;

        if signer.address() != self.address {
            return Err(KeystoreError::DecryptError(
                "decrypted key does not match the key file address".to_string(),
            ));
        }

        debug!(address = %signer.address(), "key file unlocked");
        Ok(signer)
    }

    /// Seal a signer into key-file JSON bytes under the given password.
    pub fn export(signer: &LocalSigner, password: &str) -> Result<Vec<u8>, KeystoreError> {
        let secret = signer.export_secret();
        let (salt, nonce, ciphertext) = cipher::seal(password, secret.as_slice())?;

        let file = EncryptedKeyFile {
            version: KEY_FILE_VERSION,
            address: signer.address(),
            crypto: CryptoSection {
                kdf: KDF_NAME.to_string(),
                salt: hex::encode(salt),
                nonce: hex::encode(nonce),
                ciphertext: hex::encode(ciphertext),
            },
        };

        serde_json::to_vec_pretty(&file).map_err(|e| KeystoreError::ParseError(e.to_string()))
    }

    /// Suggested file name for an exported wallet, keyed by address prefix.
    pub fn suggested_file_name(&self) -> String {
        let hex = self.address.to_hex();
        format!("ethmission-wallet-{}.json", &hex[2..8])
    }
}

fn decode_hex_field(value: &str, field: &str) -> Result<Vec<u8>, KeystoreError> {
    hex::decode(value)
        .map_err(|_| KeystoreError::DecryptError(format!("invalid hex in '{field}' field")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_parse_unlock_roundtrip() {
        let signer = LocalSigner::generate();
        let address = signer.address();

        let bytes = EncryptedKeyFile::export(&signer, "correct horse").unwrap();
        let file = parse_key_file(&bytes).unwrap();
        assert_eq!(file.address, address);

        let restored = file.unlock("correct horse").unwrap();
        assert_eq!(restored.address(), address);
    }

    #[test]
    fn test_wrong_password_is_bad_password() {
        let signer = LocalSigner::generate();
        let bytes = EncryptedKeyFile::export(&signer, "right").unwrap();
        let file = parse_key_file(&bytes).unwrap();

        assert!(matches!(
            file.unlock("wrong"),
            Err(KeystoreError::BadPassword)
        ));
    }

    #[test]
    fn test_garbage_bytes_are_parse_error() {
        assert!(matches!(
            parse_key_file(b"not json at all"),
            Err(KeystoreError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let signer = LocalSigner::generate();
        let bytes = EncryptedKeyFile::export(&signer, "pw").unwrap();
        let mut value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["version"] = serde_json::json!(99);

        let bytes = serde_json::to_vec(&value).unwrap();
        assert!(matches!(
            parse_key_file(&bytes),
            Err(KeystoreError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_kdf_rejected() {
        let signer = LocalSigner::generate();
        let bytes = EncryptedKeyFile::export(&signer, "pw").unwrap();
        let mut value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["crypto"]["kdf"] = serde_json::json!("scrypt");

        let bytes = serde_json::to_vec(&value).unwrap();
        assert!(matches!(
            parse_key_file(&bytes),
            Err(KeystoreError::ParseError(_))
        ));
    }

    #[test]
    fn test_mismatched_address_rejected() {
        let signer = LocalSigner::generate();
        let other = LocalSigner::generate();

        let bytes = EncryptedKeyFile::export(&signer, "pw").unwrap();
        let mut file = parse_key_file(&bytes).unwrap();
        file.address = other.address();

        assert!(matches!(
            file.unlock("pw"),
            Err(KeystoreError::DecryptError(_))
        ));
    }

    #[test]
    fn test_suggested_file_name_uses_address_prefix() {
        let signer = LocalSigner::generate();
        let bytes = EncryptedKeyFile::export(&signer, "pw").unwrap();
        let file = parse_key_file(&bytes).unwrap();

        let name = file.suggested_file_name();
        assert!(name.starts_with("ethmission-wallet-"));
        assert!(name.ends_with(".json"));
    }
}
