//! Error types for wallet connection and key handling.

use thiserror::Error;

/// Errors that can occur while connecting a wallet or handling key material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeystoreError {
    /// The key file is not valid JSON or is missing required fields.
    #[error("Invalid key file: {0}")]
    ParseError(String),

    /// The supplied password does not authenticate the key file.
    #[error("Incorrect key file password")]
    BadPassword,

    /// The key file decrypted but its contents are unusable.
    #[error("Failed to decrypt key file: {0}")]
    DecryptError(String),

    /// The external signer declined the connection request.
    #[error("Connection rejected by the external signer")]
    ConnectionRejected,

    /// Producing a signature failed.
    #[error("Signing failed: {0}")]
    SignFailure(String),
}
