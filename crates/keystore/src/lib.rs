//! # KeyStore Adapter
//!
//! Normalizes the two wallet backends behind one capability surface:
//!
//! - **External signer**: a user-controlled agent that holds keys outside this
//!   process. We only ever learn the selected account address; signing and
//!   broadcasting happen on the other side of the [`ports::ExternalWallet`]
//!   port.
//! - **Local signer**: a secp256k1 key decrypted from an uploaded key file.
//!   The decrypted secret lives only inside [`LocalSigner`] and is exposed
//!   solely as a `sign(prehash)` capability.
//!
//! ## Security Notes
//!
//! - Decrypted key material is held in zeroize-on-drop wrappers and is never
//!   serialized or logged.
//! - Key files are sealed with XChaCha20-Poly1305 under an HKDF-SHA256 key
//!   derived from the password; a wrong password surfaces as an AEAD
//!   authentication failure, not a parse error.

pub mod domain;
pub mod ports;

mod errors;

pub use domain::keyfile::{parse_key_file, EncryptedKeyFile};
pub use domain::signer::{LocalSigner, RecoverableSignature};
pub use errors::KeystoreError;
