//! # Ethmission Client Runtime
//!
//! Wires the whole client together: configuration, the JSON-RPC provider,
//! the file-backed store, and session management over one connected wallet.
//!
//! ## Architecture
//!
//! - **Adapters** (`adapters/`): `RpcProvider` (HTTP JSON-RPC) and
//!   `JsonFileStore` (atomic single-file persistence).
//! - **Config** (`config.rs`): one JSON document loaded at startup.
//! - **Session** (`session.rs`): connect through an external wallet or a
//!   decrypted key file; at most one session, replaced on reconnect.
//!
//! Everything downstream of a session (dispatcher, ledger, balances, role
//! selection) is rebuilt per connection and handed out as one
//! [`SessionServices`] value.

pub mod adapters;
pub mod config;
pub mod session;

mod errors;

pub use config::ClientConfig;
pub use errors::ClientError;
pub use session::{Client, NewWallet, SessionMode, SessionServices};
