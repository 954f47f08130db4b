//! # Transaction Dispatcher
//!
//! Builds, signs (when the key is local) and submits contract calls, and
//! unifies the outcome contract across both signing backends.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): ABI call encoding, legacy transaction
//!   assembly and the gas policy. No I/O.
//! - **Ports Layer** (`ports/`): `Provider` (broadcast/read boundary) and
//!   `ExternalSigner` (prompt-and-broadcast boundary).
//! - **Service Layer** (`service.rs`): the [`Dispatcher`] plus the two
//!   sign-and-broadcast backends.
//!
//! Callers receive a [`Receipt`] on success and a [`DispatchError`] otherwise,
//! and never need to know which backend carried the call.

pub mod domain;
pub mod ports;

mod errors;
mod service;

pub use domain::call::ContractCall;
pub use domain::gas::{GAS_LIMIT_ENTRY, GAS_LIMIT_TRANSFER};
pub use domain::tx::{PendingTransaction, Receipt};
pub use errors::{AbiError, DispatchError, ProviderError};
pub use ports::{ExternalSigner, Provider};
pub use service::{CallOptions, Dispatcher, ExternalBackend, LocalBackend, SignAndBroadcast};
