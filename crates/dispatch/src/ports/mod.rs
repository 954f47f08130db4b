//! # Dispatch Ports
//!
//! Outbound boundaries for transaction submission and chain reads.

mod outbound;

pub use outbound::{ExternalSigner, Provider};
