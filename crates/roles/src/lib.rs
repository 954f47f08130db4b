//! # Role Registry
//!
//! Named role assignments over wallet addresses, the escalation checks that
//! gate privileged roles, and the role-selection state machine the client
//! drives.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): role kinds, assignments and the
//!   constant-time escalation secrets. No I/O.
//! - **Service Layer** (`service.rs`): the persistent [`RoleRegistry`] and the
//!   per-session [`RoleSelection`].
//!
//! Assignments are insert-only with uniqueness on both name and address, and
//! survive restarts through the shared key-value store.

pub mod domain;

mod errors;
mod service;

pub use domain::assignment::{RoleAssignment, RoleKind};
pub use domain::escalation::EscalationSecrets;
pub use errors::RoleError;
pub use service::{RoleRegistry, RoleSelection};
