//! # Event Ledger
//!
//! Events with a hard attendance cap, entered by burning one ticket to the
//! venue manager. Creation registers the event's doorman and venue roles
//! before the event itself is persisted.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the event record and the attendance book.
//! - **Ports Layer** (`ports.rs`): `TicketAccess`, the balance-and-burn
//!   boundary the ledger drives during entry.
//! - **Service Layer** (`service.rs`): the [`EventLedger`].
//!
//! Entry is serialized per ledger, so concurrent attempts against a nearly
//! full event observe each other's admissions. The burn itself lands on the
//! remote chain; a crash between burn and record loses the record but never
//! the ticket semantics (the contract already moved the balance).

pub mod domain;
pub mod ports;

mod errors;
mod service;

pub use domain::attendance::AttendanceBook;
pub use domain::event::{Event, EventDraft};
pub use errors::EventError;
pub use ports::TicketAccess;
pub use service::EventLedger;
