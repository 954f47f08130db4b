//! # Ledger Ports
//!
//! The ledger's only outward dependency during entry: reading the attendee's
//! ticket balance and burning one ticket to the venue manager.

use async_trait::async_trait;
use ethmission_dispatch::{DispatchError, Receipt};
use ethmission_types::{Address, U256};

/// Balance-and-burn boundary backed by the token contract.
#[async_trait]
pub trait TicketAccess: Send + Sync {
    /// Fresh ticket balance of `owner`, in wei-denominated ticket units.
    async fn ticket_balance(&self, owner: Address) -> Result<U256, DispatchError>;

    /// Burn one whole ticket from the active session to `venue_manager`.
    async fn burn_for_entry(&self, venue_manager: Address) -> Result<Receipt, DispatchError>;
}
