//! # Balance Service
//!
//! Chain reads through the `Provider` port, commerce through the dispatcher,
//! and the [`TicketGate`] adapter the event ledger burns tickets through.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use ethmission_dispatch::domain::abi;
use ethmission_dispatch::{
    CallOptions, ContractCall, DispatchError, Dispatcher, Provider, Receipt,
};
use ethmission_events::{EventLedger, TicketAccess};
use ethmission_roles::RoleRegistry;
use ethmission_types::{Address, ONE_TICKET_WEI, U256};

use crate::domain::{Balances, HolderBalance, VenueStatsRow};
use crate::errors::BalanceError;

// ============================================================
// Ticket gate
// ============================================================

/// Balance-and-burn adapter the event ledger drives during entry.
pub struct TicketGate {
    provider: Arc<dyn Provider>,
    dispatcher: Arc<Dispatcher>,
}

impl TicketGate {
    pub fn new(provider: Arc<dyn Provider>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { provider, dispatcher }
    }
}

#[async_trait]
impl TicketAccess for TicketGate {
    async fn ticket_balance(&self, owner: Address) -> Result<U256, DispatchError> {
        read_ticket_balance(self.provider.as_ref(), self.dispatcher.contract(), owner)
            .await
            .map_err(|e| DispatchError::BroadcastFailure(e.to_string()))
    }

    async fn burn_for_entry(&self, venue_manager: Address) -> Result<Receipt, DispatchError> {
        let call = ContractCall::entry_burn(venue_manager, U256::from(ONE_TICKET_WEI));
        self.dispatcher.dispatch(&call, CallOptions::plain()).await
    }
}

// ============================================================
// Balance service
// ============================================================

/// Read facade plus commerce over one connected session.
pub struct BalanceService {
    provider: Arc<dyn Provider>,
    dispatcher: Arc<Dispatcher>,
    registry: Arc<RoleRegistry>,
    ledger: Arc<EventLedger>,
    ticket_price_wei: U256,
}

impl BalanceService {
    pub fn new(
        provider: Arc<dyn Provider>,
        dispatcher: Arc<Dispatcher>,
        registry: Arc<RoleRegistry>,
        ledger: Arc<EventLedger>,
        ticket_price_wei: U256,
    ) -> Self {
        Self { provider, dispatcher, registry, ledger, ticket_price_wei }
    }

    /// Ticket balance of `address`, read fresh from the contract.
    pub async fn ticket_balance(&self, address: Address) -> Result<U256, BalanceError> {
        read_ticket_balance(self.provider.as_ref(), self.dispatcher.contract(), address).await
    }

    /// Ticket and native balances of `address`.
    ///
    /// Two independent reads; the pair is not a snapshot.
    pub async fn balances(&self, address: Address) -> Result<Balances, BalanceError> {
        let ticket = self.ticket_balance(address).await?;
        let native = self.provider.get_balance(address).await?;
        Ok(Balances { ticket, native })
    }

    /// Every holder the contract enumerates, with their balances.
    pub async fn holders(&self) -> Result<Vec<HolderBalance>, BalanceError> {
        let call = ContractCall::ticket_holders();
        let data = self
            .provider
            .call(self.dispatcher.contract(), call.encoded())
            .await?;
        let (addresses, amounts) = abi::decode_holder_arrays(&data)?;

        debug!(holders = addresses.len(), "holder enumeration read");
        Ok(addresses
            .into_iter()
            .zip(amounts)
            .map(|(address, amount)| HolderBalance { address, amount })
            .collect())
    }

    /// Holders joined with their registered role, organized events and
    /// attended events.
    pub async fn venue_stats(&self) -> Result<Vec<VenueStatsRow>, BalanceError> {
        let holders = self.holders().await?;
        let events = self.ledger.events().await;

        let mut rows = Vec::with_capacity(holders.len());
        for holder in holders {
            let assignment = self.registry.assignment_of(holder.address);
            let organized = events
                .iter()
                .filter(|e| e.doorman == holder.address || e.venue_manager == holder.address)
                .count() as u32;
            let attended = self.ledger.attended_by(holder.address).await.len() as u32;

            rows.push(VenueStatsRow {
                address: holder.address,
                name: assignment.as_ref().map(|a| a.name.clone()),
                role: assignment.map(|a| a.kind),
                tickets: holder.amount,
                organized,
                attended,
            });
        }
        Ok(rows)
    }

    /// Buy `quantity` tickets; the price travels as transaction value.
    pub async fn buy_tickets(&self, quantity: u32) -> Result<Receipt, BalanceError> {
        let value = self.ticket_price_wei * U256::from(quantity);
        let receipt = self
            .dispatcher
            .dispatch(&ContractCall::buy_ticket(), CallOptions::with_value(value))
            .await?;

        info!(quantity, value = %value, "tickets purchased");
        Ok(receipt)
    }

    /// Transfer `amount` ticket units to `to`, after a fresh balance check.
    pub async fn transfer_tickets(&self, to: Address, amount: U256) -> Result<Receipt, BalanceError> {
        self.ensure_funded(amount).await?;
        let receipt = self
            .dispatcher
            .dispatch(&ContractCall::transfer(to, amount), CallOptions::plain())
            .await?;

        info!(to = %to, amount = %amount, "tickets transferred");
        Ok(receipt)
    }

    /// Return `amount` ticket units to the vendor, after a fresh balance check.
    pub async fn refund_tickets(&self, amount: U256) -> Result<Receipt, BalanceError> {
        self.ensure_funded(amount).await?;
        let receipt = self
            .dispatcher
            .dispatch(&ContractCall::refund_tickets(amount), CallOptions::plain())
            .await?;

        info!(amount = %amount, "tickets refunded");
        Ok(receipt)
    }

    async fn ensure_funded(&self, amount: U256) -> Result<(), BalanceError> {
        let have = self.ticket_balance(self.dispatcher.sender()).await?;
        if have < amount {
            return Err(BalanceError::InsufficientTickets { have, need: amount });
        }
        Ok(())
    }
}

async fn read_ticket_balance(
    provider: &dyn Provider,
    contract: Address,
    owner: Address,
) -> Result<U256, BalanceError> {
    let call = ContractCall::balance_of(owner);
    let data = provider.call(contract, call.encoded()).await?;
    Ok(abi::decode_u256(&data)?)
}
