//! # Contract Calls
//!
//! Typed constructors for the fixed ticket-token interface. Each call knows
//! its selector, its encoded arguments and which gas family it belongs to.

use ethmission_types::{Address, U256};

use super::abi;
use super::gas::{GAS_LIMIT_ENTRY, GAS_LIMIT_TRANSFER};

/// An encoded contract call ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Canonical function name, for logging.
    pub name: &'static str,
    data: Vec<u8>,
    gas_limit: u64,
}

impl ContractCall {
    fn new(name: &'static str, signature: &str, args: &[[u8; abi::WORD]], gas_limit: u64) -> Self {
        let mut data = Vec::with_capacity(4 + args.len() * abi::WORD);
        data.extend_from_slice(&abi::selector(signature));
        for arg in args {
            data.extend_from_slice(arg);
        }
        Self { name, data, gas_limit }
    }

    /// `transfer(address,uint256)`: token transfer, including entry burns.
    ///
    /// A transfer used as an entry burn carries the higher entry gas limit;
    /// see [`ContractCall::entry_burn`].
    pub fn transfer(to: Address, amount: U256) -> Self {
        Self::new(
            "transfer",
            "transfer(address,uint256)",
            &[abi::encode_address(to), abi::encode_u256(amount)],
            GAS_LIMIT_TRANSFER,
        )
    }

    /// A 1-ticket transfer to the venue manager consuming the ticket on entry.
    pub fn entry_burn(venue_manager: Address, amount: U256) -> Self {
        Self::new(
            "transfer",
            "transfer(address,uint256)",
            &[abi::encode_address(venue_manager), abi::encode_u256(amount)],
            GAS_LIMIT_ENTRY,
        )
    }

    /// `buyTicket()`: payable purchase; price travels in the transaction value.
    pub fn buy_ticket() -> Self {
        Self::new("buyTicket", "buyTicket()", &[], GAS_LIMIT_TRANSFER)
    }

    /// `refundTickets(uint256)`: return tickets to the vendor.
    pub fn refund_tickets(amount: U256) -> Self {
        Self::new(
            "refundTickets",
            "refundTickets(uint256)",
            &[abi::encode_u256(amount)],
            GAS_LIMIT_TRANSFER,
        )
    }

    /// `balanceOf(address)`: read-only, used through `eth_call`.
    pub fn balance_of(owner: Address) -> Self {
        Self::new(
            "balanceOf",
            "balanceOf(address)",
            &[abi::encode_address(owner)],
            GAS_LIMIT_TRANSFER,
        )
    }

    /// `getTicketHolders()`: read-only full holder enumeration.
    pub fn ticket_holders() -> Self {
        Self::new(
            "getTicketHolders",
            "getTicketHolders()",
            &[],
            GAS_LIMIT_TRANSFER,
        )
    }

    /// The encoded calldata (selector plus arguments).
    pub fn encoded(&self) -> &[u8] {
        &self.data
    }

    /// The fixed gas limit for this call's family.
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_calldata_layout() {
        let to = Address::from_bytes([0x11; 20]);
        let call = ContractCall::transfer(to, U256::from(5u8));
        let data = call.encoded();

        assert_eq!(data.len(), 4 + 2 * 32);
        assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(&data[16..36], to.as_bytes());
        assert_eq!(data[4 + 64 - 1], 5);
    }

    #[test]
    fn test_buy_ticket_is_selector_only() {
        let call = ContractCall::buy_ticket();
        assert_eq!(call.encoded().len(), 4);
    }

    #[test]
    fn test_entry_burn_uses_entry_gas() {
        let burn = ContractCall::entry_burn(Address::default(), U256::one());
        let plain = ContractCall::transfer(Address::default(), U256::one());

        assert_eq!(burn.encoded(), plain.encoded());
        assert_eq!(burn.gas_limit(), GAS_LIMIT_ENTRY);
        assert_eq!(plain.gas_limit(), GAS_LIMIT_TRANSFER);
    }
}
