//! # Token Amounts
//!
//! Ticket balances travel as wei-denominated `U256` values; one ticket is
//! 10^18 wei, mirroring the contract's 18-decimal token.

use primitive_types::U256;

/// Wei per whole ticket (10^18).
pub const ONE_TICKET_WEI: u128 = 1_000_000_000_000_000_000;

/// Number of whole tickets in a wei-denominated balance (truncating).
pub fn whole_tickets(wei: U256) -> u64 {
    (wei / U256::from(ONE_TICKET_WEI)).low_u64()
}

/// Human-readable ticket count, e.g. `"2.5"` for 2.5 * 10^18 wei.
pub fn format_tickets(wei: U256) -> String {
    let whole = wei / U256::from(ONE_TICKET_WEI);
    let frac = wei % U256::from(ONE_TICKET_WEI);
    if frac.is_zero() {
        return whole.to_string();
    }

    let frac_str = format!("{:018}", frac.as_u128());
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_tickets_truncates() {
        let wei = U256::from(ONE_TICKET_WEI) * 3 + U256::from(1u8);
        assert_eq!(whole_tickets(wei), 3);
    }

    #[test]
    fn test_format_whole() {
        assert_eq!(format_tickets(U256::from(ONE_TICKET_WEI) * 2), "2");
    }

    #[test]
    fn test_format_fractional() {
        let half = U256::from(ONE_TICKET_WEI / 2);
        assert_eq!(format_tickets(half), "0.5");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_tickets(U256::zero()), "0");
    }
}
