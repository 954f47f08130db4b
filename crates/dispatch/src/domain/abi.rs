//! # ABI Encoding Primitives
//!
//! Just enough of the contract ABI for the fixed ticket-token interface:
//! 32-byte word encoding for static arguments, and decoding for `uint256`
//! scalars and the two parallel dynamic arrays `getTicketHolders()` returns.

use ethmission_types::{Address, U256};
use sha3::{Digest, Keccak256};

use crate::errors::AbiError;

/// ABI word size in bytes.
pub const WORD: usize = 32;

/// First four bytes of keccak256 of the canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak256::new();
    hasher.update(signature.as_bytes());
    let digest = hasher.finalize();

    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Encode an address as a left-padded 32-byte word.
pub fn encode_address(address: Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Encode a `uint256` as a big-endian 32-byte word.
pub fn encode_u256(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

/// Decode a single `uint256` return value.
pub fn decode_u256(data: &[u8]) -> Result<U256, AbiError> {
    if data.len() < WORD {
        return Err(AbiError::Truncated(data.len()));
    }
    Ok(U256::from_big_endian(&data[..WORD]))
}

/// Decode the `(address[], uint256[])` pair returned by `getTicketHolders()`.
///
/// Layout: two head words holding byte offsets, each pointing at a length
/// word followed by that many element words.
pub fn decode_holder_arrays(data: &[u8]) -> Result<(Vec<Address>, Vec<U256>), AbiError> {
    let addr_offset = read_offset(data, 0)?;
    let amount_offset = read_offset(data, WORD)?;

    let addresses = read_array(data, addr_offset)?
        .iter()
        .map(|word| word_to_address(word))
        .collect::<Result<Vec<_>, _>>()?;
    let amounts = read_array(data, amount_offset)?
        .iter()
        .map(|word| U256::from_big_endian(word))
        .collect();

    Ok((addresses, amounts))
}

fn read_word(data: &[u8], at: usize) -> Result<[u8; WORD], AbiError> {
    let end = at.checked_add(WORD).ok_or(AbiError::Truncated(at))?;
    if end > data.len() {
        return Err(AbiError::Truncated(at));
    }
    let mut word = [0u8; WORD];
    word.copy_from_slice(&data[at..end]);
    Ok(word)
}

fn read_offset(data: &[u8], at: usize) -> Result<usize, AbiError> {
    let word = read_word(data, at)?;
    let value = U256::from_big_endian(&word);
    if value > U256::from(usize::MAX) {
        return Err(AbiError::Malformed(format!("offset {value} out of range")));
    }
    Ok(value.as_usize())
}

fn read_array(data: &[u8], at: usize) -> Result<Vec<[u8; WORD]>, AbiError> {
    let length = read_offset(data, at)?;
    let mut elements = Vec::with_capacity(length);
    for i in 0..length {
        let element_at = at
            .checked_add(WORD)
            .and_then(|base| base.checked_add(i * WORD))
            .ok_or(AbiError::Truncated(at))?;
        elements.push(read_word(data, element_at)?);
    }
    Ok(elements)
}

fn word_to_address(word: &[u8; WORD]) -> Result<Address, AbiError> {
    if word[..12].iter().any(|&b| b != 0) {
        return Err(AbiError::Malformed("address word has high bytes set".to_string()));
    }
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&word[12..]);
    Ok(Address::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_selector() {
        // Canonical ERC-20 transfer selector
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_balance_of_selector() {
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_encode_address_left_pads() {
        let addr = Address::from_bytes([0xAB; 20]);
        let word = encode_address(addr);
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], addr.as_bytes());
    }

    #[test]
    fn test_u256_roundtrip() {
        let value = U256::from(123_456_789u64);
        assert_eq!(decode_u256(&encode_u256(value)).unwrap(), value);
    }

    #[test]
    fn test_decode_u256_truncated() {
        assert_eq!(decode_u256(&[0u8; 10]), Err(AbiError::Truncated(10)));
    }

    fn encode_holder_arrays(holders: &[(Address, U256)]) -> Vec<u8> {
        let mut data = Vec::new();
        let addr_offset = 2 * WORD;
        let amount_offset = addr_offset + WORD + holders.len() * WORD;
        data.extend_from_slice(&encode_u256(U256::from(addr_offset)));
        data.extend_from_slice(&encode_u256(U256::from(amount_offset)));

        data.extend_from_slice(&encode_u256(U256::from(holders.len())));
        for (addr, _) in holders {
            data.extend_from_slice(&encode_address(*addr));
        }
        data.extend_from_slice(&encode_u256(U256::from(holders.len())));
        for (_, amount) in holders {
            data.extend_from_slice(&encode_u256(*amount));
        }
        data
    }

    #[test]
    fn test_decode_holder_arrays() {
        let holders = vec![
            (Address::from_bytes([1u8; 20]), U256::from(10u8)),
            (Address::from_bytes([2u8; 20]), U256::from(20u8)),
        ];
        let data = encode_holder_arrays(&holders);

        let (addresses, amounts) = decode_holder_arrays(&data).unwrap();
        assert_eq!(addresses, vec![holders[0].0, holders[1].0]);
        assert_eq!(amounts, vec![holders[0].1, holders[1].1]);
    }

    #[test]
    fn test_decode_empty_holder_arrays() {
        let data = encode_holder_arrays(&[]);
        let (addresses, amounts) = decode_holder_arrays(&data).unwrap();
        assert!(addresses.is_empty());
        assert!(amounts.is_empty());
    }

    #[test]
    fn test_decode_holder_arrays_truncated() {
        let holders = vec![(Address::from_bytes([1u8; 20]), U256::one())];
        let mut data = encode_holder_arrays(&holders);
        data.truncate(data.len() - 1);
        assert!(decode_holder_arrays(&data).is_err());
    }
}
