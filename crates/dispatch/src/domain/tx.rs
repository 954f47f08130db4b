//! # Transaction Assembly
//!
//! Legacy (EIP-155) transaction encoding for the local signing path: the
//! signing hash is keccak256 of the 9-field RLP list with `(chain_id, 0, 0)`
//! in the signature slots, and the broadcast form carries
//! `v = chain_id * 2 + 35 + parity`.

use ethmission_keystore::RecoverableSignature;
use ethmission_types::{Address, Hash, TxHash, U256};
use rlp::RlpStream;
use sha3::{Digest, Keccak256};

/// An unsigned contract call in flight through dispatch.
///
/// Ephemeral: built inside the dispatcher, consumed by a signing backend,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    /// Sending account.
    pub from: Address,
    /// Contract address.
    pub to: Address,
    /// Native value carried with the call (payable calls only).
    pub value: U256,
    /// Fixed gas limit from the call family.
    pub gas_limit: u64,
    /// Encoded calldata.
    pub data: Vec<u8>,
}

/// A fully parameterized legacy transaction awaiting signature.
#[derive(Debug, Clone)]
pub struct LegacyTransaction {
    /// Account nonce.
    pub nonce: u64,
    /// Gas price in wei.
    pub gas_price: U256,
    /// Gas limit.
    pub gas_limit: u64,
    /// Recipient contract.
    pub to: Address,
    /// Native value.
    pub value: U256,
    /// Calldata.
    pub data: Vec<u8>,
    /// EIP-155 chain id.
    pub chain_id: u64,
}

impl LegacyTransaction {
    /// The keccak256 prehash the sender signs (EIP-155 form).
    pub fn signing_hash(&self) -> Hash {
        let mut stream = RlpStream::new_list(9);
        self.append_body(&mut stream);
        stream.append(&self.chain_id);
        stream.append(&0u8);
        stream.append(&0u8);

        keccak256(stream.as_raw())
    }

    /// RLP-encode the broadcast form with the recovered signature attached.
    pub fn into_signed(self, signature: &RecoverableSignature) -> SignedTransaction {
        let v = self.chain_id * 2 + 35 + u64::from(signature.v);

        let mut stream = RlpStream::new_list(9);
        self.append_body(&mut stream);
        stream.append(&v);
        stream.append(&U256::from_big_endian(&signature.r));
        stream.append(&U256::from_big_endian(&signature.s));

        let raw = stream.out().to_vec();
        let hash = keccak256(&raw);
        SignedTransaction { raw, hash }
    }

    fn append_body(&self, stream: &mut RlpStream) {
        stream.append(&self.nonce);
        stream.append(&self.gas_price);
        stream.append(&self.gas_limit);
        stream.append(&self.to.as_bytes().to_vec());
        stream.append(&self.value);
        stream.append(&self.data);
    }
}

/// The confirmed outcome of a dispatched transaction.
///
/// Both signing backends resolve to this shape, so callers never learn which
/// path carried the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Hash of the mined transaction.
    pub transaction_hash: TxHash,
    /// Block the transaction landed in.
    pub block_number: u64,
    /// `true` when the call executed without reverting.
    pub status: bool,
}

/// A signed transaction ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Raw RLP bytes for `eth_sendRawTransaction`.
    pub raw: Vec<u8>,
    /// keccak256 of the raw bytes.
    pub hash: TxHash,
}

fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
