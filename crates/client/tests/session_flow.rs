//! End-to-end flows over the assembled runtime with mock chain boundaries:
//! wallet connection, event creation, capacity-bounded entry and commerce
//! through both signing modes.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use ethmission_client::{Client, ClientConfig, SessionMode};
use ethmission_dispatch::domain::abi;
use ethmission_dispatch::{
    DispatchError, ExternalSigner, PendingTransaction, Provider, ProviderError, Receipt,
};
use ethmission_events::{EventDraft, EventError};
use ethmission_keystore::ports::ExternalWallet;
use ethmission_keystore::KeystoreError;
use ethmission_roles::RoleKind;
use ethmission_types::{Address, MemoryStore, ONE_TICKET_WEI, U256};

// ============================================================
// Mock chain boundaries
// ============================================================

struct MockProvider {
    ticket_balance: U256,
    broadcasts: AtomicU32,
}

impl MockProvider {
    fn funded() -> Self {
        Self { ticket_balance: U256::from(ONE_TICKET_WEI) * 100, broadcasts: AtomicU32::new(0) }
    }

    fn broke() -> Self {
        Self { ticket_balance: U256::zero(), broadcasts: AtomicU32::new(0) }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn send_raw_transaction(&self, _raw: &[u8]) -> Result<Receipt, ProviderError> {
        self.broadcasts.fetch_add(1, Ordering::SeqCst);
        Ok(Receipt { transaction_hash: [0xEE; 32], block_number: 5, status: true })
    }

    async fn call(&self, _to: Address, data: &[u8]) -> Result<Vec<u8>, ProviderError> {
        match &data[..4] {
            // balanceOf(address)
            [0x70, 0xa0, 0x82, 0x31] => Ok(abi::encode_u256(self.ticket_balance).to_vec()),
            _ => Err(ProviderError("unexpected call".to_string())),
        }
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, ProviderError> {
        Ok(U256::from(1_000_000u64))
    }

    async fn transaction_count(&self, _address: Address) -> Result<u64, ProviderError> {
        Ok(0)
    }

    async fn gas_price(&self) -> Result<U256, ProviderError> {
        Ok(U256::from(1_000_000_000u64))
    }
}

struct MockWallet {
    account: Address,
    sent: parking_lot::Mutex<Vec<PendingTransaction>>,
}

impl MockWallet {
    fn new(account: Address) -> Self {
        Self { account, sent: parking_lot::Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl ExternalWallet for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, KeystoreError> {
        Ok(vec![self.account])
    }
}

#[async_trait]
impl ExternalSigner for MockWallet {
    async fn send_transaction(&self, tx: &PendingTransaction) -> Result<Receipt, DispatchError> {
        self.sent.lock().push(tx.clone());
        Ok(Receipt { transaction_hash: [0xEE; 32], block_number: 5, status: true })
    }
}

// ============================================================
// Fixtures
// ============================================================

fn config() -> ClientConfig {
    ClientConfig::from_slice(
        br#"{
            "contract": { "address": "0x9999999999999999999999999999999999999999" },
            "provider": { "url": "http://localhost:8545", "chain_id": 1337 },
            "admin": { "password": "admin-pass" },
            "doorman": { "password": "door-pass" },
            "vendor": { "address": "0x2222222222222222222222222222222222222222" },
            "ticket_price_wei": 10000000000000000,
            "store_path": "/tmp/unused.json"
        }"#,
    )
    .unwrap()
}

fn client_with(provider: MockProvider) -> Client {
    Client::new(config(), Arc::new(provider), Arc::new(MemoryStore::new())).unwrap()
}

fn draft(capacity: u32) -> EventDraft {
    EventDraft {
        name: "Launch Party".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        doorman_name: "Dora".to_string(),
        doorman_address: Address::from_bytes([0xD0; 20]).to_hex(),
        venue_name: "Main Hall".to_string(),
        venue_address: Address::from_bytes([0xE0; 20]).to_hex(),
        max_capacity: capacity,
    }
}

// ============================================================
// Flows
// ============================================================

#[tokio::test]
async fn test_create_event_registers_both_roles() {
    let client = client_with(MockProvider::funded());
    let wallet = Arc::new(MockWallet::new(Address::from_bytes([0x11; 20])));
    let session = client.connect_external(wallet).await.unwrap();

    let event = session.ledger.create(draft(50)).await.unwrap();
    assert_eq!(session.ledger.event(event.id).await.unwrap(), event);

    let roles = client.registry().list();
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].kind, RoleKind::Doorman);
    assert_eq!(roles[0].name, "Dora");
    assert_eq!(roles[1].kind, RoleKind::Venue);
    assert_eq!(roles[1].name, "Main Hall");
}

#[tokio::test]
async fn test_concurrent_entry_respects_capacity() {
    let client = client_with(MockProvider::funded());
    let wallet = Arc::new(MockWallet::new(Address::from_bytes([0x11; 20])));
    let session = client.connect_external(wallet.clone()).await.unwrap();

    let event = session.ledger.create(draft(1)).await.unwrap();
    let event_id = event.id;

    let mut handles = Vec::new();
    for i in 0..5u8 {
        let ledger = session.ledger.clone();
        let attendee = Address::from_bytes([i + 1; 20]);
        handles.push(tokio::spawn(async move { ledger.enter(event_id, attendee).await }));
    }

    let mut admitted = 0;
    let mut at_capacity = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(receipt) => {
                assert!(receipt.status);
                admitted += 1;
            }
            Err(EventError::AtCapacity { .. }) => at_capacity += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(admitted, 1);
    assert_eq!(at_capacity, 4);

    let final_state = session.ledger.event(event.id).await.unwrap();
    assert_eq!(final_state.current_attendance, 1);
    assert!(final_state.current_attendance <= final_state.max_capacity);

    // Exactly one burn reached the wallet.
    assert_eq!(wallet.sent.lock().len(), 1);
}

#[tokio::test]
async fn test_entry_without_tickets_is_rejected_before_burning() {
    let client = client_with(MockProvider::broke());
    let wallet = Arc::new(MockWallet::new(Address::from_bytes([0x11; 20])));
    let session = client.connect_external(wallet.clone()).await.unwrap();

    let event = session.ledger.create(draft(10)).await.unwrap();
    let err = session
        .ledger
        .enter(event.id, Address::from_bytes([0x33; 20]))
        .await
        .unwrap_err();

    assert!(matches!(err, EventError::InsufficientTicketBalance));
    assert_eq!(session.ledger.event(event.id).await.unwrap().current_attendance, 0);
    assert!(wallet.sent.lock().is_empty());
}

#[tokio::test]
async fn test_purchase_carries_price_times_quantity() {
    let client = client_with(MockProvider::funded());
    let wallet = Arc::new(MockWallet::new(Address::from_bytes([0x11; 20])));
    let session = client.connect_external(wallet.clone()).await.unwrap();

    session.balances.buy_tickets(4).await.unwrap();

    let sent = wallet.sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].value, U256::from(40_000_000_000_000_000u64));
}

#[tokio::test]
async fn test_both_signing_modes_yield_the_same_receipt_shape() {
    // External mode.
    let external_client = client_with(MockProvider::funded());
    let wallet = Arc::new(MockWallet::new(Address::from_bytes([0x11; 20])));
    let external = external_client.connect_external(wallet).await.unwrap();
    let external_receipt = external.balances.buy_tickets(1).await.unwrap();

    // Local mode, signing in-process and broadcasting raw.
    let local_client = client_with(MockProvider::funded());
    let new_wallet = local_client.create_wallet("hunter2").unwrap();
    let local = local_client
        .connect_with_key_file(&new_wallet.key_file, "hunter2")
        .unwrap();
    assert_eq!(local.mode, SessionMode::Local);
    let local_receipt = local.balances.buy_tickets(1).await.unwrap();

    assert_eq!(external_receipt.status, local_receipt.status);
    assert_eq!(external_receipt.transaction_hash, local_receipt.transaction_hash);
    assert_eq!(external_receipt.block_number, local_receipt.block_number);
}

#[tokio::test]
async fn test_doorman_secret_escalation_from_config() {
    let client = client_with(MockProvider::funded());
    assert!(client.registry().verify_escalation(RoleKind::Doorman, "door-pass"));
    assert!(!client.registry().verify_escalation(RoleKind::Doorman, "admin-pass"));
    assert!(client.registry().verify_escalation(RoleKind::Admin, "admin-pass"));
}
