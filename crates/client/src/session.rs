//! # Session Management
//!
//! One wallet session at a time. Connecting builds the whole per-session
//! stack (dispatcher, ticket gate, ledger, balance facade, role selection)
//! and replaces whatever session was active before. Disconnecting drops it.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use ethmission_balances::{BalanceService, TicketGate};
use ethmission_dispatch::{
    Dispatcher, ExternalBackend, ExternalSigner, LocalBackend, Provider, SignAndBroadcast,
};
use ethmission_events::EventLedger;
use ethmission_keystore::{parse_key_file, EncryptedKeyFile, KeystoreError, LocalSigner};
use ethmission_keystore::ports::ExternalWallet;
use ethmission_roles::{EscalationSecrets, RoleKind, RoleRegistry, RoleSelection};
use ethmission_types::{Address, KeyValueStore, U256};

use crate::config::ClientConfig;
use crate::errors::ClientError;

/// Which signing path carries the session's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// The user's wallet signs and broadcasts.
    External,
    /// An unlocked key file signs in-process.
    Local,
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMode::External => f.write_str("external"),
            SessionMode::Local => f.write_str("local"),
        }
    }
}

/// Everything built on top of one connected wallet.
pub struct SessionServices {
    pub address: Address,
    pub mode: SessionMode,
    pub dispatcher: Arc<Dispatcher>,
    pub ledger: Arc<EventLedger>,
    pub balances: Arc<BalanceService>,
    registry: Arc<RoleRegistry>,
    selection: Mutex<RoleSelection>,
}

impl std::fmt::Debug for SessionServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionServices")
            .field("address", &self.address)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl SessionServices {
    /// Attempt to activate `target` for this session's address.
    pub fn select_role(&self, target: RoleKind, secret: Option<&str>) -> RoleKind {
        self.selection
            .lock()
            .select(target, &self.registry, self.address, secret)
    }

    /// The session's currently active role.
    pub fn active_role(&self) -> RoleKind {
        self.selection.lock().active()
    }
}

/// A freshly generated wallet, ready to hand to the user.
pub struct NewWallet {
    pub address: Address,
    /// Suggested download name, derived from the address.
    pub file_name: String,
    /// Encrypted key-file JSON.
    pub key_file: Vec<u8>,
}

/// The client runtime: shared registry plus the active session.
pub struct Client {
    config: ClientConfig,
    provider: Arc<dyn Provider>,
    store: Arc<dyn KeyValueStore>,
    registry: Arc<RoleRegistry>,
    active: RwLock<Option<Arc<SessionServices>>>,
}

impl Client {
    /// Build the runtime over an injected provider and store.
    pub fn new(
        config: ClientConfig,
        provider: Arc<dyn Provider>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ClientError> {
        let secrets = EscalationSecrets::new(
            config.admin.password.clone(),
            config.doorman.as_ref().map(|d| d.password.clone()),
        );
        let registry = Arc::new(RoleRegistry::open(store.clone(), secrets)?);

        Ok(Self { config, provider, store, registry, active: RwLock::new(None) })
    }

    /// The shared role registry, live across sessions.
    pub fn registry(&self) -> Arc<RoleRegistry> {
        self.registry.clone()
    }

    /// The active session, or [`ClientError::NotConnected`].
    pub fn session(&self) -> Result<Arc<SessionServices>, ClientError> {
        self.active.read().clone().ok_or(ClientError::NotConnected)
    }

    /// Connect through an external wallet. The wallet picks the account;
    /// refusal surfaces as [`KeystoreError::ConnectionRejected`].
    pub async fn connect_external<W>(&self, wallet: Arc<W>) -> Result<Arc<SessionServices>, ClientError>
    where
        W: ExternalWallet + ExternalSigner + 'static,
    {
        let accounts = wallet.request_accounts().await?;
        let account = accounts
            .first()
            .copied()
            .ok_or(KeystoreError::ConnectionRejected)?;

        let backend = Arc::new(ExternalBackend::new(wallet, account));
        self.establish(account, SessionMode::External, backend)
    }

    /// Connect by decrypting an uploaded key file with `password`.
    pub fn connect_with_key_file(
        &self,
        bytes: &[u8],
        password: &str,
    ) -> Result<Arc<SessionServices>, ClientError> {
        let file = parse_key_file(bytes)?;
        let signer = file.unlock(password)?;
        let address = signer.address();

        let backend = Arc::new(LocalBackend::new(
            Arc::new(signer),
            self.provider.clone(),
            self.config.provider.chain_id,
        ));
        self.establish(address, SessionMode::Local, backend)
    }

    /// Drop the active session, if any.
    pub fn disconnect(&self) {
        if let Some(previous) = self.active.write().take() {
            info!(address = %previous.address, "wallet disconnected");
        }
    }

    /// Generate a wallet and seal it under `password`.
    pub fn create_wallet(&self, password: &str) -> Result<NewWallet, ClientError> {
        let signer = LocalSigner::generate();
        let key_file = EncryptedKeyFile::export(&signer, password)?;
        let file_name = parse_key_file(&key_file)?.suggested_file_name();

        info!(address = %signer.address(), "wallet created");
        Ok(NewWallet { address: signer.address(), file_name, key_file })
    }

    fn establish(
        &self,
        address: Address,
        mode: SessionMode,
        backend: Arc<dyn SignAndBroadcast>,
    ) -> Result<Arc<SessionServices>, ClientError> {
        let dispatcher = Arc::new(Dispatcher::new(backend, self.config.contract.address));
        let gate = Arc::new(TicketGate::new(self.provider.clone(), dispatcher.clone()));
        let ledger = Arc::new(EventLedger::open(
            self.store.clone(),
            self.registry.clone(),
            gate,
        )?);
        let balances = Arc::new(BalanceService::new(
            self.provider.clone(),
            dispatcher.clone(),
            self.registry.clone(),
            ledger.clone(),
            U256::from(self.config.ticket_price_wei),
        ));

        let services = Arc::new(SessionServices {
            address,
            mode,
            dispatcher,
            ledger,
            balances,
            registry: self.registry.clone(),
            selection: Mutex::new(RoleSelection::new()),
        });

        let mut active = self.active.write();
        if let Some(previous) = active.as_ref() {
            warn!(
                previous = %previous.address,
                next = %address,
                "replacing active wallet session"
            );
        }
        *active = Some(services.clone());

        info!(address = %address, %mode, "wallet connected");
        Ok(services)
    }
}
