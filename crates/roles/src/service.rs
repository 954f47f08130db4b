//! # Role Service
//!
//! The persistent [`RoleRegistry`] and the per-session [`RoleSelection`]
//! state machine. Registration validates the address before any uniqueness
//! check, and a mutation only lands in memory after it has been persisted.

use std::sync::Arc;

use ethmission_types::{Address, KeyValueStore};
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::domain::assignment::{RoleAssignment, RoleKind};
use crate::domain::escalation::EscalationSecrets;
use crate::errors::RoleError;

/// Store key holding the serialized assignment list.
const STORE_KEY: &str = "ethmission.roles";

// ============================================================
// Registry
// ============================================================

/// Insert-only registry of role assignments, persisted as one JSON document.
pub struct RoleRegistry {
    assignments: RwLock<Vec<RoleAssignment>>,
    store: Arc<dyn KeyValueStore>,
    secrets: EscalationSecrets,
}

impl RoleRegistry {
    /// Open the registry, loading any previously persisted assignments.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        secrets: EscalationSecrets,
    ) -> Result<Self, RoleError> {
        let assignments = match store.load(STORE_KEY)? {
            Some(doc) => {
                serde_json::from_str(&doc).map_err(|e| RoleError::Storage(e.to_string()))?
            }
            None => Vec::new(),
        };
        Ok(Self { assignments: RwLock::new(assignments), store, secrets })
    }

    /// Register `address` under `name` with role `kind`.
    ///
    /// The address is parsed first, so a malformed address never reports a
    /// duplicate. On persistence failure nothing is registered.
    pub fn register(
        &self,
        kind: RoleKind,
        name: &str,
        address: &str,
    ) -> Result<RoleAssignment, RoleError> {
        let address: Address = address.parse()?;

        let mut guard = self.assignments.write();
        if guard.iter().any(|a| a.name == name) {
            return Err(RoleError::DuplicateName(name.to_string()));
        }
        if guard.iter().any(|a| a.address == address) {
            return Err(RoleError::DuplicateAddress(address));
        }

        let assignment = RoleAssignment { kind, name: name.to_string(), address };
        let mut next = guard.clone();
        next.push(assignment.clone());
        self.persist(&next)?;
        *guard = next;

        info!(role = %kind, name, address = %address, "role registered");
        Ok(assignment)
    }

    /// All assignments in insertion order.
    pub fn list(&self) -> Vec<RoleAssignment> {
        self.assignments.read().clone()
    }

    /// The assignment bound to `address`, if any.
    pub fn assignment_of(&self, address: Address) -> Option<RoleAssignment> {
        self.assignments.read().iter().find(|a| a.address == address).cloned()
    }

    /// Whether `address` holds role `kind`. Address equality is already
    /// case-insensitive at the type level.
    pub fn is_authorized(&self, address: Address, kind: RoleKind) -> bool {
        self.assignments
            .read()
            .iter()
            .any(|a| a.address == address && a.kind == kind)
    }

    /// Whether `secret` unlocks escalation to `kind`.
    pub fn verify_escalation(&self, kind: RoleKind, secret: &str) -> bool {
        self.secrets.matches(kind, secret)
    }

    fn persist(&self, assignments: &[RoleAssignment]) -> Result<(), RoleError> {
        let doc =
            serde_json::to_string(assignments).map_err(|e| RoleError::Storage(e.to_string()))?;
        self.store.save(STORE_KEY, &doc)?;
        Ok(())
    }
}

// ============================================================
// Role selection
// ============================================================

/// Per-session active role.
///
/// Every session starts as Attendee. Doorman and Venue require a matching
/// assignment; Admin requires the escalation secret. A failed transition
/// lands back on Attendee rather than keeping the previous role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSelection {
    active: RoleKind,
}

impl Default for RoleSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleSelection {
    pub fn new() -> Self {
        Self { active: RoleKind::Attendee }
    }

    /// The currently active role.
    pub fn active(&self) -> RoleKind {
        self.active
    }

    /// Attempt to activate `target` for `caller`, returning the resulting
    /// active role.
    pub fn select(
        &mut self,
        target: RoleKind,
        registry: &RoleRegistry,
        caller: Address,
        secret: Option<&str>,
    ) -> RoleKind {
        let granted = match target {
            RoleKind::Attendee => true,
            RoleKind::Doorman | RoleKind::Venue => registry.is_authorized(caller, target),
            RoleKind::Admin => {
                secret.is_some_and(|s| registry.verify_escalation(RoleKind::Admin, s))
            }
        };

        if granted {
            self.active = target;
            info!(role = %target, caller = %caller, "role activated");
        } else {
            self.active = RoleKind::Attendee;
            warn!(role = %target, caller = %caller, "role selection denied");
        }
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethmission_types::MemoryStore;

    fn registry() -> RoleRegistry {
        let secrets = EscalationSecrets::new("admin-pass", Some("door-pass".to_string()));
        RoleRegistry::open(Arc::new(MemoryStore::new()), secrets).unwrap()
    }

    fn addr(byte: u8) -> String {
        Address::from_bytes([byte; 20]).to_hex()
    }

    #[test]
    fn test_register_then_list_roundtrip() {
        let registry = registry();
        registry.register(RoleKind::Doorman, "Dora", &addr(1)).unwrap();
        registry.register(RoleKind::Venue, "Main Hall", &addr(2)).unwrap();

        let listed = registry.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Dora");
        assert_eq!(listed[0].kind, RoleKind::Doorman);
        assert_eq!(listed[1].name, "Main Hall");
        assert_eq!(listed[1].kind, RoleKind::Venue);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let registry = registry();
        registry.register(RoleKind::Doorman, "Dora", &addr(1)).unwrap();

        let err = registry.register(RoleKind::Venue, "Dora", &addr(2)).unwrap_err();
        assert_eq!(err, RoleError::DuplicateName("Dora".to_string()));
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn test_duplicate_address_rejected() {
        let registry = registry();
        registry.register(RoleKind::Doorman, "Dora", &addr(1)).unwrap();

        let err = registry.register(RoleKind::Venue, "Hall", &addr(1)).unwrap_err();
        assert_eq!(
            err,
            RoleError::DuplicateAddress(Address::from_bytes([1; 20]))
        );
    }

    #[test]
    fn test_invalid_address_beats_duplicate_name() {
        let registry = registry();
        registry.register(RoleKind::Doorman, "Dora", &addr(1)).unwrap();

        let err = registry.register(RoleKind::Venue, "Dora", "0xnothex").unwrap_err();
        assert!(matches!(err, RoleError::InvalidAddress(_)));
    }

    #[test]
    fn test_address_comparison_is_case_insensitive() {
        let registry = registry();
        let mixed = "0xAbCdEf0102030405060708090a0b0c0d0e0f1011";
        registry.register(RoleKind::Doorman, "Dora", mixed).unwrap();

        let lowered: Address = mixed.to_lowercase().parse().unwrap();
        assert!(registry.is_authorized(lowered, RoleKind::Doorman));
        assert!(!registry.is_authorized(lowered, RoleKind::Venue));
    }

    #[test]
    fn test_registry_persists_across_reopen() {
        let store = Arc::new(MemoryStore::new());
        let secrets = EscalationSecrets::new("admin-pass", None);
        let registry = RoleRegistry::open(store.clone(), secrets.clone()).unwrap();
        registry.register(RoleKind::Venue, "Hall", &addr(7)).unwrap();

        let reopened = RoleRegistry::open(store, secrets).unwrap();
        assert_eq!(reopened.list(), registry.list());
    }

    #[test]
    fn test_selection_starts_as_attendee() {
        assert_eq!(RoleSelection::new().active(), RoleKind::Attendee);
    }

    #[test]
    fn test_selecting_venue_without_assignment_reverts_to_attendee() {
        let registry = registry();
        let caller = Address::from_bytes([9; 20]);
        let mut selection = RoleSelection::new();

        let result = selection.select(RoleKind::Venue, &registry, caller, None);
        assert_eq!(result, RoleKind::Attendee);
        assert_eq!(selection.active(), RoleKind::Attendee);
    }

    #[test]
    fn test_selecting_doorman_with_assignment() {
        let registry = registry();
        registry.register(RoleKind::Doorman, "Dora", &addr(3)).unwrap();
        let caller = Address::from_bytes([3; 20]);
        let mut selection = RoleSelection::new();

        assert_eq!(
            selection.select(RoleKind::Doorman, &registry, caller, None),
            RoleKind::Doorman
        );
    }

    #[test]
    fn test_admin_requires_escalation_secret() {
        let registry = registry();
        let caller = Address::from_bytes([4; 20]);
        let mut selection = RoleSelection::new();

        assert_eq!(
            selection.select(RoleKind::Admin, &registry, caller, Some("wrong")),
            RoleKind::Attendee
        );
        assert_eq!(
            selection.select(RoleKind::Admin, &registry, caller, None),
            RoleKind::Attendee
        );
        assert_eq!(
            selection.select(RoleKind::Admin, &registry, caller, Some("admin-pass")),
            RoleKind::Admin
        );
    }

    #[test]
    fn test_failed_transition_drops_previous_privilege() {
        let registry = registry();
        registry.register(RoleKind::Doorman, "Dora", &addr(5)).unwrap();
        let caller = Address::from_bytes([5; 20]);
        let mut selection = RoleSelection::new();

        selection.select(RoleKind::Doorman, &registry, caller, None);
        assert_eq!(selection.active(), RoleKind::Doorman);

        selection.select(RoleKind::Venue, &registry, caller, None);
        assert_eq!(selection.active(), RoleKind::Attendee);
    }
}
