//! # Ledger Service
//!
//! The [`EventLedger`]: event creation with up-front role registration, and
//! entry with the fixed ordering of fresh checks, ticket burn, then record.
//! All ledger state sits behind one async mutex so the check-burn-record
//! sequence of concurrent entries cannot interleave.

use std::sync::Arc;

use ethmission_types::{Address, KeyValueStore, ONE_TICKET_WEI, U256};
use tokio::sync::Mutex;
use tracing::{info, warn};

use ethmission_dispatch::Receipt;
use ethmission_roles::{RoleKind, RoleRegistry};

use crate::domain::attendance::AttendanceBook;
use crate::domain::event::{Event, EventDraft};
use crate::errors::EventError;
use crate::ports::TicketAccess;

const EVENTS_KEY: &str = "ethmission.events";
const ATTENDANCE_KEY: &str = "ethmission.attendance";

struct LedgerState {
    events: Vec<Event>,
    attendance: AttendanceBook,
}

/// Persistent event table plus attendance book, entered through ticket burns.
pub struct EventLedger {
    state: Mutex<LedgerState>,
    store: Arc<dyn KeyValueStore>,
    registry: Arc<RoleRegistry>,
    tickets: Arc<dyn TicketAccess>,
}

impl EventLedger {
    /// Open the ledger, loading any previously persisted events and
    /// attendance records.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        registry: Arc<RoleRegistry>,
        tickets: Arc<dyn TicketAccess>,
    ) -> Result<Self, EventError> {
        let events = match store.load(EVENTS_KEY)? {
            Some(doc) => serde_json::from_str(&doc).map_err(|e| EventError::Storage(e.to_string()))?,
            None => Vec::new(),
        };
        let attendance = match store.load(ATTENDANCE_KEY)? {
            Some(doc) => serde_json::from_str(&doc).map_err(|e| EventError::Storage(e.to_string()))?,
            None => AttendanceBook::new(),
        };
        Ok(Self {
            state: Mutex::new(LedgerState { events, attendance }),
            store,
            registry,
            tickets,
        })
    }

    /// Create an event, registering its doorman and venue roles first.
    ///
    /// Role registration happens before the event is persisted; when either
    /// registration fails the event does not exist. A doorman role already
    /// registered by an earlier event counts as a failure here, matching the
    /// registry's insert-only uniqueness.
    pub async fn create(&self, draft: EventDraft) -> Result<Event, EventError> {
        if draft.max_capacity == 0 {
            return Err(EventError::InvalidCapacity(0));
        }
        let doorman: Address = draft.doorman_address.parse()?;
        let venue_manager: Address = draft.venue_address.parse()?;

        self.registry
            .register(RoleKind::Doorman, &draft.doorman_name, &draft.doorman_address)?;
        self.registry
            .register(RoleKind::Venue, &draft.venue_name, &draft.venue_address)?;

        let mut state = self.state.lock().await;
        let event = Event {
            id: next_event_id(&state.events),
            name: draft.name,
            date: draft.date,
            doorman,
            venue_manager,
            max_capacity: draft.max_capacity,
            current_attendance: 0,
        };

        let mut next = state.events.clone();
        next.push(event.clone());
        self.persist_events(&next)?;
        state.events = next;

        info!(
            event = event.id,
            name = %event.name,
            capacity = event.max_capacity,
            "event created"
        );
        Ok(event)
    }

    /// Admit `attendee` to the event, burning one ticket to the venue
    /// manager.
    ///
    /// Ordering is fixed: fresh capacity and balance checks, then the burn,
    /// and only after the burn confirms is attendance incremented and
    /// recorded. Repeat entry burns another ticket; the attendance record
    /// itself is idempotent.
    pub async fn enter(&self, event_id: u64, attendee: Address) -> Result<Receipt, EventError> {
        let mut state = self.state.lock().await;

        let index = state
            .events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or(EventError::NotFound(event_id))?;
        let (venue_manager, capacity) = {
            let event = &state.events[index];
            if event.is_full() {
                warn!(event = event_id, attendee = %attendee, "entry denied, at capacity");
                return Err(EventError::AtCapacity { id: event_id, capacity: event.max_capacity });
            }
            (event.venue_manager, event.max_capacity)
        };

        let balance = self.tickets.ticket_balance(attendee).await?;
        if balance < U256::from(ONE_TICKET_WEI) {
            warn!(event = event_id, attendee = %attendee, "entry denied, insufficient balance");
            return Err(EventError::InsufficientTicketBalance);
        }

        let receipt = self.tickets.burn_for_entry(venue_manager).await?;

        state.events[index].current_attendance += 1;
        state.attendance.record(attendee, event_id);
        self.persist_events(&state.events)?;
        self.persist_attendance(&state.attendance)?;

        info!(
            event = event_id,
            attendee = %attendee,
            attendance = state.events[index].current_attendance,
            capacity,
            "entry admitted"
        );
        Ok(receipt)
    }

    /// All events in creation order.
    pub async fn events(&self) -> Vec<Event> {
        self.state.lock().await.events.clone()
    }

    /// The event with this id, if any.
    pub async fn event(&self, id: u64) -> Option<Event> {
        self.state.lock().await.events.iter().find(|e| e.id == id).cloned()
    }

    /// Events `attendee` has entered, in id order.
    pub async fn attended_by(&self, attendee: Address) -> Vec<Event> {
        let state = self.state.lock().await;
        state
            .attendance
            .events_for(attendee)
            .into_iter()
            .filter_map(|id| state.events.iter().find(|e| e.id == id).cloned())
            .collect()
    }

    fn persist_events(&self, events: &[Event]) -> Result<(), EventError> {
        let doc = serde_json::to_string(events).map_err(|e| EventError::Storage(e.to_string()))?;
        self.store.save(EVENTS_KEY, &doc)?;
        Ok(())
    }

    fn persist_attendance(&self, attendance: &AttendanceBook) -> Result<(), EventError> {
        let doc =
            serde_json::to_string(attendance).map_err(|e| EventError::Storage(e.to_string()))?;
        self.store.save(ATTENDANCE_KEY, &doc)?;
        Ok(())
    }
}

/// Creation-time milliseconds, bumped past any existing id so two creations
/// in the same millisecond stay distinct.
fn next_event_id(events: &[Event]) -> u64 {
    let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let max_existing = events.iter().map(|e| e.id).max().unwrap_or(0);
    now.max(max_existing + 1)
}
