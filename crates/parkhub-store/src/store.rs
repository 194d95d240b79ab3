//! Store state and shared internals.
//!
//! Write operations validate and mutate before the simulated delay so
//! failures surface immediately and no partial state is ever observable.
//! Reads wait out the delay first, then snapshot.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use parkhub_core::config::simulation::SimulationConfig;
use parkhub_core::events::{BusEvent, EventEnvelope};
use parkhub_core::types::id::{
    AlertId, BookingId, LocationId, ManagerId, NotificationId, SlotId, VehicleLogId,
};
use parkhub_core::{AppError, AppResult};
use parkhub_entity::activity::{SecurityAlert, VehicleLog};
use parkhub_entity::booking::Booking;
use parkhub_entity::location::Location;
use parkhub_entity::manager::Manager;
use parkhub_entity::notification::{Audience, Notification};
use parkhub_entity::slot::{LocationRef, Slot, SlotStatus};

/// Every collection plus the event outbox, behind one lock.
///
/// Each mutating operation takes the write guard once, does all of its
/// validation and mutation under it, and stages its events before
/// releasing. Nothing else ever observes a half-applied operation.
#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    pub(crate) locations: Vec<Location>,
    pub(crate) slots: Vec<Slot>,
    pub(crate) bookings: Vec<Booking>,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) managers: Vec<Manager>,
    pub(crate) vehicle_logs: Vec<VehicleLog>,
    pub(crate) alerts: Vec<SecurityAlert>,
    /// Events staged by mutations, oldest first, awaiting the pump.
    pub(crate) outbox: Vec<EventEnvelope>,
    last_location_id: i64,
    last_slot_id: i64,
    last_booking_id: i64,
    last_notification_id: i64,
    last_vehicle_log_id: i64,
    last_alert_id: i64,
}

impl StoreInner {
    pub(crate) fn next_location_id(&mut self) -> LocationId {
        self.last_location_id += 1;
        LocationId::new(self.last_location_id)
    }

    pub(crate) fn next_slot_id(&mut self) -> SlotId {
        self.last_slot_id += 1;
        SlotId::new(self.last_slot_id)
    }

    pub(crate) fn next_booking_id(&mut self) -> BookingId {
        self.last_booking_id += 1;
        BookingId::new(self.last_booking_id)
    }

    pub(crate) fn next_notification_id(&mut self) -> NotificationId {
        self.last_notification_id += 1;
        NotificationId::new(self.last_notification_id)
    }

    pub(crate) fn next_vehicle_log_id(&mut self) -> VehicleLogId {
        self.last_vehicle_log_id += 1;
        VehicleLogId::new(self.last_vehicle_log_id)
    }

    pub(crate) fn next_alert_id(&mut self) -> AlertId {
        self.last_alert_id += 1;
        AlertId::new(self.last_alert_id)
    }

    /// Stage an event for the pump to publish after this operation commits.
    pub(crate) fn stage(&mut self, event: BusEvent) {
        self.outbox.push(EventEnvelope::new(event));
    }

    /// Persist an inbox notification and, for audiences with a wire id,
    /// stage the matching `notification` bus event.
    pub(crate) fn notify(&mut self, audience: Audience, message: impl Into<String>) {
        let message = message.into();
        let notification = Notification {
            id: self.next_notification_id(),
            audience,
            message: message.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        if let Some(user_id) = audience.bus_target_id() {
            self.stage(BusEvent::Notification {
                user_id,
                message,
                created_at: notification.created_at,
            });
        }
        self.notifications.push(notification);
    }

    pub(crate) fn location(&self, id: LocationId) -> AppResult<&Location> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found(format!("Location {id} not found")))
    }

    pub(crate) fn slot(&self, id: SlotId) -> AppResult<&Slot> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Slot {id} not found")))
    }

    pub(crate) fn slot_mut(&mut self, id: SlotId) -> AppResult<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Slot {id} not found")))
    }

    pub(crate) fn booking(&self, id: BookingId) -> AppResult<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
    }

    pub(crate) fn booking_mut(&mut self, id: BookingId) -> AppResult<&mut Booking> {
        self.bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
    }

    pub(crate) fn manager(&self, id: ManagerId) -> AppResult<&Manager> {
        self.managers
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::not_found(format!("Manager {id} not found")))
    }

    /// Check if any upcoming or active booking holds the slot.
    pub(crate) fn has_live_booking(&self, slot_id: SlotId) -> bool {
        self.bookings
            .iter()
            .any(|b| b.slot_id == slot_id && b.status.is_live())
    }

    /// Flip the slot back to available once no live booking holds it.
    pub(crate) fn release_slot_if_free(&mut self, slot_id: SlotId) {
        if !self.has_live_booking(slot_id) {
            if let Some(slot) = self.slots.iter_mut().find(|s| s.id == slot_id) {
                slot.status = SlotStatus::Available;
            }
        }
    }

    /// Resolve a location reference to an id and a display string,
    /// creating the location record when the reference carries new data.
    ///
    /// All validation happens before the collection is touched, so a
    /// failed resolution leaves no trace.
    pub(crate) fn resolve_location(
        &mut self,
        location: LocationRef,
    ) -> AppResult<(Option<LocationId>, String)> {
        match location {
            LocationRef::Existing { location_id } => {
                let location = self.location(location_id)?;
                Ok((Some(location_id), location.display_string()))
            }
            LocationRef::New { name, address } => {
                if name.trim().is_empty() {
                    return Err(AppError::validation("Location name cannot be empty"));
                }
                if address.trim().is_empty() {
                    return Err(AppError::validation("Location address cannot be empty"));
                }
                let location = Location {
                    id: self.next_location_id(),
                    name,
                    address,
                    created_at: Utc::now(),
                };
                let resolved = (Some(location.id), location.display_string());
                self.locations.push(location);
                Ok(resolved)
            }
        }
    }
}

/// Handle to the shared in-memory store.
///
/// Clones are cheap and all point at the same state; inject one instance
/// wherever the store is needed rather than reaching for a global.
#[derive(Debug, Clone)]
pub struct ParkingStore {
    inner: Arc<RwLock<StoreInner>>,
    op_latency: Duration,
}

impl ParkingStore {
    /// Create an empty store with the given manager directory.
    ///
    /// Managers are static reference data: seeded here, never mutated by
    /// the booking flow.
    pub fn new(config: &SimulationConfig, managers: Vec<Manager>) -> Self {
        let inner = StoreInner {
            managers,
            ..StoreInner::default()
        };
        Self {
            inner: Arc::new(RwLock::new(inner)),
            op_latency: config.op_latency(),
        }
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().await
    }

    /// Wait out the simulated network round trip.
    pub(crate) async fn simulate_latency(&self) {
        tokio::time::sleep(self.op_latency).await;
    }

    /// Take every staged event, oldest first, leaving the outbox empty.
    pub async fn drain_staged(&self) -> Vec<EventEnvelope> {
        let mut inner = self.inner.write().await;
        std::mem::take(&mut inner.outbox)
    }
}
