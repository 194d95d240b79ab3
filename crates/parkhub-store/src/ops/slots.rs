//! Slot operations.

use chrono::Utc;
use tracing::info;

use parkhub_core::events::BusEvent;
use parkhub_core::types::duration::format_duration;
use parkhub_core::types::id::{ManagerId, SlotId};
use parkhub_core::{AppError, AppResult};
use parkhub_entity::notification::Audience;
use parkhub_entity::slot::{CreateSlot, Slot, SlotKind, SlotStatus, UpdateSlot};
use parkhub_entity::user::UserRole;

use crate::store::ParkingStore;

impl ParkingStore {
    /// Create a new slot, creating its location on the fly when the
    /// request carries location data instead of an id.
    pub async fn create_slot(&self, req: CreateSlot) -> AppResult<Slot> {
        let slot = {
            let mut inner = self.write().await;
            if req.slot_number.trim().is_empty() {
                return Err(AppError::validation("Slot number cannot be empty"));
            }
            if req.available_duration_minutes == 0 {
                return Err(AppError::validation(
                    "Available duration must be greater than zero",
                ));
            }
            let (location_id, location) = inner.resolve_location(req.location)?;
            let kind = match req.owner_name {
                Some(owner_name) => SlotKind::OwnerListed { owner_name },
                None => SlotKind::Plain,
            };
            let slot = Slot {
                id: inner.next_slot_id(),
                slot_number: req.slot_number,
                location_id,
                location,
                status: SlotStatus::Available,
                available_duration_minutes: req.available_duration_minutes,
                schedule: req.schedule,
                kind,
                created_by: req.created_by,
                created_at: Utc::now(),
            };
            inner.stage(BusEvent::SlotCreated {
                slot_id: slot.id,
                slot_number: slot.slot_number.clone(),
                available_duration_minutes: slot.available_duration_minutes,
                location: slot.location.clone(),
            });
            inner.notify(
                Audience::Role {
                    role: UserRole::User,
                },
                format!(
                    "New slot {} available at {} (max {})",
                    slot.slot_number,
                    slot.location,
                    format_duration(slot.available_duration_minutes)
                ),
            );
            inner.slots.push(slot.clone());
            slot
        };

        info!(slot_id = %slot.id, slot_number = %slot.slot_number, "Slot created");
        self.simulate_latency().await;
        Ok(slot)
    }

    /// Apply a partial update to a slot.
    ///
    /// The slot number cannot be changed while the slot is booked. When
    /// the location changes, the denormalized display string is recomputed
    /// and cascaded into every booking referencing this slot.
    pub async fn update_slot(&self, id: SlotId, patch: UpdateSlot) -> AppResult<Slot> {
        let slot = {
            let mut inner = self.write().await;
            let current = inner.slot(id)?;
            if let Some(ref slot_number) = patch.slot_number {
                if slot_number.trim().is_empty() {
                    return Err(AppError::validation("Slot number cannot be empty"));
                }
                if current.status == SlotStatus::Booked && *slot_number != current.slot_number {
                    return Err(AppError::conflict(
                        "Cannot change the slot number while the slot is booked",
                    ));
                }
            }
            if let Some(minutes) = patch.available_duration_minutes {
                if minutes == 0 {
                    return Err(AppError::validation(
                        "Available duration must be greater than zero",
                    ));
                }
            }
            let resolved = match patch.location {
                Some(location) => Some(inner.resolve_location(location)?),
                None => None,
            };

            let slot = inner.slot_mut(id)?;
            if let Some(slot_number) = patch.slot_number {
                slot.slot_number = slot_number;
            }
            if let Some(minutes) = patch.available_duration_minutes {
                slot.available_duration_minutes = minutes;
            }
            if let Some(schedule) = patch.schedule {
                slot.schedule = schedule;
            }
            if let Some((location_id, location)) = resolved {
                slot.location_id = location_id;
                slot.location = location;
            }
            let slot = slot.clone();

            for booking in inner.bookings.iter_mut().filter(|b| b.slot_id == id) {
                booking.slot_number = slot.slot_number.clone();
                booking.location = slot.location.clone();
            }
            inner.stage(BusEvent::SlotUpdated {
                slot_id: slot.id,
                slot_number: slot.slot_number.clone(),
                available_duration_minutes: slot.available_duration_minutes,
                location: slot.location.clone(),
            });
            inner.notify(
                Audience::Role {
                    role: UserRole::User,
                },
                format!("Slot {} at {} was updated", slot.slot_number, slot.location),
            );
            slot
        };

        info!(slot_id = %slot.id, "Slot updated");
        self.simulate_latency().await;
        Ok(slot)
    }

    /// Remove a slot and purge every booking that referenced it.
    ///
    /// A slot held by an upcoming or active booking cannot be deleted;
    /// the bookings must be cancelled first.
    pub async fn delete_slot(&self, id: SlotId) -> AppResult<()> {
        let slot_number = {
            let mut inner = self.write().await;
            let slot_number = inner.slot(id)?.slot_number.clone();
            if inner.has_live_booking(id) {
                return Err(AppError::conflict(format!(
                    "Cannot delete slot {slot_number} while it has upcoming or active bookings. Cancel the bookings first."
                )));
            }
            inner.slots.retain(|s| s.id != id);
            inner.bookings.retain(|b| b.slot_id != id);
            inner.stage(BusEvent::SlotDeleted {
                slot_id: id,
                slot_number: slot_number.clone(),
            });
            inner.notify(
                Audience::Role {
                    role: UserRole::User,
                },
                format!("Slot {slot_number} was removed"),
            );
            slot_number
        };

        info!(slot_id = %id, slot_number = %slot_number, "Slot deleted");
        self.simulate_latency().await;
        Ok(())
    }

    /// List slots in creation order, optionally filtered by status.
    pub async fn list_slots(&self, status: Option<SlotStatus>) -> Vec<Slot> {
        self.simulate_latency().await;
        let inner = self.read().await;
        inner
            .slots
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .cloned()
            .collect()
    }

    /// List the slots a manager runs for tenants.
    pub async fn list_slots_for_manager(&self, manager_id: ManagerId) -> Vec<Slot> {
        self.simulate_latency().await;
        let inner = self.read().await;
        inner
            .slots
            .iter()
            .filter(|s| s.kind.manager_id() == Some(manager_id))
            .cloned()
            .collect()
    }

    /// Fetch a single slot.
    pub async fn get_slot(&self, id: SlotId) -> AppResult<Slot> {
        self.simulate_latency().await;
        self.read().await.slot(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_managers;
    use chrono::Duration;
    use parkhub_core::config::simulation::SimulationConfig;
    use parkhub_core::error::ErrorKind;
    use parkhub_core::types::id::UserId;
    use parkhub_entity::booking::CreateBooking;
    use parkhub_entity::slot::LocationRef;

    fn test_store() -> ParkingStore {
        ParkingStore::new(&SimulationConfig::default(), demo_managers())
    }

    fn slot_req(slot_number: &str, minutes: u32) -> CreateSlot {
        CreateSlot {
            slot_number: slot_number.into(),
            location: LocationRef::New {
                name: "Central Garage".into(),
                address: "1 Main St".into(),
            },
            available_duration_minutes: minutes,
            schedule: Vec::new(),
            owner_name: None,
            created_by: UserId::new(1),
        }
    }

    fn booking_req(slot: &Slot) -> CreateBooking {
        CreateBooking {
            slot_id: slot.id,
            user_id: UserId::new(7),
            user_name: "Dana".into(),
            start_time: Utc::now(),
            end_time: Utc::now() + Duration::hours(1),
            parking_duration_minutes: 60,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_slot_with_new_location_creates_location_record() {
        let store = test_store();
        let slot = store.create_slot(slot_req("A-1", 120)).await.unwrap();

        assert_eq!(slot.status, SlotStatus::Available);
        assert_eq!(slot.location, "Central Garage, 1 Main St");
        assert_eq!(slot.kind, SlotKind::Plain);
        let locations = store.list_locations().await;
        assert_eq!(locations.len(), 1);
        assert_eq!(slot.location_id, Some(locations[0].id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_slot_rejects_zero_duration() {
        let store = test_store();
        let err = store.create_slot(slot_req("A-1", 0)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(store.list_slots(None).await.is_empty());
        assert!(store.list_locations().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_slot_stages_created_event() {
        let store = test_store();
        let slot = store.create_slot(slot_req("A-1", 120)).await.unwrap();

        let drained = store.drain_staged().await;
        assert_eq!(drained.len(), 1);
        match &drained[0].event {
            BusEvent::SlotCreated {
                slot_id,
                slot_number,
                available_duration_minutes,
                location,
            } => {
                assert_eq!(*slot_id, slot.id);
                assert_eq!(slot_number, "A-1");
                assert_eq!(*available_duration_minutes, 120);
                assert_eq!(location, "Central Garage, 1 Main St");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_slot_unknown_id() {
        let store = test_store();
        let err = store
            .update_slot(SlotId::new(42), UpdateSlot::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_cascades_into_bookings() {
        let store = test_store();
        let slot = store.create_slot(slot_req("A-1", 120)).await.unwrap();
        let booking = store.create_booking(booking_req(&slot)).await.unwrap();
        assert_eq!(booking.slot_number, "A-1");

        store
            .update_slot(
                slot.id,
                UpdateSlot {
                    location: Some(LocationRef::New {
                        name: "North Lot".into(),
                        address: "9 Elm Ave".into(),
                    }),
                    ..UpdateSlot::default()
                },
            )
            .await
            .unwrap();

        let refreshed = store.get_booking(booking.id).await.unwrap();
        assert_eq!(refreshed.location, "North Lot, 9 Elm Ave");
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_rejects_renaming_booked_slot() {
        let store = test_store();
        let slot = store.create_slot(slot_req("A-1", 120)).await.unwrap();
        store.create_booking(booking_req(&slot)).await.unwrap();

        let err = store
            .update_slot(
                slot.id,
                UpdateSlot {
                    slot_number: Some("B-9".into()),
                    ..UpdateSlot::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.get_slot(slot.id).await.unwrap().slot_number, "A-1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_allows_duration_change_while_booked() {
        let store = test_store();
        let slot = store.create_slot(slot_req("A-1", 120)).await.unwrap();
        store.create_booking(booking_req(&slot)).await.unwrap();

        let updated = store
            .update_slot(
                slot.id,
                UpdateSlot {
                    available_duration_minutes: Some(240),
                    ..UpdateSlot::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.available_duration_minutes, 240);
        assert_eq!(updated.status, SlotStatus::Booked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_slot_with_live_booking_is_refused() {
        let store = test_store();
        let slot = store.create_slot(slot_req("A-1", 120)).await.unwrap();
        let booking = store.create_booking(booking_req(&slot)).await.unwrap();

        let err = store.delete_slot(slot.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        // Nothing changed on either record.
        assert_eq!(
            store.get_slot(slot.id).await.unwrap().status,
            SlotStatus::Booked
        );
        assert!(store.get_booking(booking.id).await.unwrap().is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_slot_purges_its_bookings() {
        let store = test_store();
        let slot = store.create_slot(slot_req("A-1", 120)).await.unwrap();
        let booking = store.create_booking(booking_req(&slot)).await.unwrap();
        store.cancel_booking(booking.id, None).await.unwrap();

        store.delete_slot(slot.id).await.unwrap();
        assert_eq!(
            store.get_slot(slot.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            store.get_booking(booking.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_list_slots_filters_by_status() {
        let store = test_store();
        let first = store.create_slot(slot_req("A-1", 120)).await.unwrap();
        store.create_slot(slot_req("A-2", 120)).await.unwrap();
        store.create_booking(booking_req(&first)).await.unwrap();

        let available = store.list_slots(Some(SlotStatus::Available)).await;
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].slot_number, "A-2");
        assert_eq!(store.list_slots(None).await.len(), 2);
    }
}
