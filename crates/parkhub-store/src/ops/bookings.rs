//! Booking operations.

use chrono::Utc;
use tracing::info;

use parkhub_core::events::BusEvent;
use parkhub_core::types::duration::format_duration;
use parkhub_core::types::id::{BookingId, SlotId, UserId};
use parkhub_core::{AppError, AppResult};
use parkhub_entity::booking::{Booking, BookingStatus, CreateBooking};
use parkhub_entity::notification::Audience;
use parkhub_entity::slot::SlotStatus;
use parkhub_entity::user::UserRole;

use crate::store::ParkingStore;

/// Fine charged on cancellation when the caller does not pass one.
pub const DEFAULT_CANCELLATION_FINE: f64 = 5.0;

impl ParkingStore {
    /// Book an available slot.
    ///
    /// The requested duration must fit within the slot's available
    /// duration; this is checked once here and never re-validated later.
    pub async fn create_booking(&self, req: CreateBooking) -> AppResult<Booking> {
        let booking = {
            let mut inner = self.write().await;
            let slot = inner.slot(req.slot_id)?;
            if !slot.is_bookable() {
                return Err(AppError::conflict(format!(
                    "Slot {} is not available for booking",
                    slot.slot_number
                )));
            }
            if req.parking_duration_minutes == 0 {
                return Err(AppError::validation(
                    "Parking duration must be greater than zero",
                ));
            }
            if req.parking_duration_minutes > slot.available_duration_minutes {
                return Err(AppError::validation(format!(
                    "Requested duration {} exceeds the slot limit of {}",
                    format_duration(req.parking_duration_minutes),
                    format_duration(slot.available_duration_minutes)
                )));
            }
            if req.user_name.trim().is_empty() {
                return Err(AppError::validation("User name cannot be empty"));
            }
            let slot_number = slot.slot_number.clone();
            let location = slot.location.clone();

            let booking = Booking {
                id: inner.next_booking_id(),
                slot_id: req.slot_id,
                user_id: req.user_id,
                status: BookingStatus::Upcoming,
                fine_amount: 0.0,
                start_time: req.start_time,
                end_time: req.end_time,
                parking_duration_minutes: req.parking_duration_minutes,
                booked_at: Utc::now(),
                user_name: req.user_name,
                slot_number,
                location,
            };
            inner.slot_mut(req.slot_id)?.status = SlotStatus::Booked;
            inner.stage(BusEvent::NewBooking {
                booking_id: booking.id,
                user_id: booking.user_id,
                slot_id: booking.slot_id,
                parking_duration_minutes: booking.parking_duration_minutes,
                user_name: booking.user_name.clone(),
                slot_number: booking.slot_number.clone(),
                location: booking.location.clone(),
            });
            inner.stage(BusEvent::NewBookingLegacy {
                id: booking.id,
                slot_id: booking.slot_id,
                user_id: booking.user_id,
                status: booking.status.as_str().to_owned(),
                fine_amount: booking.fine_amount,
                start_time: booking.start_time,
                end_time: booking.end_time,
                parking_duration_minutes: booking.parking_duration_minutes,
                booked_at: booking.booked_at,
                user_name: booking.user_name.clone(),
                slot_number: booking.slot_number.clone(),
                location: booking.location.clone(),
            });
            inner.notify(
                Audience::Role {
                    role: UserRole::Admin,
                },
                format!(
                    "{} booked slot {} at {} for {}",
                    booking.user_name,
                    booking.slot_number,
                    booking.location,
                    format_duration(booking.parking_duration_minutes)
                ),
            );
            inner.bookings.push(booking.clone());
            booking
        };

        info!(
            booking_id = %booking.id,
            slot_id = %booking.slot_id,
            user_id = %booking.user_id,
            "Booking created"
        );
        self.simulate_latency().await;
        Ok(booking)
    }

    /// Cancel a booking and free its slot.
    ///
    /// The fine defaults to [`DEFAULT_CANCELLATION_FINE`] when none is
    /// given. Cancelling a booking that already ran its course, either
    /// cancelled or completed, is refused.
    pub async fn cancel_booking(
        &self,
        id: BookingId,
        fine_amount: Option<f64>,
    ) -> AppResult<Booking> {
        let fine = fine_amount.unwrap_or(DEFAULT_CANCELLATION_FINE);
        let booking = {
            let mut inner = self.write().await;
            if fine < 0.0 {
                return Err(AppError::validation("Fine amount cannot be negative"));
            }
            let booking = inner.booking_mut(id)?;
            match booking.status {
                BookingStatus::Cancelled => {
                    return Err(AppError::already_in_state("Booking is already cancelled"));
                }
                BookingStatus::Completed => {
                    return Err(AppError::already_in_state("Booking is already completed"));
                }
                BookingStatus::Upcoming | BookingStatus::Active => {}
            }
            booking.status = BookingStatus::Cancelled;
            booking.fine_amount = fine;
            let booking = booking.clone();

            inner.release_slot_if_free(booking.slot_id);
            inner.stage(BusEvent::BookingCancelled {
                booking_id: booking.id,
                user_name: booking.user_name.clone(),
                slot_number: booking.slot_number.clone(),
                fine,
            });
            inner.notify(
                Audience::User {
                    user_id: booking.user_id,
                },
                format!(
                    "Your booking for slot {} was cancelled. A fine of ${:.2} applies.",
                    booking.slot_number, fine
                ),
            );
            booking
        };

        info!(
            booking_id = %booking.id,
            slot_id = %booking.slot_id,
            fine = booking.fine_amount,
            "Booking cancelled"
        );
        self.simulate_latency().await;
        Ok(booking)
    }

    /// List bookings in creation order, optionally filtered by status.
    pub async fn list_bookings(&self, status: Option<BookingStatus>) -> Vec<Booking> {
        self.simulate_latency().await;
        let inner = self.read().await;
        inner
            .bookings
            .iter()
            .filter(|b| status.map_or(true, |wanted| b.status == wanted))
            .cloned()
            .collect()
    }

    /// List one user's bookings in creation order.
    pub async fn list_bookings_for_user(&self, user_id: UserId) -> Vec<Booking> {
        self.simulate_latency().await;
        let inner = self.read().await;
        inner
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect()
    }

    /// List the bookings held against one slot, in creation order.
    pub async fn list_bookings_for_slot(&self, slot_id: SlotId) -> Vec<Booking> {
        self.simulate_latency().await;
        let inner = self.read().await;
        inner
            .bookings
            .iter()
            .filter(|b| b.slot_id == slot_id)
            .cloned()
            .collect()
    }

    /// Fetch a single booking.
    pub async fn get_booking(&self, id: BookingId) -> AppResult<Booking> {
        self.simulate_latency().await;
        self.read().await.booking(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_managers;
    use chrono::Duration;
    use parkhub_core::config::simulation::SimulationConfig;
    use parkhub_core::error::ErrorKind;
    use parkhub_entity::slot::{CreateSlot, LocationRef, Slot};

    fn test_store() -> ParkingStore {
        ParkingStore::new(&SimulationConfig::default(), demo_managers())
    }

    async fn store_with_slot() -> (ParkingStore, Slot) {
        let store = test_store();
        let slot = store
            .create_slot(CreateSlot {
                slot_number: "A-1".into(),
                location: LocationRef::New {
                    name: "Central Garage".into(),
                    address: "1 Main St".into(),
                },
                available_duration_minutes: 120,
                schedule: Vec::new(),
                owner_name: None,
                created_by: UserId::new(1),
            })
            .await
            .unwrap();
        store.drain_staged().await;
        (store, slot)
    }

    fn booking_req(slot: &Slot, minutes: u32) -> CreateBooking {
        CreateBooking {
            slot_id: slot.id,
            user_id: UserId::new(7),
            user_name: "Dana".into(),
            start_time: Utc::now(),
            end_time: Utc::now() + Duration::minutes(minutes.into()),
            parking_duration_minutes: minutes,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_flips_slot_to_booked() {
        let (store, slot) = store_with_slot().await;
        let booking = store.create_booking(booking_req(&slot, 60)).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Upcoming);
        assert_eq!(booking.fine_amount, 0.0);
        assert_eq!(booking.slot_number, "A-1");
        assert_eq!(booking.location, "Central Garage, 1 Main St");
        assert_eq!(
            store.get_slot(slot.id).await.unwrap().status,
            SlotStatus::Booked
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_duration_over_cap_fails_without_mutation() {
        let (store, slot) = store_with_slot().await;
        let err = store
            .create_booking(booking_req(&slot, 180))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(store.list_bookings(None).await.is_empty());
        assert_eq!(
            store.get_slot(slot.id).await.unwrap().status,
            SlotStatus::Available
        );
        assert!(store.drain_staged().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_a_booked_slot_is_refused() {
        let (store, slot) = store_with_slot().await;
        store.create_booking(booking_req(&slot, 60)).await.unwrap();

        let err = store
            .create_booking(booking_req(&slot, 30))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.list_bookings(None).await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_stages_structured_and_legacy_events() {
        let (store, slot) = store_with_slot().await;
        let booking = store.create_booking(booking_req(&slot, 60)).await.unwrap();

        let drained = store.drain_staged().await;
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].event.name(), "new_booking");
        assert_eq!(drained[1].event.name(), "newBooking");
        match &drained[0].event {
            BusEvent::NewBooking {
                booking_id,
                slot_number,
                location,
                ..
            } => {
                assert_eq!(*booking_id, booking.id);
                assert_eq!(slot_number, "A-1");
                assert_eq!(location, "Central Garage, 1 Main St");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_applies_default_fine_and_frees_slot() {
        let (store, slot) = store_with_slot().await;
        let booking = store.create_booking(booking_req(&slot, 60)).await.unwrap();
        store.drain_staged().await;

        let cancelled = store.cancel_booking(booking.id, None).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(cancelled.fine_amount, DEFAULT_CANCELLATION_FINE);
        assert_eq!(
            store.get_slot(slot.id).await.unwrap().status,
            SlotStatus::Available
        );

        let drained = store.drain_staged().await;
        assert_eq!(drained[0].event.name(), "bookingCancelled");
        match &drained[0].event {
            BusEvent::BookingCancelled { fine, .. } => {
                assert_eq!(*fine, DEFAULT_CANCELLATION_FINE)
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_twice_reports_already_cancelled() {
        let (store, slot) = store_with_slot().await;
        let booking = store.create_booking(booking_req(&slot, 60)).await.unwrap();
        store.cancel_booking(booking.id, None).await.unwrap();

        let err = store.cancel_booking(booking.id, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyInState);
        // The slot was freed exactly once and stays free.
        assert_eq!(
            store.get_slot(slot.id).await.unwrap().status,
            SlotStatus::Available
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_with_explicit_fine() {
        let (store, slot) = store_with_slot().await;
        let booking = store.create_booking(booking_req(&slot, 60)).await.unwrap();

        let cancelled = store.cancel_booking(booking.id, Some(12.5)).await.unwrap();
        assert_eq!(cancelled.fine_amount, 12.5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_fine_is_rejected() {
        let (store, slot) = store_with_slot().await;
        let booking = store.create_booking(booking_req(&slot, 60)).await.unwrap();

        let err = store
            .cancel_booking(booking.id, Some(-1.0))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(store.get_booking(booking.id).await.unwrap().is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_queues_user_notification() {
        let (store, slot) = store_with_slot().await;
        let booking = store.create_booking(booking_req(&slot, 60)).await.unwrap();
        store.cancel_booking(booking.id, None).await.unwrap();

        let inbox = store
            .list_notifications(Audience::User {
                user_id: UserId::new(7),
            })
            .await;
        assert_eq!(inbox.len(), 1);
        assert!(inbox[0].message.contains("A-1"));
        assert!(inbox[0].is_unread());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_booking_and_slot_ids() {
        let store = test_store();
        let err = store.cancel_booking(BookingId::new(9), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = store
            .create_booking(CreateBooking {
                slot_id: SlotId::new(9),
                user_id: UserId::new(1),
                user_name: "Dana".into(),
                start_time: Utc::now(),
                end_time: Utc::now(),
                parking_duration_minutes: 30,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_list_filters() {
        let (store, slot) = store_with_slot().await;
        let first = store.create_booking(booking_req(&slot, 60)).await.unwrap();
        store.cancel_booking(first.id, None).await.unwrap();
        store.create_booking(booking_req(&slot, 30)).await.unwrap();

        assert_eq!(store.list_bookings(None).await.len(), 2);
        let cancelled = store.list_bookings(Some(BookingStatus::Cancelled)).await;
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, first.id);
        assert_eq!(store.list_bookings_for_slot(slot.id).await.len(), 2);
        assert_eq!(store.list_bookings_for_user(UserId::new(7)).await.len(), 2);
    }
}
