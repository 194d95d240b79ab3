//! Security activity operations: vehicle logging and alerts.

use chrono::Utc;
use tracing::info;

use parkhub_core::events::BusEvent;
use parkhub_core::types::id::SlotId;
use parkhub_core::{AppError, AppResult};
use parkhub_entity::activity::{LogDirection, LogVehicle, RaiseAlert, SecurityAlert, VehicleLog};
use parkhub_entity::booking::BookingStatus;
use parkhub_entity::notification::Audience;
use parkhub_entity::user::UserRole;

use crate::store::ParkingStore;

impl ParkingStore {
    /// Record a vehicle entering or leaving a slot.
    ///
    /// An entry activates the slot's upcoming booking when one exists; an
    /// exit completes the active booking and frees the slot. The booking
    /// holder is notified either way. Movements with no matching booking
    /// are still logged.
    pub async fn log_vehicle(&self, req: LogVehicle) -> AppResult<VehicleLog> {
        let log = {
            let mut inner = self.write().await;
            if req.plate.trim().is_empty() {
                return Err(AppError::validation("Vehicle plate cannot be empty"));
            }
            let slot_number = inner.slot(req.slot_id)?.slot_number.clone();

            let matched = match req.direction {
                LogDirection::Entry => inner
                    .bookings
                    .iter_mut()
                    .find(|b| b.slot_id == req.slot_id && b.status == BookingStatus::Upcoming)
                    .map(|b| {
                        b.status = BookingStatus::Active;
                        (b.id, b.user_id)
                    }),
                LogDirection::Exit => {
                    let completed = inner
                        .bookings
                        .iter_mut()
                        .find(|b| b.slot_id == req.slot_id && b.status == BookingStatus::Active)
                        .map(|b| {
                            b.status = BookingStatus::Completed;
                            (b.id, b.user_id)
                        });
                    if completed.is_some() {
                        inner.release_slot_if_free(req.slot_id);
                    }
                    completed
                }
            };
            let booking_id = matched.map(|(id, _)| id);

            let log = VehicleLog {
                id: inner.next_vehicle_log_id(),
                slot_id: req.slot_id,
                slot_number: slot_number.clone(),
                plate: req.plate,
                direction: req.direction,
                booking_id,
                logged_by: req.logged_by,
                logged_at: Utc::now(),
            };
            let event = match req.direction {
                LogDirection::Entry => BusEvent::VehicleEntry {
                    slot_id: req.slot_id,
                    slot_number: slot_number.clone(),
                    plate: log.plate.clone(),
                    booking_id,
                },
                LogDirection::Exit => BusEvent::VehicleExit {
                    slot_id: req.slot_id,
                    slot_number: slot_number.clone(),
                    plate: log.plate.clone(),
                    booking_id,
                },
            };
            inner.stage(event);
            if let Some((_, user_id)) = matched {
                let message = match req.direction {
                    LogDirection::Entry => {
                        format!("Your booking for slot {} is now active.", slot_number)
                    }
                    LogDirection::Exit => {
                        format!("Your booking for slot {} is complete.", slot_number)
                    }
                };
                inner.notify(Audience::User { user_id }, message);
            }
            inner.vehicle_logs.push(log.clone());
            log
        };

        info!(
            slot_id = %log.slot_id,
            direction = %log.direction,
            plate = %log.plate,
            "Vehicle movement logged"
        );
        self.simulate_latency().await;
        Ok(log)
    }

    /// Raise a security alert, notifying admins.
    pub async fn raise_alert(&self, req: RaiseAlert) -> AppResult<SecurityAlert> {
        let alert = {
            let mut inner = self.write().await;
            if req.message.trim().is_empty() {
                return Err(AppError::validation("Alert message cannot be empty"));
            }
            if let Some(slot_id) = req.slot_id {
                inner.slot(slot_id)?;
            }
            let alert = SecurityAlert {
                id: inner.next_alert_id(),
                slot_id: req.slot_id,
                message: req.message,
                severity: req.severity,
                raised_by: req.raised_by,
                raised_at: Utc::now(),
            };
            inner.stage(BusEvent::SecurityAlert {
                alert_id: alert.id,
                slot_id: alert.slot_id,
                message: alert.message.clone(),
                severity: alert.severity.as_str().to_owned(),
            });
            inner.notify(
                Audience::Role {
                    role: UserRole::Admin,
                },
                format!("Security alert ({}): {}", alert.severity, alert.message),
            );
            inner.alerts.push(alert.clone());
            alert
        };

        info!(alert_id = %alert.id, severity = %alert.severity, "Security alert raised");
        self.simulate_latency().await;
        Ok(alert)
    }

    /// List vehicle movements in logging order, optionally for one slot.
    pub async fn list_vehicle_logs(&self, slot_id: Option<SlotId>) -> Vec<VehicleLog> {
        self.simulate_latency().await;
        let inner = self.read().await;
        inner
            .vehicle_logs
            .iter()
            .filter(|log| slot_id.map_or(true, |id| log.slot_id == id))
            .cloned()
            .collect()
    }

    /// List raised alerts in creation order.
    pub async fn list_alerts(&self) -> Vec<SecurityAlert> {
        self.simulate_latency().await;
        self.read().await.alerts.clone()
    }
}
