//! Tenant slot approval workflow.
//!
//! Managers submit slots on behalf of tenants; those slots start out
//! pending and cannot be booked until an admin approves them. Rejection
//! removes the slot entirely.

use chrono::Utc;
use tracing::info;

use parkhub_core::events::BusEvent;
use parkhub_core::types::id::SlotId;
use parkhub_core::{AppError, AppResult};
use parkhub_entity::notification::Audience;
use parkhub_entity::slot::{CreateTenantSlot, Slot, SlotKind, SlotStatus};
use parkhub_entity::user::UserRole;

use crate::store::ParkingStore;

impl ParkingStore {
    /// Submit a tenant slot for approval. The slot starts out pending.
    pub async fn create_tenant_slot(&self, req: CreateTenantSlot) -> AppResult<Slot> {
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
            if req.tenant_name.trim().is_empty() {
                return Err(AppError::validation("Tenant name cannot be empty"));
            }
            let manager_name = inner.manager(req.manager_id)?.name.clone();
            let (location_id, location) = inner.resolve_location(req.location)?;

            let slot = Slot {
                id: inner.next_slot_id(),
                slot_number: req.slot_number,
                location_id,
                location,
                status: SlotStatus::Pending,
                available_duration_minutes: req.available_duration_minutes,
                schedule: req.schedule,
                kind: SlotKind::TenantManaged {
                    manager_id: req.manager_id,
                    manager_name: manager_name.clone(),
                    tenant_name: req.tenant_name.clone(),
                    tenant_contact: req.tenant_contact,
                },
                created_by: req.created_by,
                created_at: Utc::now(),
            };
            inner.stage(BusEvent::TenantSlotCreated {
                slot_id: slot.id,
                slot_number: slot.slot_number.clone(),
                manager_id: req.manager_id,
                tenant_name: req.tenant_name,
                status: slot.status.as_str().to_owned(),
            });
            inner.notify(
                Audience::Role {
                    role: UserRole::Admin,
                },
                format!(
                    "Manager {} submitted slot {} for approval",
                    manager_name, slot.slot_number
                ),
            );
            inner.slots.push(slot.clone());
            slot
        };

        info!(
            slot_id = %slot.id,
            slot_number = %slot.slot_number,
            "Tenant slot submitted for approval"
        );
        self.simulate_latency().await;
        Ok(slot)
    }

    /// Approve a pending slot, opening it for booking.
    ///
    /// Notifies the responsible manager and queues a broad new-slot
    /// notification for users.
    pub async fn approve_slot(&self, id: SlotId) -> AppResult<Slot> {
        let slot = {
            let mut inner = self.write().await;
            let current = inner.slot(id)?;
            if current.status != SlotStatus::Pending {
                return Err(AppError::already_in_state(format!(
                    "Slot {} is not pending approval",
                    current.slot_number
                )));
            }
            let slot = {
                let slot = inner.slot_mut(id)?;
                slot.status = SlotStatus::Available;
                slot.clone()
            };
            inner.stage(BusEvent::SlotApproved { slot_id: id });
            if let Some(manager_id) = slot.kind.manager_id() {
                inner.notify(
                    Audience::Manager { manager_id },
                    format!(
                        "Your slot {} was approved and is now open for booking",
                        slot.slot_number
                    ),
                );
            }
            inner.notify(
                Audience::Role {
                    role: UserRole::User,
                },
                format!("New slot {} available at {}", slot.slot_number, slot.location),
            );
            slot
        };

        info!(slot_id = %slot.id, "Slot approved");
        self.simulate_latency().await;
        Ok(slot)
    }

    /// Reject a pending slot, removing it entirely.
    ///
    /// The responsible manager is notified, with the reason when one is
    /// given.
    pub async fn reject_slot(&self, id: SlotId, reason: Option<String>) -> AppResult<()> {
        let slot_number = {
            let mut inner = self.write().await;
            let current = inner.slot(id)?;
            if current.status != SlotStatus::Pending {
                return Err(AppError::already_in_state(format!(
                    "Slot {} is not pending approval",
                    current.slot_number
                )));
            }
            let slot_number = current.slot_number.clone();
            let manager_id = current.kind.manager_id();
            inner.slots.retain(|s| s.id != id);
            inner.stage(BusEvent::SlotRejected {
                slot_id: id,
                reason: reason.clone(),
            });
            if let Some(manager_id) = manager_id {
                let message = match &reason {
                    Some(reason) => format!("Your slot {slot_number} was rejected: {reason}"),
                    None => format!("Your slot {slot_number} was rejected"),
                };
                inner.notify(Audience::Manager { manager_id }, message);
            }
            slot_number
        };

        info!(slot_id = %id, slot_number = %slot_number, "Slot rejected");
        self.simulate_latency().await;
        Ok(())
    }
}
