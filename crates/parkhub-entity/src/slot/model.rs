//! Slot entity model.

use chrono::{DateTime, Utc};
use parkhub_core::types::id::{LocationId, ManagerId, SlotId, UserId};
use serde::{Deserialize, Serialize};

use super::kind::SlotKind;
use super::schedule::AvailabilityRule;
use super::status::SlotStatus;

/// A single bookable parking space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Unique slot identifier.
    pub id: SlotId,
    /// Display label (e.g. "A-12"); not guaranteed unique.
    pub slot_number: String,
    /// The location this slot belongs to, when one is on record.
    pub location_id: Option<LocationId>,
    /// Denormalized location display string ("name, address").
    pub location: String,
    /// Current lifecycle status.
    pub status: SlotStatus,
    /// Ceiling for any booking's duration against this slot, in minutes.
    pub available_duration_minutes: u32,
    /// Time-window availability rules; empty means always bookable.
    pub schedule: Vec<AvailabilityRule>,
    /// How the slot was listed, with listing-specific fields.
    pub kind: SlotKind,
    /// The user who created the slot.
    pub created_by: UserId,
    /// When the slot was created.
    pub created_at: DateTime<Utc>,
}

impl Slot {
    /// Check if the slot can accept a new booking.
    pub fn is_bookable(&self) -> bool {
        self.status.is_bookable()
    }
}

/// Either a reference to an existing location or the data to create one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationRef {
    /// Use a location already on record.
    Existing {
        /// The location to attach.
        location_id: LocationId,
    },
    /// Create a new location as part of the slot operation.
    New {
        /// Location name.
        name: String,
        /// Street address.
        address: String,
    },
}

/// Data required to create a new slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlot {
    /// Display label for the slot.
    pub slot_number: String,
    /// Where the slot is.
    pub location: LocationRef,
    /// Booking duration ceiling in minutes.
    pub available_duration_minutes: u32,
    /// Availability rules; may be empty.
    pub schedule: Vec<AvailabilityRule>,
    /// Present when a private owner lists the slot.
    pub owner_name: Option<String>,
    /// The creating user.
    pub created_by: UserId,
}

/// Partial update for an existing slot. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSlot {
    /// New display label.
    pub slot_number: Option<String>,
    /// New location.
    pub location: Option<LocationRef>,
    /// New booking duration ceiling in minutes.
    pub available_duration_minutes: Option<u32>,
    /// Replacement availability rules.
    pub schedule: Option<Vec<AvailabilityRule>>,
}

/// Data required for a manager to submit a tenant slot for approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenantSlot {
    /// Display label for the slot.
    pub slot_number: String,
    /// Where the slot is.
    pub location: LocationRef,
    /// Booking duration ceiling in minutes.
    pub available_duration_minutes: u32,
    /// Availability rules; may be empty.
    pub schedule: Vec<AvailabilityRule>,
    /// The submitting manager.
    pub manager_id: ManagerId,
    /// The tenant the slot is managed for.
    pub tenant_name: String,
    /// Contact details for the tenant.
    pub tenant_contact: String,
    /// The user account the manager acts under.
    pub created_by: UserId,
}
