//! Union of all bus event types.
//!
//! Payloads carry denormalized primitives rather than entity structs so a
//! subscriber can update its view without a follow-up fetch. Serialized
//! names and field names are frozen; see [`super::names`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{AlertId, BookingId, ManagerId, SlotId, UserId};

use super::names;

/// Every event that can travel over the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum BusEvent {
    /// Simulated channel came up.
    Connect,
    /// Simulated channel went down.
    Disconnect,
    /// A new slot was created.
    SlotCreated {
        /// The slot ID.
        slot_id: SlotId,
        /// Display label of the slot.
        slot_number: String,
        /// Booking duration ceiling in minutes.
        available_duration_minutes: u32,
        /// Denormalized location display string.
        location: String,
    },
    /// A slot was edited.
    SlotUpdated {
        /// The slot ID.
        slot_id: SlotId,
        /// Display label of the slot (post-edit).
        slot_number: String,
        /// Booking duration ceiling in minutes (post-edit).
        available_duration_minutes: u32,
        /// Denormalized location display string (post-edit).
        location: String,
    },
    /// A slot was removed.
    SlotDeleted {
        /// The slot ID.
        slot_id: SlotId,
        /// Display label the slot had.
        slot_number: String,
    },
    /// A manager submitted a slot for approval.
    TenantSlotCreated {
        /// The slot ID.
        slot_id: SlotId,
        /// Display label of the slot.
        slot_number: String,
        /// The submitting manager.
        manager_id: ManagerId,
        /// The tenant the slot is managed for.
        tenant_name: String,
        /// Slot status at submission (always `"pending"`).
        status: String,
    },
    /// An admin approved a pending slot.
    SlotApproved {
        /// The slot ID.
        slot_id: SlotId,
    },
    /// An admin rejected a pending slot.
    SlotRejected {
        /// The slot ID.
        slot_id: SlotId,
        /// Optional rejection reason.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// A booking was created (structured payload).
    NewBooking {
        /// The booking ID.
        booking_id: BookingId,
        /// The booking user.
        user_id: UserId,
        /// The booked slot.
        slot_id: SlotId,
        /// Reserved parking duration in minutes.
        parking_duration_minutes: u32,
        /// Display name of the booking user.
        user_name: String,
        /// Display label of the slot.
        slot_number: String,
        /// Denormalized location display string.
        location: String,
    },
    /// A booking was created (legacy duplicate carrying the full record).
    #[serde(rename = "newBooking")]
    NewBookingLegacy {
        /// The booking ID.
        id: BookingId,
        /// The booked slot.
        slot_id: SlotId,
        /// The booking user.
        user_id: UserId,
        /// Booking status (always `"upcoming"` at creation).
        status: String,
        /// Fine amount (always 0 at creation).
        fine_amount: f64,
        /// Booking window start.
        start_time: DateTime<Utc>,
        /// Booking window end.
        end_time: DateTime<Utc>,
        /// Reserved parking duration in minutes.
        parking_duration_minutes: u32,
        /// When the booking was placed.
        booked_at: DateTime<Utc>,
        /// Display name of the booking user.
        user_name: String,
        /// Display label of the slot.
        slot_number: String,
        /// Denormalized location display string.
        location: String,
    },
    /// A booking was cancelled.
    #[serde(rename = "bookingCancelled")]
    BookingCancelled {
        /// The cancelled booking.
        #[serde(rename = "bookingId")]
        booking_id: BookingId,
        /// Display name of the booking user.
        user_name: String,
        /// Display label of the slot.
        slot_number: String,
        /// Fine applied on cancellation.
        fine: f64,
    },
    /// An inbox message was queued for a user or manager.
    Notification {
        /// Raw target id (users and managers share the wire field).
        #[serde(rename = "userId")]
        user_id: i64,
        /// Human-readable message text.
        message: String,
        /// When the message was created.
        created_at: DateTime<Utc>,
    },
    /// Security logged a vehicle entering a slot.
    VehicleEntry {
        /// The slot ID.
        slot_id: SlotId,
        /// Display label of the slot.
        slot_number: String,
        /// Vehicle registration plate.
        plate: String,
        /// The booking activated by this entry, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        booking_id: Option<BookingId>,
    },
    /// Security logged a vehicle leaving a slot.
    VehicleExit {
        /// The slot ID.
        slot_id: SlotId,
        /// Display label of the slot.
        slot_number: String,
        /// Vehicle registration plate.
        plate: String,
        /// The booking completed by this exit, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        booking_id: Option<BookingId>,
    },
    /// Security raised an alert.
    SecurityAlert {
        /// The alert ID.
        alert_id: AlertId,
        /// The slot the alert concerns, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slot_id: Option<SlotId>,
        /// Alert text.
        message: String,
        /// Alert severity (`"info"`, `"warning"`, `"critical"`).
        severity: String,
    },
}

impl BusEvent {
    /// The routing name subscribers register against.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connect => names::CONNECT,
            Self::Disconnect => names::DISCONNECT,
            Self::SlotCreated { .. } => names::SLOT_CREATED,
            Self::SlotUpdated { .. } => names::SLOT_UPDATED,
            Self::SlotDeleted { .. } => names::SLOT_DELETED,
            Self::TenantSlotCreated { .. } => names::TENANT_SLOT_CREATED,
            Self::SlotApproved { .. } => names::SLOT_APPROVED,
            Self::SlotRejected { .. } => names::SLOT_REJECTED,
            Self::NewBooking { .. } => names::NEW_BOOKING,
            Self::NewBookingLegacy { .. } => names::NEW_BOOKING_LEGACY,
            Self::BookingCancelled { .. } => names::BOOKING_CANCELLED,
            Self::Notification { .. } => names::NOTIFICATION,
            Self::VehicleEntry { .. } => names::VEHICLE_ENTRY,
            Self::VehicleExit { .. } => names::VEHICLE_EXIT,
            Self::SecurityAlert { .. } => names::SECURITY_ALERT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_json(event: &BusEvent) -> serde_json::Value {
        serde_json::to_value(event).expect("serialize")
    }

    #[test]
    fn test_serialized_tag_matches_name() {
        let events = [
            BusEvent::Connect,
            BusEvent::SlotApproved {
                slot_id: SlotId::new(1),
            },
            BusEvent::BookingCancelled {
                booking_id: BookingId::new(2),
                user_name: "Dana".into(),
                slot_number: "A-1".into(),
                fine: 5.0,
            },
        ];
        for event in &events {
            assert_eq!(to_json(event)["event"], event.name());
        }
    }

    #[test]
    fn test_legacy_booking_event_keeps_camel_case_name() {
        let event = BusEvent::NewBookingLegacy {
            id: BookingId::new(9),
            slot_id: SlotId::new(3),
            user_id: UserId::new(4),
            status: "upcoming".into(),
            fine_amount: 0.0,
            start_time: Utc::now(),
            end_time: Utc::now(),
            parking_duration_minutes: 60,
            booked_at: Utc::now(),
            user_name: "Dana".into(),
            slot_number: "A-1".into(),
            location: "Central Garage, 1 Main St".into(),
        };
        let json = to_json(&event);
        assert_eq!(json["event"], "newBooking");
        assert_eq!(json["data"]["fine_amount"], 0.0);
        assert_eq!(json["data"]["parking_duration_minutes"], 60);
    }

    #[test]
    fn test_cancellation_payload_uses_legacy_field_name() {
        let event = BusEvent::BookingCancelled {
            booking_id: BookingId::new(11),
            user_name: "Dana".into(),
            slot_number: "A-1".into(),
            fine: 5.0,
        };
        let json = to_json(&event);
        assert_eq!(json["data"]["bookingId"], 11);
        assert!(json["data"].get("booking_id").is_none());
        assert_eq!(json["data"]["fine"], 5.0);
    }

    #[test]
    fn test_notification_payload_field_names() {
        let event = BusEvent::Notification {
            user_id: 7,
            message: "Your booking was cancelled".into(),
            created_at: Utc::now(),
        };
        let json = to_json(&event);
        assert_eq!(json["data"]["userId"], 7);
        assert!(json["data"]["created_at"].is_string());
    }

    #[test]
    fn test_optional_reason_is_omitted_when_absent() {
        let event = BusEvent::SlotRejected {
            slot_id: SlotId::new(5),
            reason: None,
        };
        let json = to_json(&event);
        assert!(json["data"].get("reason").is_none());

        let event = BusEvent::SlotRejected {
            slot_id: SlotId::new(5),
            reason: Some("duplicate listing".into()),
        };
        let json = to_json(&event);
        assert_eq!(json["data"]["reason"], "duplicate listing");
    }

    #[test]
    fn test_structured_booking_event_fields() {
        let event = BusEvent::NewBooking {
            booking_id: BookingId::new(1),
            user_id: UserId::new(2),
            slot_id: SlotId::new(3),
            parking_duration_minutes: 90,
            user_name: "Dana".into(),
            slot_number: "B-7".into(),
            location: "North Lot, 9 Elm Ave".into(),
        };
        let json = to_json(&event);
        assert_eq!(json["event"], "new_booking");
        for field in [
            "booking_id",
            "user_id",
            "slot_id",
            "parking_duration_minutes",
            "user_name",
            "slot_number",
            "location",
        ] {
            assert!(json["data"].get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_roundtrip() {
        let event = BusEvent::VehicleEntry {
            slot_id: SlotId::new(4),
            slot_number: "C-2".into(),
            plate: "KA-09-XY-1234".into(),
            booking_id: Some(BookingId::new(6)),
        };
        let json = serde_json::to_string(&event).expect("serialize");
        let parsed: BusEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, event);
    }
}
