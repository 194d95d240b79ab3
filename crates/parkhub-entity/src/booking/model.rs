//! Booking entity model.

use chrono::{DateTime, Utc};
use parkhub_core::types::id::{BookingId, SlotId, UserId};
use serde::{Deserialize, Serialize};

use super::status::BookingStatus;

/// A reservation of one slot by one user for a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// The booked slot.
    pub slot_id: SlotId,
    /// The booking user.
    pub user_id: UserId,
    /// Current booking status.
    pub status: BookingStatus,
    /// Fine applied on cancellation; 0 until then.
    pub fine_amount: f64,
    /// Booking window start.
    pub start_time: DateTime<Utc>,
    /// Booking window end.
    pub end_time: DateTime<Utc>,
    /// Reserved parking duration in minutes.
    pub parking_duration_minutes: u32,
    /// When the booking was placed.
    pub booked_at: DateTime<Utc>,
    /// Display name of the user, captured at creation.
    pub user_name: String,
    /// Slot display label, kept in sync with slot edits.
    pub slot_number: String,
    /// Location display string, kept in sync with slot edits.
    pub location: String,
}

impl Booking {
    /// Check if the booking still holds its slot.
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }
}

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The slot to book.
    pub slot_id: SlotId,
    /// The booking user.
    pub user_id: UserId,
    /// Display name of the user, denormalized onto the booking.
    pub user_name: String,
    /// Booking window start.
    pub start_time: DateTime<Utc>,
    /// Booking window end.
    pub end_time: DateTime<Utc>,
    /// Requested parking duration in minutes.
    pub parking_duration_minutes: u32,
}
