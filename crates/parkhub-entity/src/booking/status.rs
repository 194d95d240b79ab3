//! Booking status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Reserved, vehicle not yet arrived.
    Upcoming,
    /// Vehicle is parked in the slot.
    Active,
    /// Cancelled by the user before completion.
    Cancelled,
    /// Vehicle left; the booking ran its course.
    Completed,
}

impl BookingStatus {
    /// Check if the booking still holds its slot.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Upcoming | Self::Active)
    }

    /// Check if the booking is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
