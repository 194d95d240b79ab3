//! Slot status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a parking slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// Open for booking.
    Available,
    /// Held by a live (upcoming or active) booking.
    Booked,
    /// Awaiting admin approval; cannot be booked.
    Pending,
}

impl SlotStatus {
    /// Check if the slot can accept a new booking.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
