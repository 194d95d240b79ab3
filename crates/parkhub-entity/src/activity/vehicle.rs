//! Vehicle activity log entities.

use chrono::{DateTime, Utc};
use parkhub_core::types::id::{BookingId, SlotId, UserId, VehicleLogId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a vehicle entered or left a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDirection {
    /// Vehicle drove into the slot.
    Entry,
    /// Vehicle drove out of the slot.
    Exit,
}

impl LogDirection {
    /// Return the direction as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for LogDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One vehicle movement recorded by security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleLog {
    /// Unique log identifier.
    pub id: VehicleLogId,
    /// The slot the vehicle used.
    pub slot_id: SlotId,
    /// Slot display label, denormalized for rendering.
    pub slot_number: String,
    /// Vehicle registration plate.
    pub plate: String,
    /// Entry or exit.
    pub direction: LogDirection,
    /// The live booking matched at log time, if any.
    pub booking_id: Option<BookingId>,
    /// The security user who recorded the movement.
    pub logged_by: UserId,
    /// When the movement was recorded.
    pub logged_at: DateTime<Utc>,
}

/// Data required to record a vehicle movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogVehicle {
    /// The slot the vehicle used.
    pub slot_id: SlotId,
    /// Vehicle registration plate.
    pub plate: String,
    /// Entry or exit.
    pub direction: LogDirection,
    /// The security user recording the movement.
    pub logged_by: UserId,
}
