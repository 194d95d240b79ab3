//! Location entity model.

use chrono::{DateTime, Utc};
use parkhub_core::types::id::LocationId;
use serde::{Deserialize, Serialize};

/// A parking location (a garage, lot, or street section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique location identifier.
    pub id: LocationId,
    /// Location name shown in pickers and summaries.
    pub name: String,
    /// Street address.
    pub address: String,
    /// When the location was created.
    pub created_at: DateTime<Utc>,
}

impl Location {
    /// The denormalized display string copied onto slots and bookings.
    pub fn display_string(&self) -> String {
        format!("{}, {}", self.name, self.address)
    }
}

/// Data required to create a new location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocation {
    /// Location name.
    pub name: String,
    /// Street address.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string_joins_name_and_address() {
        let location = Location {
            id: LocationId::new(1),
            name: "Central Garage".into(),
            address: "1 Main St".into(),
            created_at: Utc::now(),
        };
        assert_eq!(location.display_string(), "Central Garage, 1 Main St");
    }
}
