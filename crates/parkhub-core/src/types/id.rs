//! Newtype wrappers around `i64` for all domain entity identifiers.
//!
//! The store assigns ids monotonically starting at 1; using distinct types
//! prevents accidentally passing a `SlotId` where a `BookingId` is
//! expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identifier from a raw value.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Return the inner value.
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a parking location.
    LocationId
);

define_id!(
    /// Unique identifier for a parking slot.
    SlotId
);

define_id!(
    /// Unique identifier for a booking.
    BookingId
);

define_id!(
    /// Unique identifier for a notification.
    NotificationId
);

define_id!(
    /// Unique identifier for a manager.
    ManagerId
);

define_id!(
    /// Unique identifier for a user.
    UserId
);

define_id!(
    /// Unique identifier for a vehicle activity log entry.
    VehicleLogId
);

define_id!(
    /// Unique identifier for a security alert.
    AlertId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_display() {
        assert_eq!(SlotId::new(42).to_string(), "42");
    }

    #[test]
    fn test_booking_id_from_str() {
        let id: BookingId = "7".parse().expect("should parse");
        assert_eq!(id.value(), 7);
        assert!("not-a-number".parse::<BookingId>().is_err());
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Compile-time property; the conversions go through i64 explicitly.
        let slot = SlotId::new(1);
        let booking = BookingId::from(i64::from(slot));
        assert_eq!(booking.value(), 1);
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = UserId::new(5);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "5");
        let parsed: UserId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
