//! Store operations, grouped by domain.
//!
//! Each module extends [`crate::ParkingStore`] with the operations for
//! one entity family.

mod activity;
mod approvals;
mod bookings;
mod locations;
mod managers;
mod notifications;
mod slots;

pub use bookings::DEFAULT_CANCELLATION_FINE;
