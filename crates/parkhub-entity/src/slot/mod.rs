//! Slot domain entities.

pub mod kind;
pub mod model;
pub mod schedule;
pub mod status;

pub use kind::SlotKind;
pub use model::{CreateSlot, CreateTenantSlot, LocationRef, Slot, UpdateSlot};
pub use schedule::{AvailabilityRule, RecurrencePattern};
pub use status::SlotStatus;
