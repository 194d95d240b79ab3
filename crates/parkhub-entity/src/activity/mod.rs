//! Security activity domain entities.

pub mod alert;
pub mod vehicle;

pub use alert::{AlertSeverity, RaiseAlert, SecurityAlert};
pub use vehicle::{LogDirection, LogVehicle, VehicleLog};
