//! # parkhub-store
//!
//! The in-memory domain store standing in for a real backend. All
//! collections live behind a single async lock; every operation resolves
//! after a simulated network latency; every mutation stages the bus
//! events it produced into an outbox for a separate pump to publish.

pub mod ops;
pub mod seed;
pub mod store;

pub use store::ParkingStore;
