//! Domain events emitted by ParkHub store operations.
//!
//! Store mutations stage events in an outbox; the event pump replays them
//! onto the bus where dashboard surfaces consume them. Event names and
//! payload field names are a stable contract shared by every subscriber;
//! renaming one breaks all of them.

pub mod catalog;
pub mod names;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use catalog::BusEvent;

/// Wrapper for a staged event with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event was staged by the originating operation.
    pub staged_at: DateTime<Utc>,
    /// The event payload.
    pub event: BusEvent,
}

impl EventEnvelope {
    /// Wrap a bus event in a fresh envelope.
    pub fn new(event: BusEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            staged_at: Utc::now(),
            event,
        }
    }
}
