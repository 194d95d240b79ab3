//! Manager entity model.
//!
//! Managers are static reference data: they are seeded at startup and
//! never mutated by the booking flow.

use parkhub_core::types::id::ManagerId;
use serde::{Deserialize, Serialize};

/// A parking manager who can run slots for tenants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    /// Unique manager identifier.
    pub id: ManagerId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}
