//! Security alert entities.

use chrono::{DateTime, Utc};
use parkhub_core::types::id::{AlertId, SlotId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a security alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Informational only.
    Info,
    /// Needs attention soon.
    Warning,
    /// Needs attention now.
    Critical,
}

impl AlertSeverity {
    /// Return the severity as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An incident raised by the security desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAlert {
    /// Unique alert identifier.
    pub id: AlertId,
    /// The slot the alert concerns, if it concerns one.
    pub slot_id: Option<SlotId>,
    /// Alert text.
    pub message: String,
    /// Severity level.
    pub severity: AlertSeverity,
    /// The security user who raised the alert.
    pub raised_by: UserId,
    /// When the alert was raised.
    pub raised_at: DateTime<Utc>,
}

/// Data required to raise a security alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiseAlert {
    /// The slot the alert concerns, if it concerns one.
    pub slot_id: Option<SlotId>,
    /// Alert text.
    pub message: String,
    /// Severity level.
    pub severity: AlertSeverity,
    /// The security user raising the alert.
    pub raised_by: UserId,
}
