//! Notification entity model.

use chrono::{DateTime, Utc};
use parkhub_core::types::id::{ManagerId, NotificationId, UserId};
use serde::{Deserialize, Serialize};

use crate::user::UserRole;

/// Who an inbox notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "audience", rename_all = "snake_case")]
pub enum Audience {
    /// A single user.
    User {
        /// The target user.
        user_id: UserId,
    },
    /// A single manager.
    Manager {
        /// The target manager.
        manager_id: ManagerId,
    },
    /// Everyone holding a role.
    Role {
        /// The target role.
        role: UserRole,
    },
}

impl Audience {
    /// The raw id carried on the wire when a notification event fires.
    ///
    /// Role-addressed notifications stay inbox-only and have no wire id.
    pub fn bus_target_id(&self) -> Option<i64> {
        match self {
            Self::User { user_id } => Some(user_id.value()),
            Self::Manager { manager_id } => Some(manager_id.value()),
            Self::Role { .. } => None,
        }
    }
}

/// An inbox message persisted for later retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Who the message is addressed to.
    pub audience: Audience,
    /// Human-readable message text.
    pub message: String,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}
