//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a ParkHub account can hold.
///
/// Roles double as notification audiences: a notification addressed to a
/// role lands in the inbox of every account holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Runs the whole facility: manages slots, locations, approvals.
    Admin,
    /// Runs tenant slots and submits them for approval.
    Manager,
    /// Books slots.
    User,
    /// Logs vehicle activity and raises alerts.
    Security,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::User => "user",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = parkhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "user" => Ok(Self::User),
            "security" => Ok(Self::Security),
            _ => Err(parkhub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, manager, user, security"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("SECURITY".parse::<UserRole>().unwrap(), UserRole::Security);
        assert!("janitor".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for role in [
            UserRole::Admin,
            UserRole::Manager,
            UserRole::User,
            UserRole::Security,
        ] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
    }
}
