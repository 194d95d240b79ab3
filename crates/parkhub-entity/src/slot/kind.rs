//! Slot listing kind.

use parkhub_core::types::id::ManagerId;
use serde::{Deserialize, Serialize};

/// How a slot was listed, with the fields specific to that listing path.
///
/// A plain slot carries no extra data. An owner-listed slot records who
/// listed it. A tenant-managed slot is created by a manager on behalf of
/// a third-party tenant and starts life pending approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotKind {
    /// An ordinary slot created by an admin.
    Plain,
    /// A slot listed by a private owner.
    OwnerListed {
        /// Display name of the listing owner.
        owner_name: String,
    },
    /// A slot a manager runs for a tenant.
    TenantManaged {
        /// The responsible manager.
        manager_id: ManagerId,
        /// Display name of the manager, denormalized for rendering.
        manager_name: String,
        /// The tenant the slot is managed for.
        tenant_name: String,
        /// Contact details for the tenant.
        tenant_contact: String,
    },
}

impl SlotKind {
    /// Check if this slot is managed on behalf of a tenant.
    pub fn is_tenant_managed(&self) -> bool {
        matches!(self, Self::TenantManaged { .. })
    }

    /// The responsible manager, if any.
    pub fn manager_id(&self) -> Option<ManagerId> {
        match self {
            Self::TenantManaged { manager_id, .. } => Some(*manager_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_id_only_on_tenant_managed() {
        assert_eq!(SlotKind::Plain.manager_id(), None);
        let kind = SlotKind::TenantManaged {
            manager_id: ManagerId::new(3),
            manager_name: "Priya Sharma".into(),
            tenant_name: "Acme Corp".into(),
            tenant_contact: "acme@example.com".into(),
        };
        assert_eq!(kind.manager_id(), Some(ManagerId::new(3)));
        assert!(kind.is_tenant_managed());
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_value(SlotKind::OwnerListed {
            owner_name: "Sam".into(),
        })
        .unwrap();
        assert_eq!(json["kind"], "owner_listed");
        assert_eq!(json["owner_name"], "Sam");
    }
}
