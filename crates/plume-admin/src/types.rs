use plume_authz::AuthAction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Result of an idempotent create call. Only genuine failures surface as
/// errors; repeating a create is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

impl CreateOutcome {
    pub fn already_existed(self) -> bool {
        matches!(self, CreateOutcome::AlreadyExists)
    }
}

impl std::fmt::Display for CreateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateOutcome::Created => f.write_str("created"),
            CreateOutcome::AlreadyExists => f.write_str("already exists"),
        }
    }
}

/// Tenant creation payload for the admin surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantInfo {
    pub admin_roles: Vec<String>,
    pub allowed_clusters: Vec<String>,
}

/// Permission state at one scope: subject → granted action set. Ordered maps
/// keep rendered output stable across queries.
pub type PermissionMap = BTreeMap<String, BTreeSet<AuthAction>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_rendering() {
        assert_eq!(CreateOutcome::Created.to_string(), "created");
        assert_eq!(CreateOutcome::AlreadyExists.to_string(), "already exists");
        assert!(CreateOutcome::AlreadyExists.already_existed());
        assert!(!CreateOutcome::Created.already_existed());
    }

    #[test]
    fn tenant_info_serializes_camel_case() {
        let info = TenantInfo {
            admin_roles: vec!["admin".to_string()],
            allowed_clusters: vec!["standalone".to_string()],
        };
        let json = serde_json::to_value(&info).expect("serialize");
        assert_eq!(json["adminRoles"][0], "admin");
        assert_eq!(json["allowedClusters"][0], "standalone");
    }

    #[test]
    fn permission_map_deserializes_action_sets() {
        let raw = r#"{"client1":["produce","consume"],"client2":["consume"]}"#;
        let map: PermissionMap = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(map["client1"].len(), 2);
        assert!(map["client2"].contains(&AuthAction::Consume));
        assert!(!map["client2"].contains(&AuthAction::Produce));
    }
}
