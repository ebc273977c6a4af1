//! Fixed permission layout applied once the broker is healthy.
use crate::config::{ProvisionConfig, SUBJECT_ADMIN, SUBJECT_CLIENT1, SUBJECT_CLIENT2};
use crate::ProvisionResult;
use plume_admin::{AdminClient, TenantInfo};
use plume_authz::{AuthAction, Subject};
use std::collections::BTreeSet;
use tracing::info;

const DEFAULT_CLUSTER: &str = "standalone";

/// Action set both clients hold at namespace scope, covering every current
/// and future topic in the namespace unless a topic grant overrides it.
pub fn namespace_actions() -> BTreeSet<AuthAction> {
    [AuthAction::Produce, AuthAction::Consume].into()
}

/// Topic-scope override on the test topic: client1 is the producer side,
/// client2 the consumer side.
pub fn topic_actions(subject: &str) -> BTreeSet<AuthAction> {
    match subject {
        SUBJECT_CLIENT1 => [AuthAction::Produce].into(),
        SUBJECT_CLIENT2 => [AuthAction::Consume].into(),
        _ => BTreeSet::new(),
    }
}

pub struct PermissionProvisioner<'a> {
    admin: &'a AdminClient,
    config: &'a ProvisionConfig,
}

impl<'a> PermissionProvisioner<'a> {
    pub fn new(admin: &'a AdminClient, config: &'a ProvisionConfig) -> Self {
        Self { admin, config }
    }

    /// Apply the fixed sequence: tenant, namespace, namespace grants, topic,
    /// topic grants. Creates tolerate "already exists"; nothing else is
    /// retried or swallowed.
    pub async fn run(&self) -> ProvisionResult<()> {
        let tenant = &self.config.tenant;
        let namespace = &self.config.namespace;
        let topic = &self.config.topic;

        let info = TenantInfo {
            admin_roles: vec![SUBJECT_ADMIN.to_string()],
            allowed_clusters: vec![DEFAULT_CLUSTER.to_string()],
        };
        let outcome = self.admin.create_tenant(tenant, &info).await?;
        info!(%tenant, %outcome, "tenant");

        let outcome = self.admin.create_namespace(tenant, namespace).await?;
        info!(%tenant, %namespace, %outcome, "namespace");

        for subject in [SUBJECT_CLIENT1, SUBJECT_CLIENT2] {
            let subject = Subject::new(subject);
            let actions = namespace_actions();
            self.admin
                .grant_namespace_permission(tenant, namespace, &subject, &actions)
                .await?;
            info!(%subject, ?actions, "namespace grant");
        }

        let outcome = self.admin.create_topic(tenant, namespace, topic).await?;
        info!(%topic, %outcome, "topic");

        for subject in [SUBJECT_CLIENT1, SUBJECT_CLIENT2] {
            let actions = topic_actions(subject);
            let subject = Subject::new(subject);
            self.admin
                .grant_topic_permission(tenant, namespace, topic, &subject, &actions)
                .await?;
            info!(%subject, ?actions, "topic grant");
        }

        Ok(())
    }
}
