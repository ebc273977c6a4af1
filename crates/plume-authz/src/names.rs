//! Strongly typed wrappers for the broker's resource hierarchy.
//!
//! # Purpose
//! Wraps string identifiers to reduce accidental mix-ups between tenant,
//! namespace, topic, and subject values, and renders the canonical resource
//! paths the admin surface expects.
//!
//! # Key invariants
//! - Each wrapper preserves the inner string exactly; validation is the
//!   caller's responsibility.
//! - Fully qualified topics render as `persistent://tenant/namespace/topic`.
use serde::{Deserialize, Serialize};

/// Tenant identifier wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantName(String);

impl TenantName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Namespace identifier wrapper (unqualified; pair with a [`TenantName`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceName(String);

impl NamespaceName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Topic name wrapper (unqualified; see [`topic_path`] for the full form).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicName(String);

impl TopicName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity string embedded in a bearer token; the broker's authorization
/// principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject(String);

impl Subject {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the `tenant/namespace` path used by namespace-scoped admin calls.
pub fn namespace_path(tenant: &TenantName, namespace: &NamespaceName) -> String {
    format!("{tenant}/{namespace}")
}

/// Render the fully qualified persistent topic URL.
pub fn topic_path(tenant: &TenantName, namespace: &NamespaceName, topic: &TopicName) -> String {
    format!("persistent://{tenant}/{namespace}/{topic}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_preserve_inner_value() {
        let tenant = TenantName::new("public");
        let namespace = NamespaceName::new("default");
        let topic = TopicName::new("test-topic");
        let subject = Subject::new("client1");

        assert_eq!(tenant.as_str(), "public");
        assert_eq!(namespace.to_string(), "default");
        assert_eq!(topic.as_str(), "test-topic");
        assert_eq!(subject.to_string(), "client1");
    }

    #[test]
    fn path_rendering() {
        let tenant = TenantName::new("public");
        let namespace = NamespaceName::new("default");
        let topic = TopicName::new("test-topic");

        assert_eq!(namespace_path(&tenant, &namespace), "public/default");
        assert_eq!(
            topic_path(&tenant, &namespace, &topic),
            "persistent://public/default/test-topic"
        );
    }
}
