use crate::{AdminError, AdminResult, CreateOutcome, PermissionMap, TenantInfo};
use plume_authz::{AuthAction, NamespaceName, Subject, TenantName, TopicName};
use reqwest::{Response, StatusCode};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the broker admin REST surface. Every call is authenticated
/// with the bearer token supplied at construction; the broker decides what
/// that token's subject is allowed to do.
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl AdminClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> AdminResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/admin/v2/{path}", self.base_url)
    }

    /// Single health probe against the broker. Success means the broker is
    /// serving admin traffic and accepted our credentials.
    pub async fn broker_health(&self) -> AdminResult<()> {
        let response = self
            .http
            .get(self.url("brokers/health"))
            .bearer_auth(&self.token)
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    pub async fn create_tenant(
        &self,
        tenant: &TenantName,
        info: &TenantInfo,
    ) -> AdminResult<CreateOutcome> {
        let response = self
            .http
            .put(self.url(&format!("tenants/{tenant}")))
            .bearer_auth(&self.token)
            .json(info)
            .send()
            .await?;
        create_outcome(response).await
    }

    pub async fn list_tenants(&self) -> AdminResult<Vec<String>> {
        let response = self
            .http
            .get(self.url("tenants"))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    pub async fn create_namespace(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
    ) -> AdminResult<CreateOutcome> {
        let response = self
            .http
            .put(self.url(&format!("namespaces/{tenant}/{namespace}")))
            .bearer_auth(&self.token)
            .send()
            .await?;
        create_outcome(response).await
    }

    pub async fn list_namespaces(&self, tenant: &TenantName) -> AdminResult<Vec<String>> {
        let response = self
            .http
            .get(self.url(&format!("namespaces/{tenant}")))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    pub async fn create_topic(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
        topic: &TopicName,
    ) -> AdminResult<CreateOutcome> {
        let response = self
            .http
            .put(self.url(&format!("persistent/{tenant}/{namespace}/{topic}")))
            .bearer_auth(&self.token)
            .send()
            .await?;
        create_outcome(response).await
    }

    pub async fn list_topics(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
    ) -> AdminResult<Vec<String>> {
        let response = self
            .http
            .get(self.url(&format!("persistent/{tenant}/{namespace}")))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    pub async fn grant_namespace_permission(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
        subject: &Subject,
        actions: &BTreeSet<AuthAction>,
    ) -> AdminResult<()> {
        debug!(%tenant, %namespace, %subject, ?actions, "granting namespace permission");
        let response = self
            .http
            .post(self.url(&format!(
                "namespaces/{tenant}/{namespace}/permissions/{subject}"
            )))
            .bearer_auth(&self.token)
            .json(actions)
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    pub async fn revoke_namespace_permission(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
        subject: &Subject,
    ) -> AdminResult<()> {
        let response = self
            .http
            .delete(self.url(&format!(
                "namespaces/{tenant}/{namespace}/permissions/{subject}"
            )))
            .bearer_auth(&self.token)
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    pub async fn namespace_permissions(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
    ) -> AdminResult<PermissionMap> {
        let response = self
            .http
            .get(self.url(&format!("namespaces/{tenant}/{namespace}/permissions")))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    pub async fn grant_topic_permission(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
        topic: &TopicName,
        subject: &Subject,
        actions: &BTreeSet<AuthAction>,
    ) -> AdminResult<()> {
        debug!(%tenant, %namespace, %topic, %subject, ?actions, "granting topic permission");
        let response = self
            .http
            .post(self.url(&format!(
                "persistent/{tenant}/{namespace}/{topic}/permissions/{subject}"
            )))
            .bearer_auth(&self.token)
            .json(actions)
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    pub async fn revoke_topic_permission(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
        topic: &TopicName,
        subject: &Subject,
    ) -> AdminResult<()> {
        let response = self
            .http
            .delete(self.url(&format!(
                "persistent/{tenant}/{namespace}/{topic}/permissions/{subject}"
            )))
            .bearer_auth(&self.token)
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    pub async fn topic_permissions(
        &self,
        tenant: &TenantName,
        namespace: &NamespaceName,
        topic: &TopicName,
    ) -> AdminResult<PermissionMap> {
        let response = self
            .http
            .get(self.url(&format!(
                "persistent/{tenant}/{namespace}/{topic}/permissions"
            )))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }
}

/// Map non-success statuses to the error taxonomy. The body is carried
/// verbatim; operators see the broker's own message.
async fn expect_success(response: Response) -> AdminResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED => AdminError::Unauthorized(body),
        StatusCode::FORBIDDEN => AdminError::Forbidden(body),
        StatusCode::CONFLICT => AdminError::Conflict(body),
        StatusCode::NOT_FOUND => AdminError::NotFound(body),
        _ => AdminError::Unexpected {
            status: status.as_u16(),
            body,
        },
    })
}

/// Idempotent-create contract: a conflict means the resource is present,
/// which is success for our purposes.
async fn create_outcome(response: Response) -> AdminResult<CreateOutcome> {
    match expect_success(response).await {
        Ok(_) => Ok(CreateOutcome::Created),
        Err(AdminError::Conflict(_)) => Ok(CreateOutcome::AlreadyExists),
        Err(err) => Err(err),
    }
}
