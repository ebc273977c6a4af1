//! One-shot environment setup: credentials, launch, permissions.
use crate::config::ProvisionConfig;
use crate::credentials::{CredentialProvisioner, CredentialSummary};
use crate::launcher::ClusterLauncher;
use crate::permissions::PermissionProvisioner;
use crate::{ComposeRuntime, ProvisionResult};
use plume_admin::AdminClient;
use plume_authz::load_token;
use tracing::info;

#[derive(Debug)]
pub struct SetupSummary {
    pub credentials: CredentialSummary,
    /// Health-probe attempts spent before the broker came up.
    pub ready_after_attempts: u32,
}

/// Run the full workflow in its fixed order. The admin token is loaded from
/// disk after credential provisioning and before any broker contact, so the
/// health probe never runs without it.
pub async fn run_setup(
    config: &ProvisionConfig,
    compose: &dyn ComposeRuntime,
) -> ProvisionResult<SetupSummary> {
    let credentials = CredentialProvisioner::new(config.clone()).run()?;
    info!(
        generated = credentials.generated_count(),
        total = credentials.artifacts.len(),
        "credentials settled"
    );

    let admin_token = load_token(&config.token_path(&ProvisionConfig::admin_subject()))?;
    let admin = AdminClient::new(&config.admin_url, admin_token)?;

    let launcher = ClusterLauncher::new(&admin, compose, config.ready);
    let ready_after_attempts = launcher.launch().await?;

    PermissionProvisioner::new(&admin, config).run().await?;
    info!("permission layout applied");

    Ok(SetupSummary {
        credentials,
        ready_after_attempts,
    })
}
