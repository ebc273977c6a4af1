use anyhow::{Context, Result};
use plume_authz::{Subject, load_token};
use plume_provision::ProvisionConfig;
use pulsar::{Authentication, Pulsar, TokioExecutor};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod auth_check;
pub mod consume;
pub mod produce;
pub mod setup;
pub mod verify;

/// Build an authenticated messaging client for one subject's token file.
pub(crate) async fn messaging_client(
    config: &ProvisionConfig,
    subject: &Subject,
) -> Result<Pulsar<TokioExecutor>> {
    let token_file = config.token_path(subject);
    let token = load_token(&token_file)
        .with_context(|| format!("read {}; run `plume setup` first", token_file.display()))?;

    println!(
        "connecting to {} as `{subject}` (token from {})",
        config.service_url,
        token_file.display()
    );

    Pulsar::builder(config.service_url.as_str(), TokioExecutor)
        .with_auth(Authentication {
            name: "token".to_string(),
            data: token.into_bytes(),
        })
        .build()
        .await
        .with_context(|| {
            format!(
                "connect to broker at {}; is the stack up (`plume setup`) and \
                 are permissions applied (`plume verify`)?",
                config.service_url
            )
        })
}

pub(crate) fn epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
