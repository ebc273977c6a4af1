use anyhow::{Context, Result};
use plume_provision::{DockerCompose, ProvisionConfig, run_setup};

pub async fn run(config: &ProvisionConfig) -> Result<()> {
    println!("== plume setup ==");

    let compose = DockerCompose::new(config.compose_file.clone());
    let summary = run_setup(config, &compose)
        .await
        .context("environment setup failed")?;

    for (path, outcome) in &summary.credentials.artifacts {
        println!("credential {}: {outcome}", path.display());
    }
    println!(
        "broker ready after {} health-probe attempt(s)",
        summary.ready_after_attempts
    );
    println!(
        "permissions applied for tenant `{}`, namespace `{}`, topic `{}`",
        config.tenant, config.namespace, config.topic
    );
    println!("setup complete; try `plume verify`, then `plume produce` / `plume consume`");
    Ok(())
}
