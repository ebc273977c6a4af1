use anyhow::{Result, bail};
use plume_admin::AdminClient;
use plume_authz::load_token;
use plume_provision::{ProvisionConfig, Verifier};

pub async fn run(config: &ProvisionConfig) -> Result<()> {
    println!("== plume verify ==");

    // A missing admin token is itself a finding, not an abort: the file
    // checks still run and the report says what to do.
    let admin = match load_token(&config.token_path(&ProvisionConfig::admin_subject())) {
        Ok(token) => Some(AdminClient::new(&config.admin_url, token)?),
        Err(_) => None,
    };

    let report = Verifier::new(admin.as_ref(), config).run().await?;
    print!("{}", report.render());

    if !report.all_passed() {
        bail!("one or more checks failed");
    }
    println!("all checks passed");
    Ok(())
}
