use anyhow::{Context, Result, bail};
use plume_admin::AdminClient;
use plume_authz::{TokenVerifier, load_token};
use plume_provision::ProvisionConfig;
use std::fs;

/// Admin-auth diagnostic: confirm the admin token on disk verifies against
/// the local public key, then confirm the broker accepts it for an
/// admin-only call.
pub async fn run(config: &ProvisionConfig) -> Result<()> {
    println!("== plume auth-check ==");

    let token = load_token(&config.token_path(&ProvisionConfig::admin_subject()))
        .context("admin token missing; run `plume setup` first")?;

    let public_pem = fs::read_to_string(config.public_key_path())
        .context("public key missing; run `plume setup` first")?;
    let verifier = TokenVerifier::from_public_pem(public_pem.as_bytes())?;
    let claims = verifier
        .verify(&token)
        .context("admin token does not verify against keys/public.key")?;
    println!("local verification: PASS (subject `{}`)", claims.sub);

    let admin = AdminClient::new(&config.admin_url, token)?;
    admin
        .broker_health()
        .await
        .context("broker rejected or did not answer the health probe")?;
    println!("broker health: PASS");

    // Listing tenants requires superuser rights; this is the call that
    // separates the admin token from the client tokens.
    match admin.list_tenants().await {
        Ok(tenants) => println!("tenant listing: PASS ({})", tenants.join(", ")),
        Err(err) if err.is_auth() => {
            bail!("tenant listing: FAIL ({err}); the token is not a superuser token")
        }
        Err(err) => return Err(err).context("tenant listing failed"),
    }

    println!("admin credentials look good");
    Ok(())
}
