//! Read-only environment diagnostic. Re-checks credential files, broker
//! health (single attempt), and the current permission state. Mutates
//! nothing; safe to run at any time, repeatedly.
use crate::ProvisionResult;
use crate::config::ProvisionConfig;
use crate::report::CheckReport;
use plume_admin::AdminClient;
use plume_authz::{namespace_path, public_key_pem_is_valid, topic_path};
use std::fs;
use std::path::Path;
use tracing::debug;

pub struct Verifier<'a> {
    // Absent when the admin token itself is missing; file checks still run.
    admin: Option<&'a AdminClient>,
    config: &'a ProvisionConfig,
}

impl<'a> Verifier<'a> {
    pub fn new(admin: Option<&'a AdminClient>, config: &'a ProvisionConfig) -> Self {
        Self { admin, config }
    }

    pub async fn run(&self) -> ProvisionResult<CheckReport> {
        let mut report = CheckReport::default();

        check_file(&mut report, "private key", &self.config.private_key_path());
        self.check_public_key(&mut report);
        for subject in ProvisionConfig::subjects() {
            check_file(
                &mut report,
                &format!("{subject} token"),
                &self.config.token_path(&subject),
            );
        }

        let Some(admin) = self.admin else {
            report.fail(
                "broker health",
                "admin token missing; run `plume setup` first",
            );
            return Ok(report);
        };

        // Single attempt; the bounded retry loop belongs to setup, not here.
        match admin.broker_health().await {
            Ok(()) => report.pass("broker health", "broker answered the health probe"),
            Err(err) => {
                report.fail(
                    "broker health",
                    format!("{err}; inspect `docker compose ps` and `docker compose logs broker`"),
                );
                return Ok(report);
            }
        }

        let scope = namespace_path(&self.config.tenant, &self.config.namespace);
        match admin
            .namespace_permissions(&self.config.tenant, &self.config.namespace)
            .await
        {
            Ok(map) => {
                debug!(%scope, ?map, "namespace permissions");
                report.pass(
                    "namespace permissions",
                    format!(
                        "{scope}: {}",
                        serde_json::to_string(&map).unwrap_or_else(|_| format!("{map:?}"))
                    ),
                );
            }
            Err(err) => report.fail("namespace permissions", err.to_string()),
        }

        let scope = topic_path(&self.config.tenant, &self.config.namespace, &self.config.topic);
        match admin
            .topic_permissions(&self.config.tenant, &self.config.namespace, &self.config.topic)
            .await
        {
            Ok(map) => {
                debug!(%scope, ?map, "topic permissions");
                report.pass(
                    "topic permissions",
                    format!(
                        "{scope}: {}",
                        serde_json::to_string(&map).unwrap_or_else(|_| format!("{map:?}"))
                    ),
                );
            }
            Err(err) => report.fail("topic permissions", err.to_string()),
        }

        Ok(report)
    }

    // The public key gets a deeper check than bare existence: the broker will
    // reject every token if the file is present but not a valid key.
    fn check_public_key(&self, report: &mut CheckReport) {
        let path = self.config.public_key_path();
        match fs::read_to_string(&path) {
            Ok(pem) if public_key_pem_is_valid(&pem) => {
                report.pass("public key", path.display().to_string());
            }
            Ok(_) => report.fail(
                "public key",
                format!(
                    "{} is not a valid RSA public key; run `plume setup`",
                    path.display()
                ),
            ),
            Err(_) => report.fail(
                "public key",
                format!("{} missing or unreadable; run `plume setup`", path.display()),
            ),
        }
    }
}

fn check_file(report: &mut CheckReport, name: &str, path: &Path) {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => report.pass(name, path.display().to_string()),
        _ => report.fail(
            name,
            format!("{} missing or empty; run `plume setup`", path.display()),
        ),
    }
}
