//! Idempotent key and token provisioning.
//!
//! Each target file is checked before generation: present files are left
//! untouched and reported as such, so a second run is a no-op. After every
//! write the file must exist and be non-empty; a violation is a distinct
//! fatal error pointing at mount/permission misconfiguration rather than a
//! generation bug.
use crate::config::ProvisionConfig;
use crate::{ProvisionError, ProvisionResult};
use plume_authz::{DEFAULT_KEY_BITS, KeyPair, Subject, TokenIssuer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOutcome {
    Generated,
    AlreadyPresent,
}

impl std::fmt::Display for ArtifactOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactOutcome::Generated => f.write_str("generated"),
            ArtifactOutcome::AlreadyPresent => f.write_str("already present"),
        }
    }
}

/// Per-artifact record of what the provisioner did.
#[derive(Debug, Default)]
pub struct CredentialSummary {
    pub artifacts: Vec<(PathBuf, ArtifactOutcome)>,
}

impl CredentialSummary {
    fn record(&mut self, path: PathBuf, outcome: ArtifactOutcome) {
        info!(path = %path.display(), %outcome, "credential artifact");
        self.artifacts.push((path, outcome));
    }

    pub fn generated_count(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|(_, outcome)| *outcome == ArtifactOutcome::Generated)
            .count()
    }
}

pub struct CredentialProvisioner {
    config: ProvisionConfig,
}

impl CredentialProvisioner {
    pub fn new(config: ProvisionConfig) -> Self {
        Self { config }
    }

    /// Provision the key pair and the three subject tokens. Ordering matters:
    /// tokens are signed with the private key, so the pair is settled first.
    pub fn run(&self) -> ProvisionResult<CredentialSummary> {
        fs::create_dir_all(&self.config.keys_dir)?;
        fs::create_dir_all(&self.config.tokens_dir)?;

        let mut summary = CredentialSummary::default();
        self.ensure_key_pair(&mut summary)?;

        let private_pem = fs::read_to_string(self.config.private_key_path())?;
        let issuer = TokenIssuer::from_private_pem(private_pem.as_bytes())?;
        for subject in ProvisionConfig::subjects() {
            self.ensure_token(&issuer, &subject, &mut summary)?;
        }
        Ok(summary)
    }

    fn ensure_key_pair(&self, summary: &mut CredentialSummary) -> ProvisionResult<()> {
        let private_path = self.config.private_key_path();
        let public_path = self.config.public_key_path();

        if private_path.exists() {
            summary.record(private_path.clone(), ArtifactOutcome::AlreadyPresent);
            if public_path.exists() {
                summary.record(public_path, ArtifactOutcome::AlreadyPresent);
            } else {
                // Public half lost; re-derive it from the surviving private key
                // so existing tokens stay verifiable.
                let pair = KeyPair::from_private_pem(&fs::read_to_string(&private_path)?)?;
                fs::write(&public_path, pair.public_key_pem()?)?;
                postcondition(&public_path)?;
                summary.record(public_path, ArtifactOutcome::Generated);
            }
            return Ok(());
        }

        let pair = KeyPair::generate(DEFAULT_KEY_BITS)?;
        pair.write_pem(&private_path, &public_path)?;
        postcondition(&private_path)?;
        postcondition(&public_path)?;
        summary.record(private_path, ArtifactOutcome::Generated);
        summary.record(public_path, ArtifactOutcome::Generated);
        Ok(())
    }

    fn ensure_token(
        &self,
        issuer: &TokenIssuer,
        subject: &Subject,
        summary: &mut CredentialSummary,
    ) -> ProvisionResult<()> {
        let path = self.config.token_path(subject);
        if path.exists() {
            summary.record(path, ArtifactOutcome::AlreadyPresent);
            return Ok(());
        }
        let token = issuer.mint(subject)?;
        fs::write(&path, format!("{token}\n"))?;
        postcondition(&path)?;
        summary.record(path, ArtifactOutcome::Generated);
        Ok(())
    }
}

fn postcondition(path: &Path) -> ProvisionResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => Ok(()),
        _ => Err(ProvisionError::PostconditionFailed {
            path: path.to_path_buf(),
        }),
    }
}
