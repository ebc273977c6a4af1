//! Bootstrap workflow for a JWT-secured local broker.
//!
//! # Purpose
//! Implements the one-shot environment setup: provision signing keys and
//! per-subject bearer tokens, launch the broker stack, wait for it to come
//! healthy under a bounded retry budget, and apply the fixed permission
//! layout. A read-only verifier re-checks the same state without mutating
//! anything.
//!
//! # Key invariants
//! - Every step is idempotent: a second run generates nothing and treats
//!   "already exists" as success.
//! - Permission provisioning never runs against a broker that has not
//!   passed the health probe.
//! - Key and token files are written once and never overwritten.

mod compose;
mod config;
mod credentials;
mod errors;
mod launcher;
mod permissions;
mod report;
mod verifier;
mod workflow;

pub use compose::{ComposeRuntime, DockerCompose};
pub use config::{
    ProvisionConfig, RetryPolicy, SUBJECT_ADMIN, SUBJECT_CLIENT1, SUBJECT_CLIENT2,
};
pub use credentials::{ArtifactOutcome, CredentialProvisioner, CredentialSummary};
pub use errors::{ProvisionError, ProvisionResult};
pub use launcher::{ClusterLauncher, LaunchState};
pub use permissions::{PermissionProvisioner, namespace_actions, topic_actions};
pub use report::{Check, CheckReport, CheckStatus};
pub use verifier::Verifier;
pub use workflow::{SetupSummary, run_setup};
