//! Typed async client for the broker's admin REST surface.
//!
//! # Purpose
//! Replaces shelling out to the broker's admin CLI with structured calls:
//! health probing, idempotent tenant/namespace/topic creation, and
//! permission grant/revoke/listing at namespace and topic scope.
//!
//! # How it fits
//! The provisioning workflow drives this client with the admin token; the
//! verifier reuses the read-only subset. Failure modes are typed error
//! values rather than parsed process exit codes, and "already exists" is a
//! first-class outcome rather than an error.

mod client;
mod errors;
mod types;

pub use client::AdminClient;
pub use errors::{AdminError, AdminResult};
pub use types::{CreateOutcome, PermissionMap, TenantInfo};
