//! Authn/authz primitives shared by the plume provisioning workflow and CLI.
//!
//! # Purpose
//! Centralizes the credential model: broker authorization actions, resource
//! name wrappers, RSA key-pair material, and the bearer-token issuer/verifier
//! pair used to stamp per-subject tokens.
//!
//! # How it fits
//! The provisioner mints tokens and writes key material to disk, while the
//! verifier side is used by the `auth-check` diagnostic to confirm a token on
//! disk still matches the public key the broker trusts.
//!
//! # Key invariants
//! - Tokens are RS256 only and carry exactly one identity claim (`sub`).
//! - Tokens have no expiry; this is a development-only credential model.
//! - The private key signs, the public key verifies; the two are never
//!   interchangeable in the API.

mod action;
mod errors;
mod keys;
mod names;
mod token;

pub use action::AuthAction;
pub use errors::{AuthzError, AuthzResult};
pub use keys::{DEFAULT_KEY_BITS, KeyPair, public_key_pem_is_valid};
pub use names::{NamespaceName, Subject, TenantName, TopicName, namespace_path, topic_path};
pub use token::{TokenClaims, TokenIssuer, TokenVerifier, load_token};
