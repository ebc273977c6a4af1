use plume_admin::AdminError;
use plume_authz::AuthzError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("container runtime unavailable: {0}")]
    EnvironmentMissing(String),
    #[error("compose invocation failed: {0}")]
    ComposeFailed(String),
    #[error(
        "broker failed its health check after {attempts} attempts; \
         inspect `docker compose ps` and `docker compose logs broker`"
    )]
    BrokerUnavailable { attempts: u32 },
    #[error(
        "{path}: generation reported success but the file is missing or empty; \
         check volume mounts and directory permissions"
    )]
    PostconditionFailed { path: PathBuf },
    #[error("admin authentication rejected: {0}; re-run `plume setup` to regenerate credentials")]
    AdminAuth(String),
    #[error("credential material error: {0}")]
    Authz(#[from] AuthzError),
    #[error("admin call failed: {0}")]
    Admin(AdminError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;

impl From<AdminError> for ProvisionError {
    // Auth failures get their own variant so the remediation hint reaches
    // the operator; everything else passes through.
    fn from(err: AdminError) -> Self {
        if err.is_auth() {
            ProvisionError::AdminAuth(err.to_string())
        } else {
            ProvisionError::Admin(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_error_names_both_diagnostics() {
        let err = ProvisionError::BrokerUnavailable { attempts: 30 };
        let rendered = err.to_string();
        assert!(rendered.contains("docker compose ps"));
        assert!(rendered.contains("docker compose logs broker"));
        assert!(rendered.contains("30"));
    }

    #[test]
    fn postcondition_error_names_the_path() {
        let err = ProvisionError::PostconditionFailed {
            path: PathBuf::from("keys/private.key"),
        };
        assert!(err.to_string().contains("keys/private.key"));
        assert!(err.to_string().contains("volume mounts"));
    }

    #[test]
    fn auth_errors_convert_to_remediation_variant() {
        let err: ProvisionError = AdminError::Unauthorized("bad token".to_string()).into();
        assert!(matches!(err, ProvisionError::AdminAuth(_)));
        assert!(err.to_string().contains("plume setup"));

        let err: ProvisionError = AdminError::Conflict("tenant".to_string()).into();
        assert!(matches!(err, ProvisionError::Admin(_)));
    }
}
