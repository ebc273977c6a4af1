use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("admin request unauthorized: {0}")]
    Unauthorized(String),
    #[error("subject not permitted to perform admin operation: {0}")]
    Forbidden(String),
    #[error("resource already exists: {0}")]
    Conflict(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("broker unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected admin response (status {status}): {body}")]
    Unexpected { status: u16, body: String },
}

pub type AdminResult<T> = Result<T, AdminError>;

impl AdminError {
    /// Authentication and authorization failures are never retried; they
    /// require re-provisioning, not patience.
    pub fn is_auth(&self) -> bool {
        matches!(self, AdminError::Unauthorized(_) | AdminError::Forbidden(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_variants() {
        let errors = vec![
            AdminError::Unauthorized("bad token".to_string()),
            AdminError::Forbidden("client1".to_string()),
            AdminError::Conflict("tenant public".to_string()),
            AdminError::NotFound("namespace".to_string()),
            AdminError::Unexpected {
                status: 502,
                body: "bad gateway".to_string(),
            },
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn auth_classification() {
        assert!(AdminError::Unauthorized(String::new()).is_auth());
        assert!(AdminError::Forbidden(String::new()).is_auth());
        assert!(!AdminError::Conflict(String::new()).is_auth());
        assert!(
            !AdminError::Unexpected {
                status: 500,
                body: String::new()
            }
            .is_auth()
        );
    }
}
