use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("rsa key generation failed: {0}")]
    KeyGeneration(#[from] rsa::Error),
    #[error("pem encoding error: {0}")]
    Pem(#[from] rsa::pkcs1::Error),
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("token file missing: {0}")]
    TokenFileMissing(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AuthzResult<T> = Result<T, AuthzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_variants() {
        let errors = vec![
            AuthzError::InvalidAction("bad".to_string()),
            AuthzError::TokenFileMissing(PathBuf::from("tokens/admin-token.txt")),
        ];

        for error in errors {
            let rendered = error.to_string();
            assert!(!rendered.is_empty());
        }
    }

    #[test]
    fn missing_token_names_the_path() {
        let err = AuthzError::TokenFileMissing(PathBuf::from("tokens/client1-token.txt"));
        assert!(err.to_string().contains("client1-token.txt"));
    }
}
