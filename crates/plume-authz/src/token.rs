use crate::{AuthzError, AuthzResult, Subject};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Claims carried by a plume bearer token. There is deliberately no `exp`:
/// these are development credentials with no expiry or rotation story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn from_private_pem(pem: &[u8]) -> AuthzResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(pem)?;
        Ok(Self { encoding_key })
    }

    /// Mint an RS256 token bound to exactly one subject.
    pub fn mint(&self, subject: &Subject) -> AuthzResult<String> {
        let claims = TokenClaims {
            sub: subject.as_str().to_string(),
            iat: now_epoch_seconds(),
        };
        let header = Header::new(Algorithm::RS256);
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;
        Ok(token)
    }
}

pub struct TokenVerifier {
    decoding_key: DecodingKey,
}

impl TokenVerifier {
    pub fn from_public_pem(pem: &[u8]) -> AuthzResult<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(pem)?;
        Ok(Self { decoding_key })
    }

    pub fn verify(&self, token: &str) -> AuthzResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::RS256);
        // Tokens carry no expiry; require only the subject claim.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub"]);
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

/// Read a bearer token from disk, trimming surrounding whitespace. A missing
/// file is reported as [`AuthzError::TokenFileMissing`] so callers can point
/// the operator at provisioning.
pub fn load_token(path: &Path) -> AuthzResult<String> {
    let raw = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            AuthzError::TokenFileMissing(path.to_path_buf())
        } else {
            AuthzError::Io(err)
        }
    })?;
    Ok(raw.trim().to_string())
}

fn now_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_secs() as i64
}
