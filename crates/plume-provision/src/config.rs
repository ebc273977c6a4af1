use plume_authz::{NamespaceName, Subject, TenantName, TopicName};
use std::path::PathBuf;
use std::time::Duration;

pub const SUBJECT_ADMIN: &str = "admin";
pub const SUBJECT_CLIENT1: &str = "client1";
pub const SUBJECT_CLIENT2: &str = "client2";

const DEFAULT_ADMIN_URL: &str = "http://localhost:8080";
const DEFAULT_SERVICE_URL: &str = "pulsar://localhost:6650";
const DEFAULT_COMPOSE_FILE: &str = "deploy/docker-compose.yml";
const DEFAULT_KEYS_DIR: &str = "keys";
const DEFAULT_TOKENS_DIR: &str = "tokens";
const DEFAULT_READY_ATTEMPTS: u32 = 30;
const DEFAULT_READY_INTERVAL_SECS: u64 = 3;

/// Bounded fixed-interval retry schedule for the readiness probe. No
/// backoff, no jitter; the budget is `max_attempts * interval`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_READY_ATTEMPTS,
            Duration::from_secs(DEFAULT_READY_INTERVAL_SECS),
        )
    }
}

// Workflow configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    // Broker admin REST base URL.
    pub admin_url: String,
    // Broker client service URL.
    pub service_url: String,
    // Compose file declaring the broker stack.
    pub compose_file: PathBuf,
    // Directory holding the signing key pair.
    pub keys_dir: PathBuf,
    // Directory holding per-subject token files.
    pub tokens_dir: PathBuf,
    // Fixed resource names the workflow provisions.
    pub tenant: TenantName,
    pub namespace: NamespaceName,
    pub topic: TopicName,
    // Readiness poll schedule.
    pub ready: RetryPolicy,
}

impl ProvisionConfig {
    pub fn from_env() -> Self {
        let admin_url =
            std::env::var("PLUME_ADMIN_URL").unwrap_or_else(|_| DEFAULT_ADMIN_URL.to_string());
        let service_url =
            std::env::var("PLUME_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());
        let compose_file = std::env::var("PLUME_COMPOSE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_COMPOSE_FILE));
        let keys_dir = std::env::var("PLUME_KEYS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_KEYS_DIR));
        let tokens_dir = std::env::var("PLUME_TOKENS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKENS_DIR));
        let ready_attempts = std::env::var("PLUME_READY_ATTEMPTS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_READY_ATTEMPTS);
        let ready_interval_secs = std::env::var("PLUME_READY_INTERVAL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_READY_INTERVAL_SECS);

        Self {
            admin_url,
            service_url,
            compose_file,
            keys_dir,
            tokens_dir,
            tenant: TenantName::new("public"),
            namespace: NamespaceName::new("default"),
            topic: TopicName::new("test-topic"),
            ready: RetryPolicy::new(ready_attempts, Duration::from_secs(ready_interval_secs)),
        }
    }

    pub fn private_key_path(&self) -> PathBuf {
        self.keys_dir.join("private.key")
    }

    pub fn public_key_path(&self) -> PathBuf {
        self.keys_dir.join("public.key")
    }

    pub fn token_path(&self, subject: &Subject) -> PathBuf {
        self.tokens_dir.join(format!("{subject}-token.txt"))
    }

    pub fn subjects() -> [Subject; 3] {
        [
            Subject::new(SUBJECT_ADMIN),
            Subject::new(SUBJECT_CLIENT1),
            Subject::new(SUBJECT_CLIENT2),
        ]
    }

    pub fn admin_subject() -> Subject {
        Subject::new(SUBJECT_ADMIN)
    }
}
