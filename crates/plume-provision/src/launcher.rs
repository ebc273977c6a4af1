//! Cluster launch and bounded readiness polling.
use crate::config::RetryPolicy;
use crate::{ComposeRuntime, ProvisionError, ProvisionResult};
use plume_admin::AdminClient;
use tokio::time::sleep;
use tracing::{info, warn};

/// Readiness state machine: `Waiting` until a probe succeeds (`Ready`) or
/// the attempt budget is exhausted (`Failed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Waiting,
    Ready,
    Failed,
}

impl std::fmt::Display for LaunchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchState::Waiting => f.write_str("waiting"),
            LaunchState::Ready => f.write_str("ready"),
            LaunchState::Failed => f.write_str("failed"),
        }
    }
}

pub struct ClusterLauncher<'a> {
    admin: &'a AdminClient,
    compose: &'a dyn ComposeRuntime,
    policy: RetryPolicy,
}

impl<'a> ClusterLauncher<'a> {
    pub fn new(admin: &'a AdminClient, compose: &'a dyn ComposeRuntime, policy: RetryPolicy) -> Self {
        Self {
            admin,
            compose,
            policy,
        }
    }

    /// Start the stack and block until the broker answers the health probe.
    /// Returns the number of attempts used.
    pub async fn launch(&self) -> ProvisionResult<u32> {
        self.compose.up().await?;
        self.wait_until_ready().await
    }

    /// Bounded fixed-interval poll. Every probe failure keeps the machine in
    /// `Waiting`; there is no retry beyond `max_attempts`.
    pub async fn wait_until_ready(&self) -> ProvisionResult<u32> {
        let mut state = LaunchState::Waiting;
        for attempt in 1..=self.policy.max_attempts {
            match self.admin.broker_health().await {
                Ok(()) => {
                    state = LaunchState::Ready;
                    info!(attempt, %state, "broker healthy");
                    return Ok(attempt);
                }
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        %state,
                        error = %err,
                        "broker not ready"
                    );
                    if attempt < self.policy.max_attempts {
                        sleep(self.policy.interval).await;
                    }
                }
            }
        }
        state = LaunchState::Failed;
        warn!(%state, attempts = self.policy.max_attempts, "readiness budget exhausted");
        Err(ProvisionError::BrokerUnavailable {
            attempts: self.policy.max_attempts,
        })
    }
}
