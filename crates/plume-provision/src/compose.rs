use crate::{ProvisionError, ProvisionResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::info;

/// Seam between the workflow and the container runtime. The real
/// implementation shells out to compose; tests substitute a fake.
#[async_trait]
pub trait ComposeRuntime: Send + Sync {
    /// Start all declared services, detached. Must be safe to repeat.
    async fn up(&self) -> ProvisionResult<()>;
}

pub struct DockerCompose {
    compose_file: PathBuf,
}

impl DockerCompose {
    pub fn new(compose_file: impl Into<PathBuf>) -> Self {
        Self {
            compose_file: compose_file.into(),
        }
    }
}

#[async_trait]
impl ComposeRuntime for DockerCompose {
    async fn up(&self) -> ProvisionResult<()> {
        info!(compose_file = %self.compose_file.display(), "starting broker stack");
        let output = Command::new("docker")
            .arg("compose")
            .arg("-f")
            .arg(&self.compose_file)
            .args(["up", "-d"])
            .output()
            .await
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    ProvisionError::EnvironmentMissing(
                        "`docker` not found on PATH; install Docker and Compose first".to_string(),
                    )
                } else {
                    ProvisionError::Io(err)
                }
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.contains("Cannot connect to the Docker daemon") {
            return Err(ProvisionError::EnvironmentMissing(stderr));
        }
        Err(ProvisionError::ComposeFailed(stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct RecordingCompose {
        calls: AtomicU32,
    }

    #[async_trait]
    impl ComposeRuntime for RecordingCompose {
        async fn up(&self) -> ProvisionResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn trait_object_dispatch() {
        let fake = RecordingCompose {
            calls: AtomicU32::new(0),
        };
        let runtime: &dyn ComposeRuntime = &fake;
        runtime.up().await.expect("up");
        runtime.up().await.expect("up again");
        assert_eq!(fake.calls.load(Ordering::SeqCst), 2);
    }
}
