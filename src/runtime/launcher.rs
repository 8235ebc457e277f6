// ABOUTME: Orchestrates pull, create, file staging, start, and readiness wait.
// ABOUTME: Each failure names the stage that produced it; nothing is retried.

use super::traits::{ContainerError, ContainerOps, ImageError, ImageOps, StagingError};
use super::wait::{self, DEFAULT_STARTUP_TIMEOUT, WaitError};
use crate::spec::ContainerSpec;
use crate::types::ContainerId;

const LOCALHOST: &str = "127.0.0.1";

/// Error from a container launch, tagged with the failing stage.
///
/// Variants for stages after a successful create carry the ID of the
/// container that was left behind; `container_id` exposes it so callers
/// can stop and remove it.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("image existence check failed: {0}")]
    ImageCheck(ImageError),

    #[error("image pull failed: {0}")]
    Pull(ImageError),

    #[error("container create failed: {0}")]
    Create(ContainerError),

    #[error("file staging failed for container {id}: {source}")]
    Staging {
        id: ContainerId,
        source: StagingError,
    },

    #[error("container start failed for {id}: {source}")]
    Start {
        id: ContainerId,
        source: ContainerError,
    },

    #[error("mapped port lookup failed for {id}: {source}")]
    PortLookup {
        id: ContainerId,
        source: ContainerError,
    },

    #[error("readiness wait failed for {id}: {source}")]
    Wait { id: ContainerId, source: WaitError },
}

impl LaunchError {
    /// ID of the container a post-create failure left behind, if any.
    pub fn container_id(&self) -> Option<&ContainerId> {
        match self {
            LaunchError::ImageCheck(_) | LaunchError::Pull(_) | LaunchError::Create(_) => None,
            LaunchError::Staging { id, .. }
            | LaunchError::Start { id, .. }
            | LaunchError::PortLookup { id, .. }
            | LaunchError::Wait { id, .. } => Some(id),
        }
    }
}

/// Launch a container from its spec and block until it is ready.
///
/// Pulls the image when absent, creates the container, stages declared
/// files, starts it, and applies the spec's readiness probe against the
/// mapped host port. The container is left running; stopping and removal
/// remain the caller's responsibility, including on launch failure, where
/// `LaunchError::container_id` names the container to clean up.
pub async fn launch<R>(runtime: &R, spec: &ContainerSpec) -> Result<ContainerId, LaunchError>
where
    R: ImageOps + ContainerOps,
{
    let exists = runtime
        .image_exists(&spec.image)
        .await
        .map_err(LaunchError::ImageCheck)?;
    if !exists {
        runtime
            .pull_image(&spec.image)
            .await
            .map_err(LaunchError::Pull)?;
    }

    let id = runtime
        .create_container(spec)
        .await
        .map_err(LaunchError::Create)?;
    tracing::info!(id = %id, image = %spec.image, "container created");

    for copy in &spec.file_copies {
        if let Err(source) = runtime.copy_file(&id, copy).await {
            return Err(LaunchError::Staging { id, source });
        }
    }

    if let Err(source) = runtime.start_container(&id).await {
        return Err(LaunchError::Start { id, source });
    }

    let host_port = match runtime.mapped_port(&id, spec.wait.container_port).await {
        Ok(port) => port,
        Err(source) => return Err(LaunchError::PortLookup { id, source }),
    };

    let timeout = spec.startup_timeout.unwrap_or(DEFAULT_STARTUP_TIMEOUT);
    if let Err(source) = wait::wait_for_http(LOCALHOST, host_port, &spec.wait, timeout).await {
        return Err(LaunchError::Wait { id, source });
    }

    tracing::info!(id = %id, port = host_port, "container ready");
    Ok(id)
}
