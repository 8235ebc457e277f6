// ABOUTME: Container operations trait for container runtimes.
// ABOUTME: Create, start, stop, remove, file staging, and mapped-port lookup.

use super::sealed::Sealed;
use crate::spec::{ContainerSpec, FileCopy};
use crate::types::ContainerId;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// Container lifecycle operations.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// Create a container from the given specification.
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError>;

    /// Start a created container.
    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError>;

    /// Stop a running container.
    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Duration,
    ) -> Result<(), ContainerError>;

    /// Remove a container.
    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError>;

    /// Stage a host file into the container.
    async fn copy_file(&self, id: &ContainerId, copy: &FileCopy) -> Result<(), StagingError>;

    /// Host port a container port was published to.
    async fn mapped_port(
        &self,
        id: &ContainerId,
        container_port: u16,
    ) -> Result<u16, ContainerError>;
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("container already exists: {0}")]
    AlreadyExists(String),

    #[error("container not running: {0}")]
    NotRunning(String),

    #[error("container already running: {0}")]
    AlreadyRunning(String),

    #[error("image not found: {0}")]
    ImageNotFound(String),

    #[error("container port {0} is not mapped to a host port")]
    PortNotMapped(u16),

    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Errors from staging files into a container.
#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("cannot read staging source {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to build staging archive: {0}")]
    Archive(std::io::Error),

    #[error("failed to upload staging archive: {0}")]
    Upload(String),
}
