// ABOUTME: Declarative container specification handed to the runtime driver.
// ABOUTME: Derived once at build time by the Consul/Vault builders, never persisted.

use crate::types::ImageRef;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Everything the runtime driver needs to create, provision, and supervise
/// one ephemeral container. The spec carries no connection state and performs
/// no I/O; all failures belong to the driver that consumes it.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    /// Optional container name; the runtime assigns one if absent.
    pub name: Option<String>,
    /// Image to run.
    pub image: ImageRef,
    /// Environment variables, sorted for deterministic derivation.
    pub env: BTreeMap<String, String>,
    /// Labels to apply.
    pub labels: BTreeMap<String, String>,
    /// Container ports published to ephemeral host ports.
    pub exposed_ports: Vec<u16>,
    /// Host files staged into the container before start.
    pub file_copies: Vec<FileCopy>,
    /// Command override (image default runs unmodified when absent).
    pub command: Option<Vec<String>>,
    /// Linux capabilities to add.
    pub cap_adds: Vec<String>,
    /// Readiness probe applied after start.
    pub wait: HttpWait,
    /// Maximum readiness wait; the driver default applies when absent.
    pub startup_timeout: Option<Duration>,
}

/// A single host-to-container file staging entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCopy {
    pub source: PathBuf,
    pub target: String,
}

/// HTTP readiness probe against a container port.
///
/// The driver resolves `container_port` to its mapped host port and polls
/// until the expected status is returned or the startup timeout elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpWait {
    pub container_port: u16,
    pub path: String,
    pub expect_status: u16,
}

impl HttpWait {
    pub fn new(container_port: u16, path: impl Into<String>) -> Self {
        Self {
            container_port,
            path: path.into(),
            expect_status: 200,
        }
    }
}
