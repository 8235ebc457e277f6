// ABOUTME: Container runtime driver for Docker and Podman.
// ABOUTME: Capability traits, bollard implementation, launcher, and readiness wait.

mod bollard;
mod detection;
mod launcher;
mod traits;
mod types;
mod wait;

pub use bollard::BollardRuntime;
pub use detection::{DetectionError, detect_local};
pub use launcher::{LaunchError, launch};
pub use traits::{
    ContainerError, ContainerOps, ExecConfig, ExecError, ExecOps, ExecResult, ImageError,
    ImageOps, StagingError,
};
pub use types::{RuntimeInfo, RuntimeType};
pub use wait::{DEFAULT_STARTUP_TIMEOUT, WaitError, wait_for_http};
