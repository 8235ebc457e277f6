// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: Defines ContainerOps, ExecOps, and ImageOps.

mod container;
mod exec;
mod image;
pub(crate) mod sealed;

pub use container::{ContainerError, ContainerOps, StagingError};
pub use exec::{ExecConfig, ExecError, ExecOps, ExecResult};
pub use image::{ImageError, ImageOps};
