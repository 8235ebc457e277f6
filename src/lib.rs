// ABOUTME: Library root for bivouac - ephemeral Consul and Vault containers for tests.
// ABOUTME: Container specs are built declaratively and handed to a Docker/Podman driver.

pub mod consul;
pub mod error;
pub mod runtime;
pub mod spec;
pub mod types;
pub mod vault;
