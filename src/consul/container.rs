// ABOUTME: Builder deriving a ContainerSpec for an ephemeral Consul agent.
// ABOUTME: Combines configuration, option table, and command into one declarative spec.

use super::command::ConsulCommand;
use super::config::{self, ConsulConfig};
use super::options::{ConsulOption, ConsulOptions, LOCAL_CONFIG_ENV};
use crate::error::{Error, Result};
use crate::spec::{ContainerSpec, HttpWait};
use crate::types::ImageRef;
use std::collections::BTreeMap;
use std::time::Duration;

pub const CONSUL_IMAGE: &str = "consul";
pub const CONSUL_VERSION: &str = "1.9.0";

pub const DEFAULT_HTTP_PORT: u16 = 8500;
pub const DEFAULT_HTTPS_PORT: u16 = 8502;
pub const DEFAULT_DNS_PORT: u16 = 8600;

const HEALTH_CHECK_PATH: &str = "/v1/status/leader";

/// Declarative Consul container builder.
///
/// Every derivation rule is evaluated independently per field; only the three
/// TLS paths share a condition (the enabled flag). Building performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct ConsulContainer {
    config: Option<ConsulConfig>,
    options: ConsulOptions,
    command: Option<ConsulCommand>,
    version: Option<String>,
    startup_timeout: Option<Duration>,
}

impl ConsulContainer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: ConsulConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ConsulOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: ConsulCommand) -> Self {
        self.command = Some(command);
        self
    }

    /// Override the image tag (defaults to 1.9.0).
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Cap the readiness wait; the driver default applies when unset.
    #[must_use]
    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = Some(timeout);
        self
    }

    /// Resolved HTTP API port: explicit config value, else 8500.
    pub fn http_port(&self) -> u16 {
        self.config
            .as_ref()
            .and_then(|c| c.ports.as_ref())
            .and_then(|p| p.http)
            .unwrap_or(DEFAULT_HTTP_PORT)
    }

    /// Resolved HTTPS port: explicit config value, else 8502.
    pub fn https_port(&self) -> u16 {
        self.config
            .as_ref()
            .and_then(|c| c.ports.as_ref())
            .and_then(|p| p.https)
            .unwrap_or(DEFAULT_HTTPS_PORT)
    }

    /// Resolved DNS port: explicit config value, else 8600.
    pub fn dns_port(&self) -> u16 {
        self.config
            .as_ref()
            .and_then(|c| c.ports.as_ref())
            .and_then(|p| p.dns)
            .unwrap_or(DEFAULT_DNS_PORT)
    }

    /// Derive the container spec.
    ///
    /// TLS staging happens before serialization, so `CONSUL_LOCAL_CONFIG`
    /// always reflects the fixed in-container paths.
    pub fn build(&self) -> Result<ContainerSpec> {
        if let Some(ref config) = self.config {
            config.validate()?;
        }

        let version = self.version.as_deref().unwrap_or(CONSUL_VERSION);
        let image = ImageRef::parse(&format!("{}:{}", CONSUL_IMAGE, version))
            .map_err(|e| Error::InvalidImage(e.to_string()))?;

        let (staged, file_copies) = match self.config {
            Some(ref config) => {
                let (staged, copies) = config::stage_tls(config);
                (Some(staged), copies)
            }
            None => (None, Vec::new()),
        };

        let mut env = BTreeMap::new();
        for option in ConsulOption::ALL {
            env.insert(
                option.env_name().to_string(),
                self.options.get_or_default(option).to_string(),
            );
        }
        if let Some(ref staged) = staged {
            env.insert(LOCAL_CONFIG_ENV.to_string(), serde_json::to_string(staged)?);
        }

        Ok(ContainerSpec {
            name: None,
            image,
            env,
            labels: BTreeMap::new(),
            exposed_ports: vec![self.http_port(), self.https_port(), self.dns_port()],
            file_copies,
            command: self.command.as_ref().map(ConsulCommand::to_args),
            cap_adds: Vec::new(),
            wait: HttpWait::new(self.http_port(), HEALTH_CHECK_PATH),
            startup_timeout: self.startup_timeout,
        })
    }
}
