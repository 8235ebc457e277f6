// ABOUTME: Declarative Consul container support.
// ABOUTME: Configuration model, option table, command, and spec builder.

mod command;
pub mod config;
mod container;
mod options;

pub use command::ConsulCommand;
pub use config::{Acl, AclTokens, ConsulConfig, Ports, TlsConfig, stage_tls};
pub use container::{
    CONSUL_IMAGE, CONSUL_VERSION, ConsulContainer, DEFAULT_DNS_PORT, DEFAULT_HTTP_PORT,
    DEFAULT_HTTPS_PORT,
};
pub use options::{ConsulOption, ConsulOptions, LOCAL_CONFIG_ENV};
