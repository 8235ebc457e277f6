// ABOUTME: Fixed table of Consul container environment options.
// ABOUTME: Each enumerated option carries a compiled-in default, overridable per key.

use std::collections::HashMap;

/// Environment entry holding the serialized agent configuration.
pub const LOCAL_CONFIG_ENV: &str = "CONSUL_LOCAL_CONFIG";

/// The four environment options recognized by the Consul image entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsulOption {
    BindInterface,
    BindAddress,
    ClientInterface,
    ClientAddress,
}

impl ConsulOption {
    pub const ALL: [ConsulOption; 4] = [
        ConsulOption::BindInterface,
        ConsulOption::BindAddress,
        ConsulOption::ClientInterface,
        ConsulOption::ClientAddress,
    ];

    pub fn env_name(self) -> &'static str {
        match self {
            ConsulOption::BindInterface => "CONSUL_BIND_INTERFACE",
            ConsulOption::BindAddress => "CONSUL_BIND_ADDRESS",
            ConsulOption::ClientInterface => "CONSUL_CLIENT_INTERFACE",
            ConsulOption::ClientAddress => "CONSUL_CLIENT_ADDRESS",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            ConsulOption::BindInterface => "eth0",
            ConsulOption::BindAddress => "",
            ConsulOption::ClientInterface => "",
            ConsulOption::ClientAddress => "",
        }
    }
}

/// Caller overrides for the enumerated options. Unset keys resolve to the
/// compiled-in default, independently per key.
#[derive(Debug, Clone, Default)]
pub struct ConsulOptions {
    overrides: HashMap<ConsulOption, String>,
}

impl ConsulOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, option: ConsulOption, value: impl Into<String>) -> Self {
        self.overrides.insert(option, value.into());
        self
    }

    pub fn set(&mut self, option: ConsulOption, value: impl Into<String>) {
        self.overrides.insert(option, value.into());
    }

    pub fn get_or_default(&self, option: ConsulOption) -> &str {
        self.overrides
            .get(&option)
            .map(String::as_str)
            .unwrap_or_else(|| option.default_value())
    }
}
