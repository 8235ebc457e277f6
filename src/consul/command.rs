// ABOUTME: Startup command builder for the Consul agent.
// ABOUTME: Converts declared flags into the argv list overriding the image default.

/// Agent startup command. When supplied to the container builder, the
/// resulting argv replaces the image's default command.
#[derive(Debug, Clone, Default)]
pub struct ConsulCommand {
    dev: bool,
    server: bool,
    client: Option<String>,
    node: Option<String>,
    extra: Vec<String>,
}

impl ConsulCommand {
    pub fn agent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dev(mut self) -> Self {
        self.dev = true;
        self
    }

    #[must_use]
    pub fn server(mut self) -> Self {
        self.server = true;
        self
    }

    #[must_use]
    pub fn client(mut self, address: impl Into<String>) -> Self {
        self.client = Some(address.into());
        self
    }

    #[must_use]
    pub fn node(mut self, name: impl Into<String>) -> Self {
        self.node = Some(name.into());
        self
    }

    /// Append a raw agent flag, e.g. `-ui`.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra.push(arg.into());
        self
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["agent".to_string()];
        if self.dev {
            args.push("-dev".to_string());
        }
        if self.server {
            args.push("-server".to_string());
        }
        if let Some(ref client) = self.client {
            args.push(format!("-client={}", client));
        }
        if let Some(ref node) = self.node {
            args.push(format!("-node={}", node));
        }
        args.extend(self.extra.iter().cloned());
        args
    }
}
