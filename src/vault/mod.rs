// ABOUTME: Declarative Vault dev-server container support.
// ABOUTME: Builds a ContainerSpec plus the in-container commands seeding declared secrets.

use crate::error::{Error, Result};
use crate::spec::{ContainerSpec, HttpWait};
use crate::types::ImageRef;
use std::collections::BTreeMap;
use std::time::Duration;

pub const VAULT_IMAGE: &str = "vault";
pub const VAULT_VERSION: &str = "1.3.2";

pub const VAULT_PORT: u16 = 8200;

const HEALTH_CHECK_PATH: &str = "/v1/sys/health";

/// A secret to seed after startup: one KV path with its key=value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSecret {
    pub path: String,
    pub values: Vec<String>,
}

/// Declarative Vault container builder.
///
/// Runs the image in dev mode. The dev server stores its root token inside
/// the container, so seed commands executed in-container need no explicit
/// authentication.
#[derive(Debug, Clone, Default)]
pub struct VaultContainer {
    version: Option<String>,
    root_token: Option<String>,
    secrets: Vec<VaultSecret>,
    startup_timeout: Option<Duration>,
}

impl VaultContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the image tag (defaults to 1.3.2).
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the dev-mode root token.
    #[must_use]
    pub fn with_vault_token(mut self, token: impl Into<String>) -> Self {
        self.root_token = Some(token.into());
        self
    }

    /// Declare a secret to write after startup, as `key=value` pairs.
    #[must_use]
    pub fn with_secret(
        mut self,
        path: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.secrets.push(VaultSecret {
            path: path.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    #[must_use]
    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = Some(timeout);
        self
    }

    /// Derive the container spec.
    pub fn build(&self) -> Result<ContainerSpec> {
        for secret in &self.secrets {
            if secret.values.is_empty() {
                return Err(Error::EmptySecret(secret.path.clone()));
            }
        }

        let version = self.version.as_deref().unwrap_or(VAULT_VERSION);
        let image = ImageRef::parse(&format!("{}:{}", VAULT_IMAGE, version))
            .map_err(|e| Error::InvalidImage(e.to_string()))?;

        let mut env = BTreeMap::new();
        env.insert(
            "VAULT_ADDR".to_string(),
            format!("http://0.0.0.0:{}", VAULT_PORT),
        );
        if let Some(ref token) = self.root_token {
            env.insert("VAULT_DEV_ROOT_TOKEN_ID".to_string(), token.clone());
        }

        Ok(ContainerSpec {
            name: None,
            image,
            env,
            labels: BTreeMap::new(),
            exposed_ports: vec![VAULT_PORT],
            file_copies: Vec::new(),
            command: None,
            // mlock support for the dev server
            cap_adds: vec!["IPC_LOCK".to_string()],
            wait: HttpWait::new(VAULT_PORT, HEALTH_CHECK_PATH),
            startup_timeout: self.startup_timeout,
        })
    }

    /// In-container commands writing the declared secrets, to run through
    /// exec once the container is healthy.
    pub fn seed_commands(&self) -> Vec<Vec<String>> {
        self.secrets
            .iter()
            .map(|secret| {
                let mut cmd = vec![
                    "vault".to_string(),
                    "kv".to_string(),
                    "put".to_string(),
                    secret.path.clone(),
                ];
                cmd.extend(secret.values.iter().cloned());
                cmd
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_token_lands_in_env() {
        let spec = VaultContainer::new().with_vault_token("foo").build().unwrap();
        assert_eq!(
            spec.env.get("VAULT_DEV_ROOT_TOKEN_ID").map(String::as_str),
            Some("foo")
        );
        assert_eq!(spec.exposed_ports, [VAULT_PORT]);
        assert_eq!(spec.cap_adds, ["IPC_LOCK"]);
    }

    #[test]
    fn wait_targets_sys_health() {
        let spec = VaultContainer::new().build().unwrap();
        assert_eq!(spec.wait.container_port, 8200);
        assert_eq!(spec.wait.path, "/v1/sys/health");
    }

    #[test]
    fn seed_commands_render_kv_puts() {
        let vault = VaultContainer::new()
            .with_vault_token("foo")
            .with_secret("secret/test/app", ["password=password1", "user=admin"]);
        assert_eq!(
            vault.seed_commands(),
            [[
                "vault",
                "kv",
                "put",
                "secret/test/app",
                "password=password1",
                "user=admin"
            ]]
        );
    }

    #[test]
    fn secret_without_values_is_rejected() {
        let vault = VaultContainer::new().with_secret("secret/empty", Vec::<String>::new());
        assert!(matches!(vault.build(), Err(Error::EmptySecret(_))));
    }
}
