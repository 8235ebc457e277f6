// ABOUTME: Consul agent configuration model serialized into CONSUL_LOCAL_CONFIG.
// ABOUTME: All fields optional; absent fields fall back to the agent's defaults.

use crate::error::{Error, Result};
use crate::spec::FileCopy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed in-container destinations for staged TLS material.
pub const CA_FILE: &str = "/consul/config/ca";
pub const CERT_FILE: &str = "/consul/config/cert";
pub const KEY_FILE: &str = "/consul/config/key";

/// Declarative Consul agent configuration.
///
/// Serializes to the JSON the agent reads from `CONSUL_LOCAL_CONFIG`, using
/// Consul's own config keys and omitting absent fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsulConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Ports>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<Acl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ports {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<AclTokens>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,

    #[serde(
        rename = "default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication: Option<String>,
}

/// TLS material for the agent. Paths name host files until staged, fixed
/// in-container paths afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub enabled: bool,

    pub ca_file: PathBuf,
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

impl ConsulConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check cross-field requirements the serialized form cannot express.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref acl) = self.acl
            && acl.enabled
            && acl.default_policy.is_none()
        {
            return Err(Error::MissingAclPolicy);
        }

        if let Some(ref tls) = self.tls
            && tls.enabled
        {
            if tls.ca_file.as_os_str().is_empty() {
                return Err(Error::MissingTlsFile("ca_file"));
            }
            if tls.cert_file.as_os_str().is_empty() {
                return Err(Error::MissingTlsFile("cert_file"));
            }
            if tls.key_file.as_os_str().is_empty() {
                return Err(Error::MissingTlsFile("key_file"));
            }
        }

        Ok(())
    }

    /// Whether TLS staging applies to this configuration.
    pub fn tls_enabled(&self) -> bool {
        self.tls.as_ref().is_some_and(|tls| tls.enabled)
    }
}

/// Derive the staged form of a configuration.
///
/// When TLS is enabled, returns a new config whose three path fields point at
/// the fixed in-container destinations, plus the file copies that put them
/// there (host sources taken from the input). Otherwise returns the config
/// unchanged and no copies. The input is never mutated, and re-staging an
/// already-staged config yields the same fixed paths.
pub fn stage_tls(config: &ConsulConfig) -> (ConsulConfig, Vec<FileCopy>) {
    let Some(tls) = config.tls.as_ref().filter(|tls| tls.enabled) else {
        return (config.clone(), Vec::new());
    };

    let copies = vec![
        FileCopy {
            source: tls.ca_file.clone(),
            target: CA_FILE.to_string(),
        },
        FileCopy {
            source: tls.cert_file.clone(),
            target: CERT_FILE.to_string(),
        },
        FileCopy {
            source: tls.key_file.clone(),
            target: KEY_FILE.to_string(),
        },
    ];

    let mut staged = config.clone();
    staged.tls = Some(TlsConfig {
        enabled: true,
        ca_file: PathBuf::from(CA_FILE),
        cert_file: PathBuf::from(CERT_FILE),
        key_file: PathBuf::from(KEY_FILE),
    });

    (staged, copies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tls_config(enabled: bool) -> ConsulConfig {
        ConsulConfig {
            tls: Some(TlsConfig {
                enabled,
                ca_file: PathBuf::from("ca.pem"),
                cert_file: PathBuf::from("cert.pem"),
                key_file: PathBuf::from("key.pem"),
            }),
            ..ConsulConfig::default()
        }
    }

    #[test]
    fn empty_config_serializes_to_empty_object() {
        let json = serde_json::to_string(&ConsulConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn datacenter_and_acl_serialize_with_consul_keys() {
        let config = ConsulConfig {
            datacenter: Some("dc1".to_string()),
            acl: Some(Acl {
                enabled: true,
                default_policy: Some("deny".to_string()),
                tokens: Some(AclTokens {
                    master: Some("m".to_string()),
                    default_token: Some("d".to_string()),
                    ..AclTokens::default()
                }),
            }),
            ..ConsulConfig::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""datacenter":"dc1""#));
        assert!(json.contains(r#""default_policy":"deny""#));
        assert!(json.contains(r#""default":"d""#));
        assert!(!json.contains("default_token"));
    }

    #[test]
    fn tls_block_serializes_all_three_paths() {
        let json = serde_json::to_string(&tls_config(true)).unwrap();
        assert!(json.contains(r#""ca_file":"ca.pem""#));
        assert!(json.contains(r#""cert_file":"cert.pem""#));
        assert!(json.contains(r#""key_file":"key.pem""#));
    }

    #[test]
    fn stage_tls_disabled_is_a_no_op() {
        let config = tls_config(false);
        let (staged, copies) = stage_tls(&config);
        assert!(copies.is_empty());
        assert_eq!(staged, config);
    }

    #[test]
    fn stage_tls_absent_is_a_no_op() {
        let (staged, copies) = stage_tls(&ConsulConfig::default());
        assert!(copies.is_empty());
        assert_eq!(staged, ConsulConfig::default());
    }

    #[test]
    fn stage_tls_rewrites_all_three_paths() {
        let config = tls_config(true);
        let (staged, copies) = stage_tls(&config);

        assert_eq!(copies.len(), 3);
        assert_eq!(copies[0].source, PathBuf::from("ca.pem"));
        assert_eq!(copies[0].target, CA_FILE);
        assert_eq!(copies[1].target, CERT_FILE);
        assert_eq!(copies[2].target, KEY_FILE);

        let tls = staged.tls.unwrap();
        assert_eq!(tls.ca_file, PathBuf::from(CA_FILE));
        assert_eq!(tls.cert_file, PathBuf::from(CERT_FILE));
        assert_eq!(tls.key_file, PathBuf::from(KEY_FILE));

        // Input remains untouched.
        assert_eq!(config.tls.unwrap().ca_file, PathBuf::from("ca.pem"));
    }

    #[test]
    fn stage_tls_is_idempotent() {
        let (once, _) = stage_tls(&tls_config(true));
        let (twice, copies) = stage_tls(&once);
        assert_eq!(once, twice);
        assert_eq!(copies.len(), 3);
    }

    #[test]
    fn validate_rejects_acl_without_policy() {
        let config = ConsulConfig {
            acl: Some(Acl {
                enabled: true,
                ..Acl::default()
            }),
            ..ConsulConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::MissingAclPolicy)
        ));
    }

    #[test]
    fn validate_rejects_tls_with_empty_path() {
        let mut config = tls_config(true);
        config.tls.as_mut().unwrap().cert_file = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(Error::MissingTlsFile("cert_file"))
        ));
    }

    #[test]
    fn validate_accepts_disabled_blocks() {
        let mut config = tls_config(false);
        config.tls.as_mut().unwrap().ca_file = PathBuf::new();
        config.acl = Some(Acl::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_yaml_parses_full_topology() {
        let yaml = r#"
datacenter: default
ports:
  http: 8501
acl:
  enabled: true
  default_policy: deny
  tokens:
    master: m-token
tls:
  enabled: true
  ca_file: certs/ca.pem
  cert_file: certs/cert.pem
  key_file: certs/key.pem
"#;
        let config = ConsulConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.datacenter.as_deref(), Some("default"));
        assert_eq!(config.ports.as_ref().unwrap().http, Some(8501));
        assert!(config.tls_enabled());
    }

    #[test]
    fn from_yaml_rejects_acl_without_policy() {
        let yaml = r#"
acl:
  enabled: true
"#;
        assert!(ConsulConfig::from_yaml(yaml).is_err());
    }
}
