// ABOUTME: Configuration error types for bivouac.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("TLS is enabled but {0} is not set")]
    MissingTlsFile(&'static str),

    #[error("ACL is enabled but no default policy is set")]
    MissingAclPolicy,

    #[error("invalid image reference: {0}")]
    InvalidImage(String),

    #[error("secret {0} has no key=value pairs")]
    EmptySecret(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialize error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
