// ABOUTME: Container image reference parsing and validation.
// ABOUTME: Handles formats like consul, consul:1.9.0, registry.example.com/consul:tag.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0}")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    registry: Option<String>,
    name: String,
    tag: String,
}

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        for c in input.chars() {
            if !c.is_ascii_alphanumeric() && !matches!(c, '/' | ':' | '.' | '-' | '_') {
                return Err(ParseImageRefError::InvalidChar(c));
            }
        }

        // Split off the tag. A colon inside a registry host (port number) is
        // distinguished by the slash that follows it.
        let (without_tag, tag) = match input.rsplit_once(':') {
            Some((before, after)) if !after.contains('/') => (before, after.to_string()),
            _ => (input, "latest".to_string()),
        };

        // The first path component is a registry if it contains a dot or a
        // port, or is "localhost".
        let (registry, name) = match without_tag.split_once('/') {
            Some((first, rest))
                if first.contains('.') || first.contains(':') || first == "localhost" =>
            {
                (Some(first.to_string()), rest.to_string())
            }
            _ => (None, without_tag.to_string()),
        };

        Ok(Self {
            registry,
            name,
            tag,
        })
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref registry) = self.registry {
            write!(f, "{}/", registry)?;
        }
        write!(f, "{}:{}", self.name, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_defaults_to_latest() {
        let image = ImageRef::parse("consul").unwrap();
        assert_eq!(image.name(), "consul");
        assert_eq!(image.tag(), "latest");
        assert_eq!(image.registry(), None);
    }

    #[test]
    fn name_with_tag() {
        let image = ImageRef::parse("consul:1.9.0").unwrap();
        assert_eq!(image.name(), "consul");
        assert_eq!(image.tag(), "1.9.0");
        assert_eq!(image.to_string(), "consul:1.9.0");
    }

    #[test]
    fn registry_with_port() {
        let image = ImageRef::parse("registry.local:5000/hashicorp/consul:1.9.0").unwrap();
        assert_eq!(image.registry(), Some("registry.local:5000"));
        assert_eq!(image.name(), "hashicorp/consul");
        assert_eq!(image.tag(), "1.9.0");
    }

    #[test]
    fn namespaced_name_without_registry() {
        let image = ImageRef::parse("hashicorp/vault:1.3.2").unwrap();
        assert_eq!(image.registry(), None);
        assert_eq!(image.name(), "hashicorp/vault");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            ImageRef::parse("  "),
            Err(ParseImageRefError::Empty)
        ));
    }

    #[test]
    fn invalid_character_is_rejected() {
        assert!(matches!(
            ImageRef::parse("consul 1.9"),
            Err(ParseImageRefError::InvalidChar(' '))
        ));
    }
}
