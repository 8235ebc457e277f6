// ABOUTME: Integration tests for Vault container spec derivation.
// ABOUTME: Covers image versioning, environment, and seed command ordering.

use bivouac::vault::VaultContainer;
use std::time::Duration;

#[test]
fn default_image_is_pinned() {
    let spec = VaultContainer::new().build().unwrap();
    assert_eq!(spec.image.to_string(), "vault:1.3.2");
}

#[test]
fn version_override_changes_the_tag() {
    let spec = VaultContainer::new().with_version("1.13.3").build().unwrap();
    assert_eq!(spec.image.to_string(), "vault:1.13.3");
}

#[test]
fn vault_addr_points_at_the_dev_listener() {
    let spec = VaultContainer::new().build().unwrap();
    assert_eq!(
        spec.env.get("VAULT_ADDR").map(String::as_str),
        Some("http://0.0.0.0:8200")
    );
}

#[test]
fn no_token_env_without_a_token() {
    let spec = VaultContainer::new().build().unwrap();
    assert!(!spec.env.contains_key("VAULT_DEV_ROOT_TOKEN_ID"));
}

#[test]
fn seed_commands_preserve_declaration_order() {
    let vault = VaultContainer::new()
        .with_secret("secret/app/db", ["password=hunter2"])
        .with_secret("secret/app/api", ["key=abc", "region=eu"]);

    let commands = vault.seed_commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0][3], "secret/app/db");
    assert_eq!(commands[1][3], "secret/app/api");
}

#[test]
fn secret_values_are_kept_verbatim() {
    let vault = VaultContainer::new().with_secret("secret/x", ["a=1", "b=2"]);
    assert_eq!(
        vault.seed_commands(),
        [["vault", "kv", "put", "secret/x", "a=1", "b=2"]]
    );
}

#[test]
fn startup_timeout_passes_through() {
    let spec = VaultContainer::new()
        .with_startup_timeout(Duration::from_secs(120))
        .build()
        .unwrap();
    assert_eq!(spec.startup_timeout, Some(Duration::from_secs(120)));
}
