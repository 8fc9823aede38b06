//! Tests for config file resolution and graceful degradation
//!
//! Tests that manipulate PODCASTR_CONFIG are marked with #[serial] so they
//! run sequentially, not in parallel.

use podcastr_common::config::{load_toml_config, ConfigResolver, LoggingConfig, CONFIG_ENV_VAR};
use serde::Deserialize;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, PartialEq)]
struct SampleConfig {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    logging: LoggingConfig,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

#[test]
#[serial]
fn test_env_var_used_when_no_cli_arg() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/podcastr-env.toml");

    let resolver = ConfigResolver::new("player");
    assert_eq!(
        resolver.resolve(None),
        Some(PathBuf::from("/tmp/podcastr-env.toml"))
    );

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_cli_arg_overrides_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/podcastr-env.toml");

    let resolver = ConfigResolver::new("player");
    assert_eq!(
        resolver.resolve(Some(Path::new("/tmp/podcastr-cli.toml"))),
        Some(PathBuf::from("/tmp/podcastr-cli.toml"))
    );

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_no_file_uses_defaults() {
    let config: SampleConfig = load_toml_config(None).unwrap();
    assert_eq!(config, SampleConfig::default());
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let config: SampleConfig = load_toml_config(Some(&missing)).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_partial_file_fills_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

    let config: SampleConfig = load_toml_config(Some(file.path())).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_file_is_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = \"not a number").unwrap();

    let result: podcastr_common::Result<SampleConfig> = load_toml_config(Some(file.path()));
    assert!(matches!(result, Err(podcastr_common::Error::Config(_))));
}
