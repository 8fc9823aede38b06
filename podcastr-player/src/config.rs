//! Configuration for podcastr-player
//!
//! Settings sources priority:
//! 1. Command-line arguments (--port, --catalog), with environment fallbacks
//! 2. TOML configuration file
//! 3. Built-in defaults
//!
//! The TOML file is bootstrap only; the service must restart to pick up
//! changes.

use podcastr_common::config::LoggingConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file with the episode records
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Number of episodes shown as latest releases on the home listing
    #[serde(default = "default_latest_count")]
    pub latest_count: usize,

    /// Episodes on the home listing and in its playlist
    #[serde(default = "default_listing_limit")]
    pub listing_limit: usize,

    /// Events buffered per observer before the oldest are dropped
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            latest_count: default_latest_count(),
            listing_limit: default_listing_limit(),
            event_capacity: default_event_capacity(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Apply command-line overrides
    pub fn with_overrides(mut self, port: Option<u16>, catalog_path: Option<PathBuf>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(catalog_path) = catalog_path {
            self.catalog_path = catalog_path;
        }
        self
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("episodes.json")
}

fn default_latest_count() -> usize {
    2
}

fn default_listing_limit() -> usize {
    12
}

fn default_event_capacity() -> usize {
    100
}
