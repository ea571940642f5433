//! Configuration loading for the Mail3 client
//!
//! Supports loading client settings from (in order of priority):
//! 1. JSON file (~/.config/mail3/client.json)
//! 2. Runtime environment variables
//!
//! A server URL embedded at compile time fills in when none is configured.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::DEFAULT_DATE_FORMAT;

/// Client config filename in the Mail3 config directory
const CLIENT_FILE: &str = "client.json";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to a Mail3 server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Mail3 API (e.g., "https://api.mail3.me/api/v1")
    #[serde(default)]
    pub server_url: String,
    /// Wallet mailbox address the client is scoped to
    pub address: String,
    /// Bearer token from a prior sign-in
    #[serde(default)]
    pub session_token: Option<String>,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// chrono format string for preview timestamps
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl ClientConfig {
    /// Create a config with default timeout and date format
    pub fn new(server_url: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            address: address.into(),
            session_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            date_format: default_date_format(),
        }
    }

    /// Load config using the following priority:
    /// 1. JSON file (~/.config/mail3/client.json)
    /// 2. Runtime environment variables
    pub fn load() -> Result<Self> {
        let config = if config::config_exists(CLIENT_FILE) {
            config::load_json(CLIENT_FILE)?
        } else {
            Self::from_env()?
        };
        config.with_server_fallback()
    }

    /// Load config from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config: Self = config::load_json_file(path)?;
        config.with_server_fallback()
    }

    /// Parse config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse client config JSON")?;
        config.with_server_fallback()
    }

    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let address = std::env::var("MAIL3_ADDRESS")
            .context("MAIL3_ADDRESS environment variable not set")?;
        let server_url = std::env::var("MAIL3_SERVER_URL").unwrap_or_default();

        let mut config = Self::new(server_url, address);
        config.session_token = std::env::var("MAIL3_SESSION_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        Ok(config)
    }

    /// Persist this config to the Mail3 config directory
    pub fn save(&self) -> Result<()> {
        config::save_json(CLIENT_FILE, self)
    }

    /// Get the default config file path (~/.config/mail3/client.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CLIENT_FILE)
    }

    /// Server URL embedded at build time.
    /// Build with: MAIL3_SERVER_URL=https://... cargo build --release
    pub fn compile_time_server_url() -> Option<&'static str> {
        option_env!("MAIL3_SERVER_URL").filter(|url| !url.is_empty())
    }

    fn with_server_fallback(mut self) -> Result<Self> {
        if self.server_url.trim().is_empty() {
            self.server_url = Self::compile_time_server_url()
                .context("No server URL configured (set MAIL3_SERVER_URL)")?
                .to_string();
        }
        if self.address.trim().is_empty() {
            anyhow::bail!("Client config has an empty address");
        }
        Ok(self)
    }
}
