/*
[INPUT]:  YAML configuration file, optional BYTEWALLET_API_KEY override
[OUTPUT]: Parsed gateway, callback server and logging configuration
[POS]:    Configuration layer - merchant setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use bytewallet_adapter::{ClientConfig, Credentials};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api_key` from the file
pub const API_KEY_ENV: &str = "BYTEWALLET_API_KEY";

/// Top-level configuration for the merchant client
#[derive(Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Merchant number issued by the gateway
    pub merchant_id: String,
    /// Shared signing secret
    pub api_key: String,
    /// Gateway base URL
    #[serde(default = "default_gateway_address")]
    pub gateway_address: String,
    /// Callback URL registered with new addresses and withdrawals
    pub call_url: String,
    /// Fail on non-200 `code` fields in responses
    #[serde(default)]
    pub strict_gateway_errors: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub callback: CallbackServerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Where the callback server listens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_callback_path")]
    pub path: String,
}

impl Default for CallbackServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            path: default_callback_path(),
        }
    }
}

/// Daily log file settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_log_prefix")]
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file_prefix: default_log_prefix(),
        }
    }
}

fn default_gateway_address() -> String {
    "https://api.ByteWallets.io".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_callback_path() -> String {
    "/callUrl".to_string()
}

fn default_log_dir() -> String {
    "log".to_string()
}

fn default_log_prefix() -> String {
    "bytewallet".to_string()
}

impl GatewayConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse YAML config")?;
        Ok(config)
    }

    /// Replace the file's api_key with `BYTEWALLET_API_KEY` when set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.merchant_id.trim().is_empty() {
            bail!("merchant_id must not be empty");
        }
        if self.api_key.is_empty() {
            bail!("api_key must not be empty (set it in the file or via {API_KEY_ENV})");
        }
        if self.call_url.trim().is_empty() {
            bail!("call_url must not be empty");
        }
        if !self.callback.path.starts_with('/') {
            bail!("callback.path must start with '/', got {:?}", self.callback.path);
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be positive");
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.merchant_id.clone(),
            self.api_key.clone(),
            self.gateway_address.clone(),
            self.call_url.clone(),
        )
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            strict_gateway_errors: self.strict_gateway_errors,
        }
    }
}
