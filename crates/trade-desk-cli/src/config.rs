/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed desk configuration and adapter client settings
[POS]:    Configuration layer - credentials and endpoint setup
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use serde::{Deserialize, Serialize};
use trade_desk_adapter::ClientConfig;

/// Connection settings for the exchange REST API
#[derive(Clone, Deserialize, Serialize)]
pub struct DeskConfig {
    /// Base URL, e.g. "https://api.exchange.example.com"
    pub url: String,
    /// API key identifier
    pub key: String,
    /// API secret (base64 encoded)
    pub secret: String,
    /// API passphrase
    pub passphrase: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    100
}

impl DeskConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.url, &self.key, &self.secret, &self.passphrase)
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

impl std::fmt::Debug for DeskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskConfig")
            .field("url", &self.url)
            .field("key", &self.key)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}
