//! Configuration for the distribution pipeline

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Distribution run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recipient list path
    pub distribution_file: PathBuf,

    /// Audit artifact path
    pub output_file: PathBuf,

    /// Input field delimiter
    pub delimiter: char,

    /// Network client configuration
    pub network: NetworkConfig,

    /// Batching configuration
    pub batch: BatchConfig,

    /// Pre-flight gate configuration
    pub preflight: PreflightConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distribution_file: PathBuf::from("./distribution.csv"),
            output_file: PathBuf::from("./completed_transfers.csv"),
            delimiter: ',',
            network: NetworkConfig::default(),
            batch: BatchConfig::default(),
            preflight: PreflightConfig::default(),
        }
    }
}

/// Ledger network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// RPC endpoint URL
    pub endpoint: String,

    /// Token/contract identifier
    pub token_contract: String,

    /// Confirmation poll cadence in milliseconds
    pub poll_interval_ms: u64,

    /// Overall confirmation wait timeout in seconds
    pub confirmation_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8545".to_string(),
            token_contract: "DRP".to_string(),
            poll_interval_ms: 2000,
            confirmation_timeout_secs: 300, // 5 minutes
        }
    }
}

/// Batching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Transfers per batch transaction
    pub capacity: usize,

    /// Blocks a transaction must be buried under before it counts as final
    pub confirmation_depth: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            confirmation_depth: 3,
        }
    }
}

/// Pre-flight gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflightConfig {
    /// Mandatory pause before the first submission, in seconds
    pub pause_secs: u64,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self { pause_secs: 10 }
    }
}

impl Config {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load defaults with environment variable overrides
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        if let Ok(path) = std::env::var("DISTRIBUTOR_FILE") {
            config.distribution_file = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("DISTRIBUTOR_OUTPUT") {
            config.output_file = PathBuf::from(path);
        }

        if let Ok(delim) = std::env::var("DISTRIBUTOR_DELIMITER") {
            if let Some(c) = delim.chars().next() {
                config.delimiter = c;
            }
        }

        if let Ok(endpoint) = std::env::var("DISTRIBUTOR_ENDPOINT") {
            config.network.endpoint = endpoint;
        }

        if let Ok(token) = std::env::var("DISTRIBUTOR_TOKEN_CONTRACT") {
            config.network.token_contract = token;
        }

        if let Ok(capacity) = std::env::var("DISTRIBUTOR_BATCH_CAPACITY") {
            if let Ok(capacity) = capacity.parse() {
                config.batch.capacity = capacity;
            }
        }

        if let Ok(depth) = std::env::var("DISTRIBUTOR_CONFIRMATION_DEPTH") {
            if let Ok(depth) = depth.parse() {
                config.batch.confirmation_depth = depth;
            }
        }

        if let Ok(pause) = std::env::var("DISTRIBUTOR_PAUSE_SECS") {
            if let Ok(pause) = pause.parse() {
                config.preflight.pause_secs = pause;
            }
        }

        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.batch.capacity == 0 {
            return Err(Error::Config(
                "batch capacity must be at least 1".to_string(),
            ));
        }
        if self.batch.confirmation_depth == 0 {
            return Err(Error::Config(
                "confirmation depth must be at least 1".to_string(),
            ));
        }
        if self.network.endpoint.is_empty() {
            return Err(Error::Config("network endpoint is required".to_string()));
        }
        if self.network.token_contract.is_empty() {
            return Err(Error::Config("token contract is required".to_string()));
        }
        if !self.delimiter.is_ascii() {
            return Err(Error::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.batch.capacity, 10);
        assert_eq!(config.batch.confirmation_depth, 3);
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.preflight.pause_secs, 10);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::default();
        config.batch.capacity = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let mut config = Config::default();
        config.batch.confirmation_depth = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let mut config = Config::default();
        config.network.endpoint.clear();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_file_with_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
distribution_file = "./recipients.csv"

[batch]
capacity = 25

[network]
endpoint = "http://ledger.internal:8545"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.distribution_file, PathBuf::from("./recipients.csv"));
        assert_eq!(config.batch.capacity, 25);
        // Unspecified fields keep their defaults
        assert_eq!(config.batch.confirmation_depth, 3);
        assert_eq!(config.network.endpoint, "http://ledger.internal:8545");
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "batch = \"not a table\"").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_env_yields_valid_config() {
        let config = Config::from_env().unwrap();
        config.validate().unwrap();
    }
}
