//! Bridge configuration (adbridge.toml)
//!
//! Every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level bridge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    /// Worker pool for blocking handler work
    #[serde(default)]
    pub pool: PoolConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Worker pool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoolConfig {
    /// Number of worker threads (0 = one per CPU)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Max queued jobs before new ones are rejected (0 = unbounded)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Worker thread name prefix
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
}

fn default_workers() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    256
}

fn default_thread_name() -> String {
    "adbridge-io".to_string()
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            thread_name: default_thread_name(),
        }
    }
}

impl PoolConfig {
    /// Effective worker count
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Colored output
    #[serde(default)]
    pub ansi: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ansi: false,
        }
    }
}

impl BridgeConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BridgeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.thread_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "pool.thread_name must not be empty".to_string(),
            ));
        }
        if self.pool.workers > 256 {
            return Err(ConfigError::Invalid(format!(
                "pool.workers = {} exceeds the limit of 256",
                self.pool.workers
            )));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.pool.workers, 2);
        assert_eq!(config.pool.queue_capacity, 256);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
[pool]
workers = 4
queue_capacity = 0
thread_name = "ads-io"

[logging]
filter = "adbridge_runtime=debug"
ansi = true
"#;
        let config = BridgeConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.pool.worker_count(), 4);
        assert_eq!(config.pool.queue_capacity, 0);
        assert_eq!(config.pool.thread_name, "ads-io");
        assert_eq!(config.logging.filter, "adbridge_runtime=debug");
        assert!(config.logging.ansi);
    }

    #[test]
    fn test_zero_workers_means_cpu_count() {
        let pool = PoolConfig {
            workers: 0,
            ..PoolConfig::default()
        };
        assert!(pool.worker_count() >= 1);
    }

    #[test]
    fn test_invalid_thread_name() {
        let err = BridgeConfig::from_toml_str("[pool]\nthread_name = \" \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = BridgeConfig::from_toml_str("[pool]\nworkers = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
