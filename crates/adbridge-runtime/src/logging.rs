//! Log output setup
//!
//! The crates log through `tracing`; this installs a fmt subscriber for
//! hosts that do not bring their own.

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, LoggingConfig};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.filter`. Returns `Ok(false)` if a global
/// subscriber was already installed (by an earlier call or by the host).
pub fn init(config: &LoggingConfig) -> Result<bool, ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| ConfigError::Invalid(format!("logging.filter: {}", e)))?,
    };

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(true)
        .try_init()
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        let first = init(&config).unwrap();
        let second = init(&config).unwrap();
        assert!(!(first && second));
    }
}
