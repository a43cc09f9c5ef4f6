//! Runtime error types.

use adbridge_sdk::BridgeError;

use crate::config::ConfigError;

/// Errors that can occur while setting up a bridge.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Module table could not be assembled
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Worker threads could not be spawned
    #[error("Failed to start worker pool: {0}")]
    Io(#[from] std::io::Error),
}
