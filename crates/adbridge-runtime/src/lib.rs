//! adbridge runtime
//!
//! Binds registered modules to a [`Bridge`] dispatcher, runs blocking
//! handler work on a worker pool, and loads configuration.
//!
//! ```ignore
//! let config = BridgeConfig::load("adbridge.toml")?;
//! adbridge_runtime::logging::init(&config.logging)?;
//! let bridge = adbridge_runtime::google_mobile_ads(backend, AdEventHub::new(), config)?;
//! let pending = bridge
//!     .invoke("RNGoogleMobileAdsModule", "initialize", vec![])?
//!     .into_pending();
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod pool;
pub mod setup;

pub use config::{BridgeConfig, ConfigError, LoggingConfig, PoolConfig};
pub use dispatcher::{Bridge, BridgeBuilder, Invocation};
pub use error::RuntimeError;
pub use pool::{Completion, WorkerPool};
pub use setup::google_mobile_ads;
