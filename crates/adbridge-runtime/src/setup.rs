//! One-call construction of a bridge serving the Google Mobile Ads modules

use std::sync::Arc;

use adbridge_ads::{build_modules, AdEventHub, AdsBackend, AdsContext};

use crate::config::BridgeConfig;
use crate::dispatcher::Bridge;
use crate::error::RuntimeError;

/// Build a bridge exposing every ads module, backed by `backend`.
///
/// Load outcomes and other lifecycle events are published on `events`.
pub fn google_mobile_ads(
    backend: Arc<dyn AdsBackend>,
    events: AdEventHub,
    config: BridgeConfig,
) -> Result<Bridge, RuntimeError> {
    let ctx = AdsContext::with_events(backend, events);
    Bridge::builder()
        .config(config)
        .modules(build_modules(&ctx)?)
        .build()
}
