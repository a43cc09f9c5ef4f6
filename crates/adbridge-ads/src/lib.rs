//! Google Mobile Ads modules for the adbridge dispatcher
//!
//! Each module validates and decodes its arguments, then hands the real work
//! to an [`AdsBackend`]. Backend calls that may block (loading, presenting,
//! consent forms) are returned as blocking work so the dispatcher can run
//! them off the calling thread.
//!
//! ```ignore
//! let ctx = AdsContext::new(Arc::new(MyBackend::default()));
//! let events = ctx.events.subscribe();
//! let modules = adbridge_ads::build_modules(&ctx)?;
//! ```

#![warn(missing_docs)]

use std::sync::Arc;

use adbridge_sdk::{CallArgs, HandlerFailure};
use serde::de::DeserializeOwned;

pub mod backend;
pub mod consent;
pub mod events;
pub mod fullscreen;
pub mod mobile_ads;
pub mod native_ads;
pub mod options;
pub mod registry;

pub use backend::{AdError, AdFormat, AdsBackend, TcfValue};
pub use events::{AdEvent, AdEventHub, AdEventKind};
pub use options::{
    AdapterStatus, ConsentInfo, ConsentRequestOptions, ConsentStatus, DebugGeography,
    MaxAdContentRating, NativeAd, NativeAdRequestOptions, PrivacyOptionsRequirementStatus,
    RequestConfiguration, RequestOptions, ServerSideVerificationOptions, ShowOptions,
};
pub use registry::{build_modules, MODULE_NAMES};

/// Error code namespace for ads failures
pub const ADS_NAMESPACE: &str = "googleMobileAds";

/// Error code namespace for consent failures
pub const CONSENT_NAMESPACE: &str = "consent";

/// Shared state handed to every module
#[derive(Clone)]
pub struct AdsContext {
    /// Native SDK collaborator
    pub backend: Arc<dyn AdsBackend>,
    /// Lifecycle event fan-out
    pub events: AdEventHub,
}

impl AdsContext {
    /// Context with a fresh event hub
    pub fn new(backend: Arc<dyn AdsBackend>) -> Self {
        Self {
            backend,
            events: AdEventHub::new(),
        }
    }

    /// Context publishing to an existing hub
    pub fn with_events(backend: Arc<dyn AdsBackend>, events: AdEventHub) -> Self {
        Self { backend, events }
    }
}

impl std::fmt::Debug for AdsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdsContext")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// Decode an option object, failing as `googleMobileAds/invalid-options`
pub(crate) fn decode_options<T>(args: &CallArgs, index: usize) -> Result<T, HandlerFailure>
where
    T: DeserializeOwned + Default,
{
    args.decode(index)
        .map_err(|f| HandlerFailure::new(format!("{}/invalid-options", ADS_NAMESPACE), f.message))
}
