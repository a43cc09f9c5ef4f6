//! The native ads collaborator
//!
//! Everything that actually talks to the ads SDK (loading, presenting,
//! consent UI) sits behind [`AdsBackend`]. Handlers only validate, decode
//! options, and schedule backend calls; backend calls may block and are run
//! on the bridge's worker pool unless noted otherwise.

use adbridge_sdk::HandlerFailure;
use thiserror::Error;

use crate::options::{
    AdapterStatus, ConsentInfo, ConsentRequestOptions, NativeAd, NativeAdRequestOptions,
    RequestConfiguration, RequestOptions, ShowOptions,
};

/// A failure reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct AdError {
    /// Short machine-readable code (`no-fill`, `not-ready`, ...)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl AdError {
    /// Create a new backend error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Convert into a rejection payload under `namespace`
    pub fn into_failure(self, namespace: &str) -> HandlerFailure {
        HandlerFailure::new(format!("{}/{}", namespace, self.code), self.message)
    }
}

/// Full-screen ad formats sharing the load/show protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdFormat {
    /// App open ad
    AppOpen,
    /// Interstitial ad
    Interstitial,
    /// Rewarded ad
    Rewarded,
    /// Rewarded interstitial ad
    RewardedInterstitial,
}

impl AdFormat {
    /// All full-screen formats
    pub const ALL: [AdFormat; 4] = [
        AdFormat::AppOpen,
        AdFormat::Interstitial,
        AdFormat::Rewarded,
        AdFormat::RewardedInterstitial,
    ];

    /// Bridge module name
    pub const fn module_name(self) -> &'static str {
        match self {
            AdFormat::AppOpen => "RNGoogleMobileAdsAppOpenModule",
            AdFormat::Interstitial => "RNGoogleMobileAdsInterstitialModule",
            AdFormat::Rewarded => "RNGoogleMobileAdsRewardedModule",
            AdFormat::RewardedInterstitial => "RNGoogleMobileAdsRewardedInterstitialModule",
        }
    }

    /// Method name prefix (`appOpen` for `appOpenLoad`/`appOpenShow`)
    pub const fn method_prefix(self) -> &'static str {
        match self {
            AdFormat::AppOpen => "appOpen",
            AdFormat::Interstitial => "interstitial",
            AdFormat::Rewarded => "rewarded",
            AdFormat::RewardedInterstitial => "rewardedInterstitial",
        }
    }

    /// Event channel name delivered to the scripting side
    pub const fn event_name(self) -> &'static str {
        match self {
            AdFormat::AppOpen => "google_mobile_ads_app_open_event",
            AdFormat::Interstitial => "google_mobile_ads_interstitial_event",
            AdFormat::Rewarded => "google_mobile_ads_rewarded_event",
            AdFormat::RewardedInterstitial => "google_mobile_ads_rewarded_interstitial_event",
        }
    }

    /// Whether the format grants rewards
    pub const fn is_rewarded(self) -> bool {
        matches!(self, AdFormat::Rewarded | AdFormat::RewardedInterstitial)
    }
}

impl std::fmt::Display for AdFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method_prefix())
    }
}

/// Native ads SDK operations.
///
/// Implementations must be thread-safe; the bridge calls them from worker
/// threads, possibly concurrently. Methods returning `()` are fire-and-forget
/// from the caller's point of view.
pub trait AdsBackend: Send + Sync {
    // Full-screen formats

    /// Load an ad. Blocks until loaded or failed.
    fn load(
        &self,
        format: AdFormat,
        request_id: i32,
        ad_unit_id: &str,
        options: &RequestOptions,
    ) -> Result<(), AdError>;

    /// Present a previously loaded ad. Blocks until the ad is on screen.
    fn show(
        &self,
        format: AdFormat,
        request_id: i32,
        ad_unit_id: &str,
        options: &ShowOptions,
    ) -> Result<(), AdError>;

    // Core SDK

    /// Initialize the SDK and mediation adapters
    fn initialize(&self) -> Result<Vec<AdapterStatus>, AdError>;

    /// Apply a global request configuration
    fn set_request_configuration(&self, config: &RequestConfiguration) -> Result<(), AdError>;

    /// Open the ad inspector; returns when it is dismissed
    fn open_ad_inspector(&self) -> Result<(), AdError>;

    /// Open the debug menu for an ad unit. Called on the caller's thread.
    fn open_debug_menu(&self, ad_unit_id: &str);

    /// Set the app volume (0.0 - 1.0). Called on the caller's thread.
    fn set_app_volume(&self, volume: f64);

    /// Mute or unmute app audio. Called on the caller's thread.
    fn set_app_muted(&self, muted: bool);

    // Consent (UMP)

    /// Refresh consent information
    fn request_consent_info_update(
        &self,
        options: &ConsentRequestOptions,
    ) -> Result<ConsentInfo, AdError>;

    /// Show the consent form
    fn show_consent_form(&self) -> Result<ConsentInfo, AdError>;

    /// Show the privacy options form
    fn show_privacy_options_form(&self) -> Result<ConsentInfo, AdError>;

    /// Load and show the consent form when consent is required
    fn load_and_show_consent_form_if_required(&self) -> Result<ConsentInfo, AdError>;

    /// Current consent information
    fn consent_info(&self) -> Result<ConsentInfo, AdError>;

    /// Stored IAB TCF value (`IABTCF_TCString`, `IABTCF_gdprApplies`, ...)
    fn tcf_value(&self, key: &str) -> Result<Option<TcfValue>, AdError>;

    /// Forget all consent state. Called on the caller's thread.
    fn reset_consent(&self);

    // Native ads

    /// Load a native ad
    fn load_native(
        &self,
        ad_unit_id: &str,
        options: &NativeAdRequestOptions,
    ) -> Result<NativeAd, AdError>;

    /// Release a native ad by response id. Called on the caller's thread.
    fn destroy_native(&self, response_id: &str);
}

/// A value from IAB TCF storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TcfValue {
    /// String entry
    String(String),
    /// Integer entry
    Int(i64),
}
