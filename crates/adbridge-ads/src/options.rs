//! Typed option objects and result payloads
//!
//! Option objects arrive as bridge objects and are decoded with serde
//! (`camelCase` field names, unknown fields ignored). Result payloads are
//! encoded back the same way.

use adbridge_sdk::{BridgeValue, HandlerFailure};
use serde::{Deserialize, Serialize};

/// Ad request options passed to `*Load`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestOptions {
    /// Only request non-personalized ads
    pub request_non_personalized_ads_only: bool,
    /// Targeting keywords
    pub keywords: Vec<String>,
    /// Content URL for targeting
    pub content_url: Option<String>,
    /// Neighboring content URLs
    pub neighboring_content_urls: Vec<String>,
    /// Request agent string
    pub request_agent: Option<String>,
    /// Mediation network extras
    pub network_extras: Option<serde_json::Map<String, serde_json::Value>>,
    /// Rewarded server-side verification
    pub server_side_verification_options: Option<ServerSideVerificationOptions>,
}

/// Server-side verification for rewarded formats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSideVerificationOptions {
    /// User id forwarded to the SSV callback
    pub user_id: Option<String>,
    /// Custom data forwarded to the SSV callback
    pub custom_data: Option<String>,
}

/// Options passed to `*Show`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowOptions {
    /// Android immersive mode while the ad is shown
    pub immersive_mode_enabled: bool,
}

/// Maximum ad content rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxAdContentRating {
    /// General audiences
    G,
    /// Parental guidance
    PG,
    /// Teen
    T,
    /// Mature audiences
    MA,
}

impl MaxAdContentRating {
    /// All ratings in ascending order
    pub const ALL: [MaxAdContentRating; 4] = [
        MaxAdContentRating::G,
        MaxAdContentRating::PG,
        MaxAdContentRating::T,
        MaxAdContentRating::MA,
    ];

    /// Rating as sent over the bridge
    pub const fn as_str(self) -> &'static str {
        match self {
            MaxAdContentRating::G => "G",
            MaxAdContentRating::PG => "PG",
            MaxAdContentRating::T => "T",
            MaxAdContentRating::MA => "MA",
        }
    }
}

/// Global request configuration (`setRequestConfiguration`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestConfiguration {
    /// Content rating ceiling
    pub max_ad_content_rating: Option<MaxAdContentRating>,
    /// COPPA child-directed treatment
    pub tag_for_child_directed_treatment: Option<bool>,
    /// Under age of consent (GDPR)
    pub tag_for_under_age_of_consent: Option<bool>,
    /// Devices that receive test ads
    pub test_device_identifiers: Vec<String>,
}

/// Debug geography for consent testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugGeography {
    /// No override
    #[default]
    Disabled,
    /// Pretend to be in the EEA
    Eea,
    /// Pretend to be outside the EEA
    NotEea,
    /// Pretend to be in a regulated US state
    RegulatedUsState,
    /// Pretend to be in another region
    Other,
}

impl DebugGeography {
    /// All geographies with their wire values
    pub const ALL: [(DebugGeography, &'static str, i32); 5] = [
        (DebugGeography::Disabled, "DISABLED", 0),
        (DebugGeography::Eea, "EEA", 1),
        (DebugGeography::NotEea, "NOT_EEA", 2),
        (DebugGeography::RegulatedUsState, "REGULATED_US_STATE", 3),
        (DebugGeography::Other, "OTHER", 4),
    ];

    /// Wire value
    pub fn code(self) -> i32 {
        Self::ALL
            .iter()
            .find(|(geo, _, _)| *geo == self)
            .map(|(_, _, code)| *code)
            .unwrap_or(0)
    }

    /// Parse a wire value
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, _, c)| *c == code)
            .map(|(geo, _, _)| *geo)
    }
}

impl Serialize for DebugGeography {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for DebugGeography {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        DebugGeography::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown debug geography {}", code)))
    }
}

/// Options for `requestInfoUpdate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentRequestOptions {
    /// Geography override for testing
    pub debug_geography: DebugGeography,
    /// Under age of consent
    pub tag_for_under_age_of_consent: bool,
    /// Devices that get the debug geography
    pub test_identifiers: Vec<String>,
}

/// User consent status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentStatus {
    /// Not yet determined
    #[default]
    Unknown,
    /// Consent required, not yet obtained
    Required,
    /// Consent not required
    NotRequired,
    /// Consent obtained
    Obtained,
}

/// Whether a privacy options entry point must be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyOptionsRequirementStatus {
    /// Not yet determined
    #[default]
    Unknown,
    /// Entry point required
    Required,
    /// Entry point not required
    NotRequired,
}

/// Consent state returned by the consent methods
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentInfo {
    /// Consent status
    pub status: ConsentStatus,
    /// Whether ads may be requested
    pub can_request_ads: bool,
    /// Privacy options entry point requirement
    pub privacy_options_requirement_status: PrivacyOptionsRequirementStatus,
    /// Whether a consent form can be loaded
    pub is_consent_form_available: bool,
}

/// Mediation adapter state after `initialize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterStatus {
    /// Adapter class name
    pub name: String,
    /// Human readable description
    pub description: String,
    /// 0 = not ready, 1 = ready
    pub state: i32,
}

/// Native ad request options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeAdRequestOptions {
    /// Common request options
    #[serde(flatten)]
    pub request: RequestOptions,
    /// Corner for the AdChoices overlay
    pub ad_choices_placement: Option<i32>,
    /// Media aspect ratio preference
    pub aspect_ratio: Option<i32>,
    /// Start videos muted
    pub start_video_muted: Option<bool>,
}

/// Loaded native ad assets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAd {
    /// Response id, used as the handle for `destroy`
    pub response_id: String,
    /// Headline text
    pub headline: String,
    /// Body text
    pub body: Option<String>,
    /// Advertiser name
    pub advertiser: Option<String>,
    /// Call to action text
    pub call_to_action: Option<String>,
    /// Star rating (0-5)
    pub star_rating: Option<f64>,
    /// Price text
    pub price: Option<String>,
    /// Store name
    pub store: Option<String>,
}

/// Encode a serde value as a bridge value
pub fn to_bridge<T: Serialize>(value: &T) -> Result<BridgeValue, HandlerFailure> {
    serde_json::to_value(value)
        .map(BridgeValue::from)
        .map_err(|e| HandlerFailure::new("googleMobileAds/internal", e.to_string()))
}
