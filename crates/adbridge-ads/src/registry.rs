//! The complete Google Mobile Ads module set
//!
//! Builds every module exposed to the scripting side from one shared
//! [`AdsContext`].

use adbridge_sdk::{BridgeModule, BridgeResult};

use crate::backend::AdFormat;
use crate::{consent, fullscreen, mobile_ads, native_ads, AdsContext};

/// Names of all modules built by [`build_modules`]
pub const MODULE_NAMES: [&str; 7] = [
    AdFormat::AppOpen.module_name(),
    AdFormat::Interstitial.module_name(),
    AdFormat::Rewarded.module_name(),
    AdFormat::RewardedInterstitial.module_name(),
    consent::MODULE_NAME,
    mobile_ads::MODULE_NAME,
    native_ads::MODULE_NAME,
];

/// Build all ads modules against `ctx`
pub fn build_modules(ctx: &AdsContext) -> BridgeResult<Vec<BridgeModule>> {
    let mut modules = Vec::with_capacity(MODULE_NAMES.len());
    for format in AdFormat::ALL {
        modules.push(fullscreen::module(format, ctx)?);
    }
    modules.push(consent::module(ctx)?);
    modules.push(mobile_ads::module(ctx)?);
    modules.push(native_ads::module(ctx)?);
    Ok(modules)
}
