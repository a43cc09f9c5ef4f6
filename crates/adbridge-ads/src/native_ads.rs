//! Native ad module (`RNGoogleMobileAdsNativeModule`)

use adbridge_sdk::{ArgType, BridgeModule, BridgeResult, HandlerOutcome, MethodSignature};

use crate::options::{to_bridge, NativeAdRequestOptions};
use crate::{decode_options, AdsContext, ADS_NAMESPACE};

/// Module name
pub const MODULE_NAME: &str = "RNGoogleMobileAdsNativeModule";

/// Build the native ad module
pub fn module(ctx: &AdsContext) -> BridgeResult<BridgeModule> {
    let load_backend = ctx.backend.clone();
    let destroy_backend = ctx.backend.clone();

    BridgeModule::builder(MODULE_NAME)
        .method(
            "load",
            MethodSignature::promise()
                .required(ArgType::String)
                .required(ArgType::Object),
            move |args| {
                let ad_unit_id = args.string(0)?.to_string();
                let options: NativeAdRequestOptions = decode_options(args, 1)?;
                let backend = load_backend.clone();
                Ok(HandlerOutcome::blocking(move || {
                    let ad = backend
                        .load_native(&ad_unit_id, &options)
                        .map_err(|e| e.into_failure(ADS_NAMESPACE))?;
                    to_bridge(&ad)
                }))
            },
        )
        .method(
            "destroy",
            MethodSignature::void().required(ArgType::String),
            move |args| {
                destroy_backend.destroy_native(args.string(0)?);
                Ok(HandlerOutcome::done())
            },
        )
        .build()
}
