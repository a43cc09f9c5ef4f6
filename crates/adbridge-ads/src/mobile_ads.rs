//! Core SDK module (`RNGoogleMobileAdsModule`)

use adbridge_sdk::{
    ArgType, BridgeModule, BridgeResult, BridgeValue, HandlerFailure, HandlerOutcome,
    MethodSignature, ValueMap,
};

use crate::options::{to_bridge, DebugGeography, MaxAdContentRating, RequestConfiguration};
use crate::{decode_options, AdsContext, ADS_NAMESPACE};

/// Module name
pub const MODULE_NAME: &str = "RNGoogleMobileAdsModule";

/// Constant tables exposed through `getConstants`
pub fn constants() -> BridgeValue {
    let ratings: ValueMap = MaxAdContentRating::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), BridgeValue::from(r.as_str())))
        .collect();
    let geographies: ValueMap = DebugGeography::ALL
        .iter()
        .map(|(_, name, code)| (name.to_string(), BridgeValue::from(*code)))
        .collect();

    BridgeValue::object_from([
        ("MAX_AD_CONTENT_RATING", BridgeValue::Object(ratings)),
        ("DEBUG_GEOGRAPHY", BridgeValue::Object(geographies)),
    ])
}

/// Build the core module
pub fn module(ctx: &AdsContext) -> BridgeResult<BridgeModule> {
    let init_backend = ctx.backend.clone();
    let config_backend = ctx.backend.clone();
    let inspector_backend = ctx.backend.clone();
    let debug_backend = ctx.backend.clone();
    let volume_backend = ctx.backend.clone();
    let muted_backend = ctx.backend.clone();

    BridgeModule::builder(MODULE_NAME)
        .method("getConstants", MethodSignature::value(), |_| {
            Ok(constants().into())
        })
        .method("initialize", MethodSignature::promise(), move |_| {
            let backend = init_backend.clone();
            Ok(HandlerOutcome::blocking(move || {
                let statuses = backend
                    .initialize()
                    .map_err(|e| e.into_failure(ADS_NAMESPACE))?;
                to_bridge(&statuses)
            }))
        })
        .method(
            "setRequestConfiguration",
            MethodSignature::promise().optional(ArgType::Object),
            move |args| {
                let config: RequestConfiguration = decode_options(args, 0)?;
                let backend = config_backend.clone();
                Ok(HandlerOutcome::blocking(move || {
                    backend
                        .set_request_configuration(&config)
                        .map(|()| BridgeValue::Undefined)
                        .map_err(|e| e.into_failure(ADS_NAMESPACE))
                }))
            },
        )
        .method("openAdInspector", MethodSignature::promise(), move |_| {
            let backend = inspector_backend.clone();
            Ok(HandlerOutcome::blocking(move || {
                backend
                    .open_ad_inspector()
                    .map(|()| BridgeValue::Undefined)
                    .map_err(|e| e.into_failure(ADS_NAMESPACE))
            }))
        })
        .method(
            "openDebugMenu",
            MethodSignature::void().required(ArgType::String),
            move |args| {
                debug_backend.open_debug_menu(args.string(0)?);
                Ok(HandlerOutcome::done())
            },
        )
        .method(
            "setAppVolume",
            MethodSignature::void().required(ArgType::Number),
            move |args| {
                let volume = args.number(0)?;
                if !(0.0..=1.0).contains(&volume) {
                    return Err(HandlerFailure::new(
                        format!("{}/invalid-volume", ADS_NAMESPACE),
                        format!("volume must be between 0 and 1, got {}", volume),
                    ));
                }
                volume_backend.set_app_volume(volume);
                Ok(HandlerOutcome::done())
            },
        )
        .method(
            "setAppMuted",
            MethodSignature::void().required(ArgType::Bool),
            move |args| {
                muted_backend.set_app_muted(args.boolean(0)?);
                Ok(HandlerOutcome::done())
            },
        )
        .build()
}
