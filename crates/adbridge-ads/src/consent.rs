//! User Messaging Platform consent module

use adbridge_sdk::{
    ArgType, BridgeModule, BridgeResult, BridgeValue, HandlerFailure, HandlerOutcome,
    MethodSignature,
};

use crate::backend::{AdError, AdsBackend, TcfValue};
use crate::options::{to_bridge, ConsentInfo, ConsentRequestOptions};
use crate::{decode_options, AdsContext, CONSENT_NAMESPACE};

/// Module name
pub const MODULE_NAME: &str = "RNGoogleMobileAdsConsentModule";

const TC_STRING: &str = "IABTCF_TCString";
const GDPR_APPLIES: &str = "IABTCF_gdprApplies";
const PURPOSE_CONSENTS: &str = "IABTCF_PurposeConsents";
const PURPOSE_LEGITIMATE_INTERESTS: &str = "IABTCF_PurposeLegitimateInterests";

type ConsentCall = fn(&dyn AdsBackend) -> Result<ConsentInfo, AdError>;
type TcfRead = fn(&dyn AdsBackend) -> Result<BridgeValue, HandlerFailure>;

/// Build the consent module
pub fn module(ctx: &AdsContext) -> BridgeResult<BridgeModule> {
    let update_ctx = ctx.clone();
    let builder = BridgeModule::builder(MODULE_NAME).method(
        "requestInfoUpdate",
        MethodSignature::promise().optional(ArgType::Object),
        move |args| {
            let options: ConsentRequestOptions = decode_options(args, 0)?;
            let backend = update_ctx.backend.clone();
            Ok(HandlerOutcome::blocking(move || {
                consent_result(backend.request_consent_info_update(&options))
            }))
        },
    );

    // Form flows block on user interaction.
    let flows: [(&str, ConsentCall); 3] = [
        ("showForm", |b| b.show_consent_form()),
        ("showPrivacyOptionsForm", |b| b.show_privacy_options_form()),
        (
            "loadAndShowConsentFormIfRequired",
            |b| b.load_and_show_consent_form_if_required(),
        ),
    ];
    let builder = flows.into_iter().fold(builder, |builder, (name, call)| {
        let backend = ctx.backend.clone();
        builder.method(name, MethodSignature::promise(), move |_| {
            let backend = backend.clone();
            Ok(HandlerOutcome::blocking(move || consent_result(call(backend.as_ref()))))
        })
    });

    let info_backend = ctx.backend.clone();
    let builder = builder.method("getConsentInfo", MethodSignature::promise(), move |_| {
        let backend = info_backend.clone();
        Ok(HandlerOutcome::blocking(move || consent_result(backend.consent_info())))
    });

    // TCF reads hit platform storage, so they run on the pool as well.
    let reads: [(&str, TcfRead); 4] = [
        ("getTCString", |b| tcf_string(b, TC_STRING)),
        ("getGdprApplies", gdpr_applies),
        ("getPurposeConsents", |b| tcf_string(b, PURPOSE_CONSENTS)),
        ("getPurposeLegitimateInterests", |b| {
            tcf_string(b, PURPOSE_LEGITIMATE_INTERESTS)
        }),
    ];
    let builder = reads.into_iter().fold(builder, |builder, (name, read)| {
        let backend = ctx.backend.clone();
        builder.method(name, MethodSignature::promise(), move |_| {
            let backend = backend.clone();
            Ok(HandlerOutcome::blocking(move || read(backend.as_ref())))
        })
    });

    let reset_backend = ctx.backend.clone();
    builder
        .method("reset", MethodSignature::void(), move |_| {
            reset_backend.reset_consent();
            Ok(HandlerOutcome::done())
        })
        .build()
}

fn consent_result(result: Result<ConsentInfo, AdError>) -> Result<BridgeValue, HandlerFailure> {
    let info = result.map_err(|e| e.into_failure(CONSENT_NAMESPACE))?;
    to_bridge(&info)
}

fn tcf(backend: &dyn AdsBackend, key: &str) -> Result<Option<TcfValue>, HandlerFailure> {
    backend
        .tcf_value(key)
        .map_err(|e| e.into_failure(CONSENT_NAMESPACE))
}

fn gdpr_applies(backend: &dyn AdsBackend) -> Result<BridgeValue, HandlerFailure> {
    let applies = match tcf(backend, GDPR_APPLIES)? {
        Some(TcfValue::Int(n)) => n == 1,
        Some(TcfValue::String(s)) => s == "1",
        None => false,
    };
    Ok(BridgeValue::Bool(applies))
}

/// String entries read as "" when unset
fn tcf_string(backend: &dyn AdsBackend, key: &str) -> Result<BridgeValue, HandlerFailure> {
    Ok(match tcf(backend, key)? {
        Some(TcfValue::String(s)) => BridgeValue::String(s),
        Some(TcfValue::Int(n)) => BridgeValue::String(n.to_string()),
        None => BridgeValue::String(String::new()),
    })
}
