//! Full-screen formats: app open, interstitial, rewarded, rewarded interstitial
//!
//! All four share the same two methods, prefixed by the format:
//!
//! - `<prefix>Load(requestId: number, adUnitId: string, options: object)`:
//!   void; the outcome is published as a `loaded` or `error` event, including
//!   when the worker pool rejects or loses the load.
//! - `<prefix>Show(requestId: number, adUnitId: string, options?: object)`:
//!   promise; resolves once the ad is presented.

use adbridge_sdk::{
    ArgType, BridgeModule, BridgeResult, BridgeValue, CallArgs, HandlerFailure, HandlerOutcome,
    HandlerResult, MethodSignature,
};
use tracing::debug;

use crate::backend::AdFormat;
use crate::events::{AdEvent, AdEventKind};
use crate::options::{RequestOptions, ShowOptions};
use crate::{decode_options, AdsContext, ADS_NAMESPACE};

/// Signature of `<prefix>Load`
pub fn load_signature() -> MethodSignature {
    MethodSignature::void()
        .required(ArgType::Number)
        .required(ArgType::String)
        .required(ArgType::Object)
}

/// Signature of `<prefix>Show`
pub fn show_signature() -> MethodSignature {
    MethodSignature::promise()
        .required(ArgType::Number)
        .required(ArgType::String)
        .optional(ArgType::Object)
}

/// Build the module for one format
pub fn module(format: AdFormat, ctx: &AdsContext) -> BridgeResult<BridgeModule> {
    let prefix = format.method_prefix();
    let load_ctx = ctx.clone();
    let show_ctx = ctx.clone();

    BridgeModule::builder(format.module_name())
        .method(&format!("{}Load", prefix), load_signature(), move |args| {
            load(&load_ctx, format, args)
        })
        .method(&format!("{}Show", prefix), show_signature(), move |args| {
            show(&show_ctx, format, args)
        })
        .build()
}

fn load(ctx: &AdsContext, format: AdFormat, args: &CallArgs) -> HandlerResult {
    let request_id = args.int(0)?;
    let ad_unit_id = args.string(1)?.to_string();

    let options: RequestOptions = match decode_options(args, 2) {
        Ok(options) => options,
        Err(failure) => {
            ctx.events
                .publish(failure_event(format, request_id, ad_unit_id, &failure));
            return Ok(HandlerOutcome::done());
        }
    };

    let backend = ctx.backend.clone();
    let events = ctx.events.clone();
    let failure_events = ctx.events.clone();
    let failure_unit = ad_unit_id.clone();
    Ok(HandlerOutcome::detached(
        move || {
            debug!(%format, request_id, ad_unit_id = %ad_unit_id, "loading ad");
            let event = match backend.load(format, request_id, &ad_unit_id, &options) {
                Ok(()) => AdEvent::new(format, request_id, ad_unit_id, AdEventKind::Loaded),
                Err(error) => AdEvent::error(format, request_id, ad_unit_id, &error),
            };
            events.publish(event);
            Ok(BridgeValue::Undefined)
        },
        // The load never ran or never finished (queue full, pool closed, panic).
        move |failure| {
            failure_events.publish(failure_event(format, request_id, failure_unit, &failure));
        },
    ))
}

fn failure_event(
    format: AdFormat,
    request_id: i32,
    ad_unit_id: String,
    failure: &HandlerFailure,
) -> AdEvent {
    AdEvent::new(format, request_id, ad_unit_id, AdEventKind::Error).with_payload(
        BridgeValue::object_from([
            ("code", BridgeValue::from(failure.code.as_str())),
            ("message", BridgeValue::from(failure.message.as_str())),
        ]),
    )
}

fn show(ctx: &AdsContext, format: AdFormat, args: &CallArgs) -> HandlerResult {
    let request_id = args.int(0)?;
    let ad_unit_id = args.string(1)?.to_string();
    let options: ShowOptions = decode_options(args, 2)?;

    let backend = ctx.backend.clone();
    Ok(HandlerOutcome::blocking(move || {
        backend
            .show(format, request_id, &ad_unit_id, &options)
            .map(|()| BridgeValue::Undefined)
            .map_err(|error| error.into_failure(ADS_NAMESPACE))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbridge_sdk::ReturnShape;

    #[test]
    fn test_signatures() {
        let load = load_signature();
        assert_eq!(load.returns(), ReturnShape::Void);
        assert_eq!(load.required_arity(), 3);

        let show = show_signature();
        assert_eq!(show.returns(), ReturnShape::Promise);
        assert_eq!(show.arity(), 3);
        assert_eq!(show.required_arity(), 2);
    }
}
