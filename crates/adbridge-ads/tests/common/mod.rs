//! Scripted in-memory backend and call helpers shared by the ads tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use adbridge_ads::{
    AdError, AdEventHub, AdFormat, AdapterStatus, AdsBackend, AdsContext, ConsentInfo,
    ConsentRequestOptions, NativeAd, NativeAdRequestOptions, RequestConfiguration,
    RequestOptions, ShowOptions, TcfValue,
};
use adbridge_sdk::{BridgeModule, BridgeResult, BridgeValue, HandlerOutcome, Settlement};
use parking_lot::Mutex;

/// Backend that records every call and answers from a script
#[derive(Default)]
pub struct MockBackend {
    pub calls: Mutex<Vec<String>>,
    pub load_error: Mutex<Option<AdError>>,
    pub show_error: Mutex<Option<AdError>>,
    pub consent: Mutex<ConsentInfo>,
    pub consent_error: Mutex<Option<AdError>>,
    pub tcf: Mutex<HashMap<String, TcfValue>>,
    pub last_request: Mutex<Option<RequestOptions>>,
    pub last_show: Mutex<Option<ShowOptions>>,
    pub last_configuration: Mutex<Option<RequestConfiguration>>,
    pub last_consent_request: Mutex<Option<ConsentRequestOptions>>,
    pub volume: Mutex<Option<f64>>,
    pub muted: Mutex<Option<bool>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn consent_answer(&self, call: &str) -> Result<ConsentInfo, AdError> {
        self.record(call);
        match self.consent_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(self.consent.lock().clone()),
        }
    }
}

impl AdsBackend for MockBackend {
    fn load(
        &self,
        format: AdFormat,
        request_id: i32,
        ad_unit_id: &str,
        options: &RequestOptions,
    ) -> Result<(), AdError> {
        self.record(format!("load {} {} {}", format, request_id, ad_unit_id));
        *self.last_request.lock() = Some(options.clone());
        match self.load_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn show(
        &self,
        format: AdFormat,
        request_id: i32,
        ad_unit_id: &str,
        options: &ShowOptions,
    ) -> Result<(), AdError> {
        self.record(format!("show {} {} {}", format, request_id, ad_unit_id));
        *self.last_show.lock() = Some(options.clone());
        match self.show_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn initialize(&self) -> Result<Vec<AdapterStatus>, AdError> {
        self.record("initialize");
        Ok(vec![AdapterStatus {
            name: "com.google.android.gms.ads.MobileAds".to_string(),
            description: String::new(),
            state: 1,
        }])
    }

    fn set_request_configuration(&self, config: &RequestConfiguration) -> Result<(), AdError> {
        self.record("setRequestConfiguration");
        *self.last_configuration.lock() = Some(config.clone());
        Ok(())
    }

    fn open_ad_inspector(&self) -> Result<(), AdError> {
        self.record("openAdInspector");
        Err(AdError::new("inspector-closed", "The ad inspector was closed"))
    }

    fn open_debug_menu(&self, ad_unit_id: &str) {
        self.record(format!("openDebugMenu {}", ad_unit_id));
    }

    fn set_app_volume(&self, volume: f64) {
        *self.volume.lock() = Some(volume);
    }

    fn set_app_muted(&self, muted: bool) {
        *self.muted.lock() = Some(muted);
    }

    fn request_consent_info_update(
        &self,
        options: &ConsentRequestOptions,
    ) -> Result<ConsentInfo, AdError> {
        *self.last_consent_request.lock() = Some(options.clone());
        self.consent_answer("requestInfoUpdate")
    }

    fn show_consent_form(&self) -> Result<ConsentInfo, AdError> {
        self.consent_answer("showForm")
    }

    fn show_privacy_options_form(&self) -> Result<ConsentInfo, AdError> {
        self.consent_answer("showPrivacyOptionsForm")
    }

    fn load_and_show_consent_form_if_required(&self) -> Result<ConsentInfo, AdError> {
        self.consent_answer("loadAndShowConsentFormIfRequired")
    }

    fn consent_info(&self) -> Result<ConsentInfo, AdError> {
        self.consent_answer("getConsentInfo")
    }

    fn tcf_value(&self, key: &str) -> Result<Option<TcfValue>, AdError> {
        self.record(format!("tcf {}", key));
        Ok(self.tcf.lock().get(key).cloned())
    }

    fn reset_consent(&self) {
        self.record("reset");
    }

    fn load_native(
        &self,
        ad_unit_id: &str,
        options: &NativeAdRequestOptions,
    ) -> Result<NativeAd, AdError> {
        self.record(format!("loadNative {}", ad_unit_id));
        *self.last_request.lock() = Some(options.request.clone());
        Ok(NativeAd {
            response_id: "resp-1".to_string(),
            headline: "Headline".to_string(),
            star_rating: Some(4.5),
            ..NativeAd::default()
        })
    }

    fn destroy_native(&self, response_id: &str) {
        self.record(format!("destroyNative {}", response_id));
    }
}

/// Context over a fresh mock and hub
pub fn context() -> (Arc<MockBackend>, AdsContext) {
    let backend = MockBackend::new();
    let ctx = AdsContext::with_events(backend.clone(), AdEventHub::new());
    (backend, ctx)
}

/// Validate, call, and run any blocking work inline. Detached work settles
/// as `undefined` the way a void method does.
pub fn call(module: &BridgeModule, method: &str, args: Vec<BridgeValue>) -> BridgeResult<Settlement> {
    let descriptor = module.resolve(method)?;
    let bound = descriptor.signature().bind(args)?;
    Ok(match descriptor.call(&bound) {
        Ok(HandlerOutcome::Value(value)) => Ok(value),
        Ok(HandlerOutcome::Pending(pending)) => pending.wait(),
        Ok(HandlerOutcome::Blocking(work)) => work(),
        Ok(HandlerOutcome::Detached { work, on_failure }) => match work() {
            Ok(_) => Ok(BridgeValue::Undefined),
            Err(failure) => {
                on_failure(failure);
                Ok(BridgeValue::Undefined)
            }
        },
        Err(failure) => Err(failure),
    })
}
