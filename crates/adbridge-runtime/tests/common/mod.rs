//! Backend whose `show` calls block until the test releases them

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use adbridge_ads::{
    AdError, AdEventHub, AdFormat, AdapterStatus, AdsBackend, ConsentInfo, ConsentRequestOptions,
    NativeAd, NativeAdRequestOptions, RequestConfiguration, RequestOptions, ShowOptions, TcfValue,
};
use adbridge_runtime::{Bridge, BridgeConfig};
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

#[derive(Default)]
pub struct GatedBackend {
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<i32, Receiver<Result<(), AdError>>>>,
    pub last_show: Mutex<Option<ShowOptions>>,
}

impl GatedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make `show` for `request_id` wait for a send on the returned channel
    pub fn gate(&self, request_id: i32) -> Sender<Result<(), AdError>> {
        let (tx, rx) = channel::bounded(1);
        self.gates.lock().insert(request_id, rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }
}

impl AdsBackend for GatedBackend {
    fn load(&self, format: AdFormat, request_id: i32, ad_unit_id: &str, _: &RequestOptions) -> Result<(), AdError> {
        self.record(format!("load {} {} {}", format, request_id, ad_unit_id));
        Ok(())
    }

    fn show(&self, format: AdFormat, request_id: i32, ad_unit_id: &str, options: &ShowOptions) -> Result<(), AdError> {
        self.record(format!("show {} {} {}", format, request_id, ad_unit_id));
        *self.last_show.lock() = Some(options.clone());
        let gate = self.gates.lock().remove(&request_id);
        match gate {
            Some(rx) => rx
                .recv()
                .unwrap_or_else(|_| Err(AdError::new("cancelled", "gate dropped"))),
            None => Ok(()),
        }
    }

    fn initialize(&self) -> Result<Vec<AdapterStatus>, AdError> {
        self.record("initialize");
        Ok(Vec::new())
    }

    fn set_request_configuration(&self, _: &RequestConfiguration) -> Result<(), AdError> {
        self.record("setRequestConfiguration");
        Ok(())
    }

    fn open_ad_inspector(&self) -> Result<(), AdError> {
        self.record("openAdInspector");
        Ok(())
    }

    fn open_debug_menu(&self, _: &str) {
        self.record("openDebugMenu");
    }

    fn set_app_volume(&self, _: f64) {
        self.record("setAppVolume");
    }

    fn set_app_muted(&self, _: bool) {
        self.record("setAppMuted");
    }

    fn request_consent_info_update(&self, _: &ConsentRequestOptions) -> Result<ConsentInfo, AdError> {
        self.record("requestInfoUpdate");
        Ok(ConsentInfo::default())
    }

    fn show_consent_form(&self) -> Result<ConsentInfo, AdError> {
        self.record("showForm");
        Ok(ConsentInfo::default())
    }

    fn show_privacy_options_form(&self) -> Result<ConsentInfo, AdError> {
        self.record("showPrivacyOptionsForm");
        Ok(ConsentInfo::default())
    }

    fn load_and_show_consent_form_if_required(&self) -> Result<ConsentInfo, AdError> {
        self.record("loadAndShowConsentFormIfRequired");
        Ok(ConsentInfo::default())
    }

    fn consent_info(&self) -> Result<ConsentInfo, AdError> {
        self.record("getConsentInfo");
        Ok(ConsentInfo::default())
    }

    fn tcf_value(&self, key: &str) -> Result<Option<TcfValue>, AdError> {
        self.record(format!("tcf {}", key));
        Ok(None)
    }

    fn reset_consent(&self) {
        self.record("reset");
    }

    fn load_native(&self, ad_unit_id: &str, _: &NativeAdRequestOptions) -> Result<NativeAd, AdError> {
        self.record(format!("loadNative {}", ad_unit_id));
        Ok(NativeAd {
            response_id: format!("{}-response", ad_unit_id),
            ..NativeAd::default()
        })
    }

    fn destroy_native(&self, _: &str) {
        self.record("destroyNative");
    }
}

/// Bridge over a fresh gated backend with default config
pub fn bridge() -> (Arc<GatedBackend>, AdEventHub, Bridge) {
    bridge_with(BridgeConfig::default())
}

/// Bridge over a fresh gated backend
pub fn bridge_with(config: BridgeConfig) -> (Arc<GatedBackend>, AdEventHub, Bridge) {
    let backend = GatedBackend::new();
    let events = AdEventHub::new();
    let bridge = adbridge_runtime::google_mobile_ads(backend.clone(), events.clone(), config)
        .expect("bridge should build");
    (backend, events, bridge)
}

/// Spin until `backend` has recorded `call`
pub fn wait_for_call(backend: &GatedBackend, call: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !backend.calls().iter().any(|c| c == call) {
        assert!(Instant::now() < deadline, "backend never saw {:?}", call);
        thread::sleep(Duration::from_millis(5));
    }
}
