//! Ad lifecycle events
//!
//! Load methods are void, so a load outcome never reaches the caller as a
//! return value. It is published here instead, together with whatever the
//! backend reports while an ad is on screen (opened, clicked, reward, ...).

use std::sync::Arc;

use adbridge_sdk::{BridgeValue, ValueMap};
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use crate::backend::{AdError, AdFormat};

/// Kind of lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdEventKind {
    /// Ad finished loading
    Loaded,
    /// Load or presentation failed
    Error,
    /// Ad is on screen
    Opened,
    /// Ad was dismissed
    Closed,
    /// User clicked the ad
    Clicked,
    /// Impression recorded
    Impression,
    /// Reward earned (rewarded formats)
    EarnedReward,
}

impl AdEventKind {
    /// Event type string delivered to the scripting side
    pub const fn as_str(self) -> &'static str {
        match self {
            AdEventKind::Loaded => "loaded",
            AdEventKind::Error => "error",
            AdEventKind::Opened => "opened",
            AdEventKind::Closed => "closed",
            AdEventKind::Clicked => "clicked",
            AdEventKind::Impression => "impression",
            AdEventKind::EarnedReward => "rewarded_earned_reward",
        }
    }
}

/// A lifecycle event for one ad request
#[derive(Debug, Clone, PartialEq)]
pub struct AdEvent {
    /// Ad format
    pub format: AdFormat,
    /// Request id chosen by the caller at load time
    pub request_id: i32,
    /// Ad unit id
    pub ad_unit_id: String,
    /// What happened
    pub kind: AdEventKind,
    /// Event data (`{code, message}` for errors, `{type, amount}` for rewards)
    pub payload: BridgeValue,
}

impl AdEvent {
    /// Create an event with no payload
    pub fn new(format: AdFormat, request_id: i32, ad_unit_id: impl Into<String>, kind: AdEventKind) -> Self {
        Self {
            format,
            request_id,
            ad_unit_id: ad_unit_id.into(),
            kind,
            payload: BridgeValue::Undefined,
        }
    }

    /// Error event carrying a backend error
    pub fn error(format: AdFormat, request_id: i32, ad_unit_id: impl Into<String>, error: &AdError) -> Self {
        Self::new(format, request_id, ad_unit_id, AdEventKind::Error).with_payload(BridgeValue::object_from([
            ("code", BridgeValue::from(error.code.as_str())),
            ("message", BridgeValue::from(error.message.as_str())),
        ]))
    }

    /// Reward event
    pub fn reward(
        format: AdFormat,
        request_id: i32,
        ad_unit_id: impl Into<String>,
        reward_type: &str,
        amount: f64,
    ) -> Self {
        Self::new(format, request_id, ad_unit_id, AdEventKind::EarnedReward).with_payload(
            BridgeValue::object_from([
                ("type", BridgeValue::from(reward_type)),
                ("amount", BridgeValue::from(amount)),
            ]),
        )
    }

    /// Attach a payload
    pub fn with_payload(mut self, payload: BridgeValue) -> Self {
        self.payload = payload;
        self
    }

    /// Event body as delivered on [`AdFormat::event_name`]
    pub fn body(&self) -> BridgeValue {
        let mut body = ValueMap::new();
        body.insert("type".to_string(), self.kind.as_str().into());
        body.insert("requestId".to_string(), self.request_id.into());
        body.insert("adUnitId".to_string(), self.ad_unit_id.as_str().into());
        let key = if self.kind == AdEventKind::Error { "error" } else { "data" };
        if !self.payload.is_undefined() {
            body.insert(key.to_string(), self.payload.clone());
        }
        BridgeValue::Object(body)
    }
}

/// Fan-out of ad events to any number of subscribers.
///
/// Cloning yields a handle to the same hub.
#[derive(Clone, Default)]
pub struct AdEventHub {
    subscribers: Arc<Mutex<Vec<Sender<AdEvent>>>>,
}

impl AdEventHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe; events published from now on arrive on the receiver
    pub fn subscribe(&self) -> Receiver<AdEvent> {
        let (tx, rx) = channel::unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Publish to every live subscriber, dropping disconnected ones
    pub fn publish(&self, event: AdEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        tracing::trace!(
            format = %event.format,
            request_id = event.request_id,
            kind = event.kind.as_str(),
            subscribers = subscribers.len(),
            "ad event"
        );
    }

    /// Number of live subscribers (as of the last publish)
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl std::fmt::Debug for AdEventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdEventHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
