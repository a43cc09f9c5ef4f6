//! Pending results - promise-like handles settled out-of-band
//!
//! [`pending`] creates a linked pair: the caller keeps the [`PendingResult`],
//! the handler (or a worker thread) keeps the [`Resolver`]. Settling consumes
//! the resolver, so a pending result settles exactly once. A resolver dropped
//! without settling rejects with `bridge/abandoned`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::HandlerFailure;
use crate::value::BridgeValue;

/// Settled outcome of a pending result
pub type Settlement = Result<BridgeValue, HandlerFailure>;

static NEXT_PENDING_ID: AtomicU64 = AtomicU64::new(1);

/// Unique id of a pending result, for logging and correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PendingId(u64);

impl PendingId {
    fn next() -> Self {
        PendingId(NEXT_PENDING_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PendingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pending#{}", self.0)
    }
}

#[derive(Default)]
struct State {
    outcome: Option<Settlement>,
    wakers: Vec<Waker>,
}

struct Shared {
    id: PendingId,
    state: Mutex<State>,
    settled: Condvar,
}

impl Shared {
    fn settle(&self, outcome: Settlement) {
        let wakers = {
            let mut state = self.state.lock();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(outcome);
            std::mem::take(&mut state.wakers)
        };
        self.settled.notify_all();
        for waker in wakers {
            waker.wake();
        }
    }
}

/// Create a linked pending result / resolver pair
pub fn pending() -> (PendingResult, Resolver) {
    let shared = Arc::new(Shared {
        id: PendingId::next(),
        state: Mutex::new(State::default()),
        settled: Condvar::new(),
    });
    (
        PendingResult {
            shared: shared.clone(),
        },
        Resolver {
            shared,
            settled: false,
        },
    )
}

/// Caller-side handle of an asynchronous result.
///
/// Cloning yields another observer of the same result. Can be awaited, or
/// waited on from a plain thread.
#[derive(Clone)]
pub struct PendingResult {
    shared: Arc<Shared>,
}

impl PendingResult {
    /// Already resolved pending result
    pub fn resolved(value: BridgeValue) -> Self {
        let (pending, resolver) = pending();
        resolver.resolve(value);
        pending
    }

    /// Already rejected pending result
    pub fn rejected(failure: HandlerFailure) -> Self {
        let (pending, resolver) = pending();
        resolver.reject(failure);
        pending
    }

    /// Id of this pending result
    pub fn id(&self) -> PendingId {
        self.shared.id
    }

    /// Whether the result has settled
    pub fn is_settled(&self) -> bool {
        self.shared.state.lock().outcome.is_some()
    }

    /// Outcome if already settled, without blocking
    pub fn try_result(&self) -> Option<Settlement> {
        self.shared.state.lock().outcome.clone()
    }

    /// Block until settled
    pub fn wait(&self) -> Settlement {
        let mut state = self.shared.state.lock();
        loop {
            if let Some(outcome) = &state.outcome {
                return outcome.clone();
            }
            self.shared.settled.wait(&mut state);
        }
    }

    /// Block until settled or `timeout` elapses; `None` on timeout
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Settlement> {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        loop {
            if let Some(outcome) = &state.outcome {
                return Some(outcome.clone());
            }
            if self.shared.settled.wait_until(&mut state, deadline).timed_out() {
                return state.outcome.clone();
            }
        }
    }
}

impl Future for PendingResult {
    type Output = Settlement;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.shared.state.lock();
        if let Some(outcome) = &state.outcome {
            return Poll::Ready(outcome.clone());
        }
        if !state.wakers.iter().any(|w| w.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

impl fmt::Debug for PendingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingResult")
            .field("id", &self.shared.id)
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Handler-side half of a pending result.
///
/// `Send`, so it can move to whatever thread finishes the work.
pub struct Resolver {
    shared: Arc<Shared>,
    settled: bool,
}

impl Resolver {
    /// Id of the linked pending result
    pub fn id(&self) -> PendingId {
        self.shared.id
    }

    /// Resolve with a value
    pub fn resolve(self, value: BridgeValue) {
        self.settle(Ok(value));
    }

    /// Reject with a failure
    pub fn reject(self, failure: HandlerFailure) {
        self.settle(Err(failure));
    }

    /// Settle with an outcome
    pub fn settle(mut self, outcome: Settlement) {
        self.settled = true;
        self.shared.settle(outcome);
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        if !self.settled {
            self.shared.settle(Err(HandlerFailure::new(
                "bridge/abandoned",
                "resolver dropped without settling",
            )));
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").field("id", &self.shared.id).finish()
    }
}
