//! Handler contract - what a native handler returns to the dispatcher
//!
//! A handler receives validated [`CallArgs`] and returns a [`HandlerResult`].
//! The dispatcher shapes the outcome according to the method's declared
//! [`ReturnShape`](crate::signature::ReturnShape).

use std::fmt;
use std::sync::Arc;

use crate::args::CallArgs;
use crate::error::HandlerFailure;
use crate::pending::{PendingResult, Settlement};
use crate::value::BridgeValue;

/// Work that may block, run on the bridge's worker pool.
///
/// The closure runs on a pool thread; its return value settles the pending
/// result handed to the caller.
pub type BlockingWork = Box<dyn FnOnce() -> Settlement + Send + 'static>;

/// Called with the failure when detached work could not run or failed
pub type FailureHook = Box<dyn FnOnce(HandlerFailure) + Send + 'static>;

/// Successful result of a native handler
pub enum HandlerOutcome {
    /// Completed synchronously with a value (`Undefined` for void handlers)
    Value(BridgeValue),
    /// Handler started its own asynchronous work and settles this itself
    Pending(PendingResult),
    /// Handler cannot complete synchronously; run this on the worker pool
    Blocking(BlockingWork),
    /// Fire-and-forget work for void methods. `on_failure` runs if the work
    /// is rejected by the pool, panics, or returns `Err`.
    Detached {
        /// The work
        work: BlockingWork,
        /// Failure report
        on_failure: FailureHook,
    },
}

/// What a handler returns; `Err` is a synchronous handler failure
pub type HandlerResult = Result<HandlerOutcome, HandlerFailure>;

impl HandlerOutcome {
    /// Successful outcome with no value
    #[inline]
    pub fn done() -> Self {
        Self::Value(BridgeValue::Undefined)
    }

    /// Defer `work` to the worker pool
    pub fn blocking<F>(work: F) -> Self
    where
        F: FnOnce() -> Settlement + Send + 'static,
    {
        Self::Blocking(Box::new(work))
    }

    /// Run `work` in the background and report failures to `on_failure`
    pub fn detached<F, H>(work: F, on_failure: H) -> Self
    where
        F: FnOnce() -> Settlement + Send + 'static,
        H: FnOnce(HandlerFailure) + Send + 'static,
    {
        Self::Detached {
            work: Box::new(work),
            on_failure: Box::new(on_failure),
        }
    }

    /// Short name of the variant, for diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            HandlerOutcome::Value(_) => "value",
            HandlerOutcome::Pending(_) => "pending",
            HandlerOutcome::Blocking(_) => "blocking",
            HandlerOutcome::Detached { .. } => "detached",
        }
    }
}

impl From<BridgeValue> for HandlerOutcome {
    fn from(value: BridgeValue) -> Self {
        HandlerOutcome::Value(value)
    }
}

impl From<PendingResult> for HandlerOutcome {
    fn from(pending: PendingResult) -> Self {
        HandlerOutcome::Pending(pending)
    }
}

impl fmt::Debug for HandlerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerOutcome::Value(v) => f.debug_tuple("Value").field(v).finish(),
            HandlerOutcome::Pending(p) => f.debug_tuple("Pending").field(p).finish(),
            HandlerOutcome::Blocking(_) => f.write_str("Blocking(..)"),
            HandlerOutcome::Detached { .. } => f.write_str("Detached { .. }"),
        }
    }
}

/// A native handler
pub type HandlerFn = Arc<dyn Fn(&CallArgs) -> HandlerResult + Send + Sync>;
