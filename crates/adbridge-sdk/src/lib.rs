//! adbridge SDK - lightweight SDK for writing bridge modules
//!
//! This crate provides the types native modules need to expose methods to a
//! scripting caller without depending on the dispatcher runtime: the value
//! type, argument specs and validation, handler outcomes, pending results,
//! and module registration.
//!
//! # Example
//!
//! ```ignore
//! use adbridge_sdk::{ArgType, BridgeModule, HandlerOutcome, MethodSignature};
//!
//! let module = BridgeModule::builder("RNGoogleMobileAdsModule")
//!     .method(
//!         "setAppMuted",
//!         MethodSignature::void().required(ArgType::Bool),
//!         |args| {
//!             let muted = args.boolean(0)?;
//!             backend.set_app_muted(muted);
//!             Ok(HandlerOutcome::done())
//!         },
//!     )
//!     .build()?;
//! ```

#![warn(missing_docs)]

pub mod args;
pub mod convert;
pub mod error;
pub mod handler;
pub mod module;
pub mod pending;
pub mod signature;
pub mod value;

pub use args::{Arg, CallArgs};
pub use convert::FromArg;
pub use error::{BridgeError, BridgeResult, HandlerFailure};
pub use handler::{BlockingWork, FailureHook, HandlerFn, HandlerOutcome, HandlerResult};
pub use module::{BridgeModule, MethodDescriptor, ModuleBuilder};
pub use pending::{pending, PendingId, PendingResult, Resolver, Settlement};
pub use signature::{ArgType, MethodSignature, ParamSpec, ReturnShape};
pub use value::{BridgeValue, ValueMap};
