//! Bridge dispatcher
//!
//! Owns the registered modules and the worker pool. `invoke` resolves the
//! method, validates the arguments through the method's signature, calls the
//! handler, and shapes the handler's outcome by the declared return shape:
//!
//! | Declared | Handler returned | Caller gets |
//! |---|---|---|
//! | void | anything | `Invocation::Void` (async failures are logged, and reported to a detached outcome's hook) |
//! | value | value | the value |
//! | promise | value / error | settled pending result |
//! | promise | pending / blocking | pending result, settled later |
//! | value / promise | detached | `ReturnShapeMismatch` |
//!
//! Shape errors and synchronous failures of void/value methods are returned
//! as `Err`; promise methods never fail synchronously once their arguments
//! validate.

use std::collections::HashMap;

use adbridge_sdk::{
    BridgeError, BridgeModule, BridgeResult, BridgeValue, HandlerOutcome, HandlerResult,
    MethodDescriptor, PendingResult, ReturnShape,
};
use tracing::{debug, info};

use crate::config::BridgeConfig;
use crate::error::RuntimeError;
use crate::pool::{Completion, WorkerPool};

/// Result of a successful `invoke`
#[derive(Debug, Clone)]
pub enum Invocation {
    /// Void acknowledgment
    Void,
    /// Direct value
    Value(BridgeValue),
    /// Pending result
    Pending(PendingResult),
}

impl Invocation {
    /// Check for a void acknowledgment
    pub fn is_void(&self) -> bool {
        matches!(self, Invocation::Void)
    }

    /// The direct value, if any
    pub fn into_value(self) -> Option<BridgeValue> {
        match self {
            Invocation::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The pending result, if any
    pub fn into_pending(self) -> Option<PendingResult> {
        match self {
            Invocation::Pending(pending) => Some(pending),
            _ => None,
        }
    }
}

/// Builder for [`Bridge`]
#[derive(Default)]
pub struct BridgeBuilder {
    config: BridgeConfig,
    modules: Vec<BridgeModule>,
}

impl BridgeBuilder {
    /// Use this configuration
    pub fn config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a module
    pub fn module(mut self, module: BridgeModule) -> Self {
        self.modules.push(module);
        self
    }

    /// Add several modules
    pub fn modules(mut self, modules: impl IntoIterator<Item = BridgeModule>) -> Self {
        self.modules.extend(modules);
        self
    }

    /// Build the bridge; fails on duplicate module names or bad config
    pub fn build(self) -> Result<Bridge, RuntimeError> {
        self.config.validate()?;

        let mut modules = HashMap::with_capacity(self.modules.len());
        for module in self.modules {
            if modules.contains_key(module.name()) {
                return Err(BridgeError::DuplicateModule(module.name().to_string()).into());
            }
            modules.insert(module.name().to_string(), module);
        }

        let pool = WorkerPool::new(&self.config.pool)?;
        info!(modules = modules.len(), "bridge ready");
        Ok(Bridge { modules, pool })
    }
}

/// Dispatcher exposing a fixed set of native modules to a scripting caller.
///
/// `Send + Sync`; the module tables are immutable, so concurrent `invoke`
/// calls need no locking.
pub struct Bridge {
    modules: HashMap<String, BridgeModule>,
    pool: WorkerPool,
}

impl Bridge {
    /// Start building a bridge
    pub fn builder() -> BridgeBuilder {
        BridgeBuilder::default()
    }

    /// Look up a module
    pub fn module(&self, name: &str) -> Option<&BridgeModule> {
        self.modules.get(name)
    }

    /// Registered module names, sorted
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of worker threads serving blocking work
    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    /// Invoke `module.method` with `args`.
    ///
    /// Errors returned here are always raised before or instead of a pending
    /// result; the handler is never called when validation fails.
    pub fn invoke(
        &self,
        module: &str,
        method: &str,
        args: Vec<BridgeValue>,
    ) -> BridgeResult<Invocation> {
        let descriptor = self
            .modules
            .get(module)
            .ok_or_else(|| BridgeError::UnknownModule(module.to_string()))?
            .resolve(method)?;

        debug!(module, method, argc = args.len(), "invoke");
        let bound = descriptor.signature().bind(args)?;
        let result = descriptor.call(&bound);
        self.shape(module, descriptor, result)
    }

    fn shape(
        &self,
        module: &str,
        descriptor: &MethodDescriptor,
        result: HandlerResult,
    ) -> BridgeResult<Invocation> {
        let declared = descriptor.signature().returns();
        match declared {
            ReturnShape::Void => {
                let origin = format!("{}.{}", module, descriptor.name());
                match result? {
                    HandlerOutcome::Value(_) | HandlerOutcome::Pending(_) => {}
                    HandlerOutcome::Blocking(work) => self.pool.submit(
                        work,
                        Completion::Detached {
                            origin,
                            on_failure: None,
                        },
                    ),
                    HandlerOutcome::Detached { work, on_failure } => self.pool.submit(
                        work,
                        Completion::Detached {
                            origin,
                            on_failure: Some(on_failure),
                        },
                    ),
                }
                Ok(Invocation::Void)
            }
            ReturnShape::Value => match result? {
                HandlerOutcome::Value(value) => Ok(Invocation::Value(value)),
                other => Err(BridgeError::ReturnShapeMismatch {
                    method: descriptor.name().to_string(),
                    declared,
                    returned: other.kind(),
                }),
            },
            ReturnShape::Promise => {
                let pending = match result {
                    Ok(HandlerOutcome::Value(value)) => PendingResult::resolved(value),
                    Ok(HandlerOutcome::Pending(pending)) => pending,
                    Ok(HandlerOutcome::Blocking(work)) => {
                        let (pending, resolver) = adbridge_sdk::pending();
                        debug!(module, method = descriptor.name(), id = %pending.id(), "deferred to pool");
                        self.pool.submit(work, Completion::Settle(resolver));
                        pending
                    }
                    Ok(detached @ HandlerOutcome::Detached { .. }) => {
                        return Err(BridgeError::ReturnShapeMismatch {
                            method: descriptor.name().to_string(),
                            declared,
                            returned: detached.kind(),
                        })
                    }
                    Err(failure) => PendingResult::rejected(failure),
                };
                Ok(Invocation::Pending(pending))
            }
        }
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("modules", &self.module_names())
            .field("workers", &self.pool.worker_count())
            .finish()
    }
}
