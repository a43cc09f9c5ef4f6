//! Bridge modules - named, immutable method tables
//!
//! A module groups the methods of one capability (e.g. the rewarded ad
//! format). It is assembled with [`ModuleBuilder`] and never mutated after
//! `build()`, so lookups need no locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::args::CallArgs;
use crate::error::{BridgeError, BridgeResult};
use crate::handler::{HandlerFn, HandlerResult};
use crate::signature::MethodSignature;

/// One registered method: name, signature, handler
pub struct MethodDescriptor {
    name: String,
    signature: MethodSignature,
    handler: HandlerFn,
}

impl MethodDescriptor {
    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared signature
    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// Run the handler on already-bound arguments
    pub fn call(&self, args: &CallArgs) -> HandlerResult {
        (self.handler)(args)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Builder collecting method registrations for one module
pub struct ModuleBuilder {
    name: String,
    methods: Vec<MethodDescriptor>,
}

impl ModuleBuilder {
    /// Register a method
    pub fn method<F>(mut self, name: &str, signature: MethodSignature, handler: F) -> Self
    where
        F: Fn(&CallArgs) -> HandlerResult + Send + Sync + 'static,
    {
        self.methods.push(MethodDescriptor {
            name: name.to_string(),
            signature,
            handler: Arc::new(handler),
        });
        self
    }

    /// Build the module.
    ///
    /// Fails on a duplicate method name or a malformed signature; no partial
    /// module is returned.
    pub fn build(self) -> BridgeResult<BridgeModule> {
        let mut methods = HashMap::with_capacity(self.methods.len());
        for descriptor in self.methods {
            descriptor.signature.check(&descriptor.name)?;
            if methods.contains_key(&descriptor.name) {
                return Err(BridgeError::DuplicateMethod {
                    module: self.name,
                    method: descriptor.name,
                });
            }
            methods.insert(descriptor.name.clone(), descriptor);
        }
        Ok(BridgeModule {
            name: self.name,
            methods,
        })
    }
}

/// Named mapping from method name to descriptor
pub struct BridgeModule {
    name: String,
    methods: HashMap<String, MethodDescriptor>,
}

impl BridgeModule {
    /// Start building a module
    pub fn builder(name: impl Into<String>) -> ModuleBuilder {
        ModuleBuilder {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a method
    pub fn get(&self, method: &str) -> Option<&MethodDescriptor> {
        self.methods.get(method)
    }

    /// Look up a method, failing with `UnknownMethod`
    pub fn resolve(&self, method: &str) -> BridgeResult<&MethodDescriptor> {
        self.get(method).ok_or_else(|| BridgeError::UnknownMethod {
            module: self.name.clone(),
            method: method.to_string(),
        })
    }

    /// Check if a method is registered
    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Registered method names, sorted
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered methods
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Check if the module has no methods
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for BridgeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeModule")
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .finish()
    }
}
