//! Error types for the bridge
//!
//! `BridgeError` is raised synchronously at the call boundary.
//! `HandlerFailure` is the rejection payload of a pending result.

use std::fmt;

use crate::signature::{ArgType, ReturnShape};

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Native-side failure: a code plus a human readable message.
///
/// Codes are namespaced the way the scripting side expects them, e.g.
/// `googleMobileAds/no-fill` or `consent/form-unavailable`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{code}] {message}")]
pub struct HandlerFailure {
    /// Namespaced error code
    pub code: String,
    /// Error message
    pub message: String,
}

impl HandlerFailure {
    /// Create a failure with the given code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Bridge error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// Two methods in one module share a name
    #[error("Module '{module}' registers method '{method}' more than once")]
    DuplicateMethod {
        /// Module name
        module: String,
        /// Method name
        method: String,
    },

    /// Two modules in one bridge share a name
    #[error("Module '{0}' is registered more than once")]
    DuplicateModule(String),

    /// Method signature is malformed (e.g. a required param after an optional one)
    #[error("Invalid signature for '{method}': {reason}")]
    InvalidSignature {
        /// Method name
        method: String,
        /// What is wrong with it
        reason: String,
    },

    /// No module with this name
    #[error("Unknown module '{0}'")]
    UnknownModule(String),

    /// No method with this name in the module
    #[error("Unknown method '{method}' in module '{module}'")]
    UnknownMethod {
        /// Module name
        module: String,
        /// Method name
        method: String,
    },

    /// A required positional argument was not passed
    #[error("Expected argument in position {position} to be passed")]
    MissingArgument {
        /// Zero-based argument position
        position: usize,
    },

    /// An argument was passed but cannot be coerced to the declared type
    #[error("Argument in position {position}: expected {expected}, got {got}")]
    TypeMismatch {
        /// Zero-based argument position
        position: usize,
        /// Declared type
        expected: ArgType,
        /// Type name of the supplied value
        got: &'static str,
    },

    /// Handler produced a result that does not fit the declared return shape
    #[error("Method '{method}' declared {declared} but the handler returned {returned}")]
    ReturnShapeMismatch {
        /// Method name
        method: String,
        /// Declared return shape
        declared: ReturnShape,
        /// What the handler produced
        returned: &'static str,
    },

    /// Handler failed synchronously on a non-promise method
    #[error("Handler failed: {0}")]
    Handler(#[from] HandlerFailure),
}

impl BridgeError {
    /// Whether the error is an argument-shape error raised before the handler ran
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            BridgeError::UnknownModule(_)
                | BridgeError::UnknownMethod { .. }
                | BridgeError::MissingArgument { .. }
                | BridgeError::TypeMismatch { .. }
        )
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ReturnShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReturnShape::Void => "void",
            ReturnShape::Value => "value",
            ReturnShape::Promise => "promise",
        })
    }
}
