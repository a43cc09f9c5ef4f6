//! Method signatures and argument validation
//!
//! A signature is a declarative list of parameter specs plus a return shape.
//! [`MethodSignature::bind`] is the single validation routine every call goes
//! through: it checks arity, coerces each argument, and yields [`CallArgs`]
//! or fails before any handler code runs.

use crate::args::{Arg, CallArgs};
use crate::error::{BridgeError, BridgeResult};
use crate::value::BridgeValue;

/// Declared type of a positional parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    /// Scripting number (f64)
    Number,
    /// String
    String,
    /// Boolean
    Bool,
    /// Structured object
    Object,
}

impl ArgType {
    /// Type name as reported in errors
    pub const fn name(self) -> &'static str {
        match self {
            ArgType::Number => "number",
            ArgType::String => "string",
            ArgType::Bool => "boolean",
            ArgType::Object => "object",
        }
    }

    /// Coerce a supplied value to this type.
    ///
    /// `Object` accepts only plain objects. Arrays are rejected even though
    /// the generated JS glue (`asObject`) would let them through.
    fn coerce(self, position: usize, value: BridgeValue) -> BridgeResult<Arg> {
        match (self, value) {
            (ArgType::Number, BridgeValue::Number(n)) => Ok(Arg::Number(n)),
            (ArgType::String, BridgeValue::String(s)) => Ok(Arg::String(s)),
            (ArgType::Bool, BridgeValue::Bool(b)) => Ok(Arg::Bool(b)),
            (ArgType::Object, BridgeValue::Object(map)) => Ok(Arg::Object(map)),
            (expected, other) => Err(BridgeError::TypeMismatch {
                position,
                expected,
                got: other.type_name(),
            }),
        }
    }
}

/// One positional parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Declared type
    pub ty: ArgType,
    /// Optional params may be omitted or `undefined`
    pub optional: bool,
}

/// How the dispatcher hands a method's result back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnShape {
    /// Explicit "no value" acknowledgment
    Void,
    /// Direct value, returned unchanged
    Value,
    /// Pending result, settled out-of-band
    Promise,
}

/// Parameter list plus return shape of a bridge method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    params: Vec<ParamSpec>,
    returns: ReturnShape,
}

impl MethodSignature {
    /// Empty signature with the given return shape
    pub fn new(returns: ReturnShape) -> Self {
        Self {
            params: Vec::new(),
            returns,
        }
    }

    /// Signature returning a void acknowledgment
    pub fn void() -> Self {
        Self::new(ReturnShape::Void)
    }

    /// Signature returning a direct value
    pub fn value() -> Self {
        Self::new(ReturnShape::Value)
    }

    /// Signature returning a pending result
    pub fn promise() -> Self {
        Self::new(ReturnShape::Promise)
    }

    /// Append a required parameter
    pub fn required(mut self, ty: ArgType) -> Self {
        self.params.push(ParamSpec { ty, optional: false });
        self
    }

    /// Append an optional parameter
    pub fn optional(mut self, ty: ArgType) -> Self {
        self.params.push(ParamSpec { ty, optional: true });
        self
    }

    /// Declared parameters in order
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Declared return shape
    pub fn returns(&self) -> ReturnShape {
        self.returns
    }

    /// Number of declared parameters, optional ones included
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Number of leading required parameters
    pub fn required_arity(&self) -> usize {
        self.params.iter().take_while(|p| !p.optional).count()
    }

    /// Check that optional parameters only trail
    pub fn check(&self, method: &str) -> BridgeResult<()> {
        if let Some(first_optional) = self.params.iter().position(|p| p.optional) {
            if let Some(offset) = self.params[first_optional..].iter().position(|p| !p.optional) {
                return Err(BridgeError::InvalidSignature {
                    method: method.to_string(),
                    reason: format!(
                        "required parameter {} follows optional parameter {}",
                        first_optional + offset,
                        first_optional
                    ),
                });
            }
        }
        Ok(())
    }

    /// Validate and coerce `args` against this signature.
    ///
    /// Walks the declared params left to right and fails on the first
    /// missing required argument or failed coercion. Arguments past the
    /// declared params are ignored.
    pub fn bind(&self, args: Vec<BridgeValue>) -> BridgeResult<CallArgs> {
        let mut supplied = args.into_iter();
        let mut bound = Vec::with_capacity(self.params.len());

        for (position, param) in self.params.iter().enumerate() {
            let arg = match supplied.next() {
                None if param.optional => Arg::Absent,
                None => return Err(BridgeError::MissingArgument { position }),
                Some(BridgeValue::Undefined) if param.optional => Arg::Absent,
                Some(value) => param.ty.coerce(position, value)?,
            };
            bound.push(arg);
        }

        Ok(CallArgs::new(bound))
    }
}
