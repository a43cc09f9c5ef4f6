//! Validated call arguments
//!
//! `CallArgs` is what a handler receives after [`MethodSignature::bind`]
//! succeeded: exactly one [`Arg`] per declared parameter, already coerced.
//!
//! [`MethodSignature::bind`]: crate::signature::MethodSignature::bind

use serde::de::DeserializeOwned;

use crate::convert::FromArg;
use crate::error::HandlerFailure;
use crate::value::{BridgeValue, ValueMap};

/// A coerced argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Number parameter
    Number(f64),
    /// String parameter
    String(String),
    /// Boolean parameter
    Bool(bool),
    /// Object parameter
    Object(ValueMap),
    /// Optional parameter that was omitted or `undefined`
    Absent,
}

impl Arg {
    /// Name of the argument kind, used in accessor errors
    pub const fn kind(&self) -> &'static str {
        match self {
            Arg::Number(_) => "number",
            Arg::String(_) => "string",
            Arg::Bool(_) => "boolean",
            Arg::Object(_) => "object",
            Arg::Absent => "absent",
        }
    }
}

/// Ordered, validated argument tuple handed to a handler
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallArgs {
    args: Vec<Arg>,
}

impl CallArgs {
    pub(crate) fn new(args: Vec<Arg>) -> Self {
        Self { args }
    }

    /// Number of bound parameters
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if no parameters are bound
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Raw access to a bound argument
    pub fn arg(&self, index: usize) -> Option<&Arg> {
        self.args.get(index)
    }

    /// Whether an optional parameter was omitted
    pub fn is_absent(&self, index: usize) -> bool {
        matches!(self.args.get(index), Some(Arg::Absent) | None)
    }

    /// Typed access to a bound argument
    pub fn get<'a, T: FromArg<'a>>(&'a self, index: usize) -> Result<T, HandlerFailure> {
        T::from_arg(index, self.args.get(index))
    }

    /// Number argument
    pub fn number(&self, index: usize) -> Result<f64, HandlerFailure> {
        self.get(index)
    }

    /// Number argument truncated to an i32 request id
    pub fn int(&self, index: usize) -> Result<i32, HandlerFailure> {
        self.get(index)
    }

    /// String argument
    pub fn string(&self, index: usize) -> Result<&str, HandlerFailure> {
        self.get(index)
    }

    /// Boolean argument
    pub fn boolean(&self, index: usize) -> Result<bool, HandlerFailure> {
        self.get(index)
    }

    /// Object argument
    pub fn object(&self, index: usize) -> Result<&ValueMap, HandlerFailure> {
        self.get(index)
    }

    /// Optional object argument
    pub fn optional_object(&self, index: usize) -> Result<Option<&ValueMap>, HandlerFailure> {
        self.get(index)
    }

    /// Decode an object argument into a serde type.
    ///
    /// An absent optional argument decodes as `T::default()`.
    pub fn decode<T>(&self, index: usize) -> Result<T, HandlerFailure>
    where
        T: DeserializeOwned + Default,
    {
        match self.optional_object(index)? {
            None => Ok(T::default()),
            Some(map) => {
                let json = BridgeValue::Object(map.clone()).to_json();
                serde_json::from_value(json).map_err(|e| {
                    HandlerFailure::new(
                        "bridge/invalid-options",
                        format!("argument {}: {}", index, e),
                    )
                })
            }
        }
    }

    /// Iterate over bound arguments
    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.args.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Opts {
        #[serde(default)]
        immersive_mode_enabled: bool,
    }

    fn args() -> CallArgs {
        let mut map = ValueMap::new();
        map.insert("immersiveModeEnabled".into(), BridgeValue::Bool(true));
        CallArgs::new(vec![
            Arg::Number(7.0),
            Arg::String("unit".into()),
            Arg::Object(map),
            Arg::Absent,
        ])
    }

    #[test]
    fn test_accessors() {
        let a = args();
        assert_eq!(a.number(0).unwrap(), 7.0);
        assert_eq!(a.int(0).unwrap(), 7);
        assert_eq!(a.string(1).unwrap(), "unit");
        assert!(a.object(2).unwrap().contains_key("immersiveModeEnabled"));
        assert!(a.optional_object(3).unwrap().is_none());
        assert!(a.is_absent(3));
    }

    #[test]
    fn test_accessor_wrong_kind() {
        let err = args().string(0).unwrap_err();
        assert_eq!(err.code, "bridge/argument");
    }

    #[test]
    fn test_decode() {
        let a = args();
        assert_eq!(
            a.decode::<Opts>(2).unwrap(),
            Opts {
                immersive_mode_enabled: true
            }
        );
        assert_eq!(a.decode::<Opts>(3).unwrap(), Opts::default());
    }

    #[test]
    fn test_decode_invalid() {
        let mut map = ValueMap::new();
        map.insert("immersiveModeEnabled".into(), BridgeValue::from("yes"));
        let a = CallArgs::new(vec![Arg::Object(map)]);
        let err = a.decode::<Opts>(0).unwrap_err();
        assert_eq!(err.code, "bridge/invalid-options");
    }
}
