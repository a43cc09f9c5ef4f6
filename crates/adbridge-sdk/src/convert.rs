//! Conversion from bound arguments to Rust types.
//!
//! Implement `FromArg` to let a type be read with [`CallArgs::get`].
//! Arguments are already validated against the signature by the time a
//! handler reads them, so a failure here means the handler asked for a
//! different type than its signature declares.
//!
//! [`CallArgs::get`]: crate::args::CallArgs::get

use crate::args::Arg;
use crate::error::HandlerFailure;
use crate::value::ValueMap;

/// Convert a bound argument into a Rust value.
pub trait FromArg<'a>: Sized {
    /// Convert the argument at `index`; `arg` is `None` past the bound params
    fn from_arg(index: usize, arg: Option<&'a Arg>) -> Result<Self, HandlerFailure>;
}

fn mismatch(index: usize, expected: &str, arg: Option<&Arg>) -> HandlerFailure {
    HandlerFailure::new(
        "bridge/argument",
        format!(
            "argument {} read as {} but is {}",
            index,
            expected,
            arg.map(Arg::kind).unwrap_or("unbound")
        ),
    )
}

impl<'a> FromArg<'a> for f64 {
    fn from_arg(index: usize, arg: Option<&'a Arg>) -> Result<Self, HandlerFailure> {
        match arg {
            Some(Arg::Number(n)) => Ok(*n),
            other => Err(mismatch(index, "number", other)),
        }
    }
}

// Request ids travel as doubles. Fractions truncate like the native side
// does; NaN, infinities and values outside i32 are rejected so distinct ids
// never collapse onto one.
impl<'a> FromArg<'a> for i32 {
    fn from_arg(index: usize, arg: Option<&'a Arg>) -> Result<Self, HandlerFailure> {
        let n = f64::from_arg(index, arg)?;
        let truncated = n.trunc();
        if !truncated.is_finite() || truncated < i32::MIN as f64 || truncated > i32::MAX as f64 {
            return Err(HandlerFailure::new(
                "bridge/argument",
                format!("argument {} is not a 32-bit integer: {}", index, n),
            ));
        }
        Ok(truncated as i32)
    }
}

impl<'a> FromArg<'a> for bool {
    fn from_arg(index: usize, arg: Option<&'a Arg>) -> Result<Self, HandlerFailure> {
        match arg {
            Some(Arg::Bool(b)) => Ok(*b),
            other => Err(mismatch(index, "boolean", other)),
        }
    }
}

impl<'a> FromArg<'a> for &'a str {
    fn from_arg(index: usize, arg: Option<&'a Arg>) -> Result<Self, HandlerFailure> {
        match arg {
            Some(Arg::String(s)) => Ok(s.as_str()),
            other => Err(mismatch(index, "string", other)),
        }
    }
}

impl<'a> FromArg<'a> for String {
    fn from_arg(index: usize, arg: Option<&'a Arg>) -> Result<Self, HandlerFailure> {
        <&str>::from_arg(index, arg).map(str::to_string)
    }
}

impl<'a> FromArg<'a> for &'a ValueMap {
    fn from_arg(index: usize, arg: Option<&'a Arg>) -> Result<Self, HandlerFailure> {
        match arg {
            Some(Arg::Object(map)) => Ok(map),
            other => Err(mismatch(index, "object", other)),
        }
    }
}

impl<'a, T: FromArg<'a>> FromArg<'a> for Option<T> {
    fn from_arg(index: usize, arg: Option<&'a Arg>) -> Result<Self, HandlerFailure> {
        match arg {
            None | Some(Arg::Absent) => Ok(None),
            present => T::from_arg(index, present).map(Some),
        }
    }
}
