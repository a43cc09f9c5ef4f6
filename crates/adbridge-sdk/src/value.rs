//! BridgeValue - runtime-agnostic value crossing the bridge
//!
//! The scripting side hands the bridge an ordered list of these; handlers
//! hand them back as results. `Undefined` doubles as the "absent" marker
//! for optional trailing arguments.

use std::collections::BTreeMap;
use std::fmt;

/// Object payload of a [`BridgeValue`]
pub type ValueMap = BTreeMap<String, BridgeValue>;

/// Largest integer a double represents exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Tagged value exchanged between the scripting caller and native handlers.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum BridgeValue {
    /// Missing or explicitly `undefined`
    #[default]
    Undefined,
    /// Explicit `null`
    Null,
    /// Boolean
    Bool(bool),
    /// Number (scripting numbers are doubles)
    Number(f64),
    /// String
    String(String),
    /// Ordered list of values
    Array(Vec<BridgeValue>),
    /// Structured object
    Object(ValueMap),
}

impl BridgeValue {
    /// Build an empty object
    pub fn object() -> Self {
        BridgeValue::Object(ValueMap::new())
    }

    /// Build an object from key/value pairs
    pub fn object_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, BridgeValue)>,
    {
        BridgeValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check for `undefined`
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, BridgeValue::Undefined)
    }

    /// Check for `null`
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, BridgeValue::Null)
    }

    /// Extract a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            BridgeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BridgeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BridgeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract an object
    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            BridgeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Extract an array
    pub fn as_array(&self) -> Option<&[BridgeValue]> {
        match self {
            BridgeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Field lookup on an object value
    pub fn get(&self, key: &str) -> Option<&BridgeValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Type name as the scripting side would report it
    pub const fn type_name(&self) -> &'static str {
        match self {
            BridgeValue::Undefined => "undefined",
            BridgeValue::Null => "null",
            BridgeValue::Bool(_) => "boolean",
            BridgeValue::Number(_) => "number",
            BridgeValue::String(_) => "string",
            BridgeValue::Array(_) => "array",
            BridgeValue::Object(_) => "object",
        }
    }

    /// Convert to JSON. `Undefined` becomes `null`, object fields holding
    /// `Undefined` are dropped, non-finite numbers become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            BridgeValue::Undefined | BridgeValue::Null => Json::Null,
            BridgeValue::Bool(b) => Json::Bool(*b),
            // Integral values become JSON integers so they decode into int fields.
            BridgeValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                Json::from(*n as i64)
            }
            BridgeValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            BridgeValue::String(s) => Json::String(s.clone()),
            BridgeValue::Array(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            BridgeValue::Object(map) => Json::Object(
                map.iter()
                    .filter(|(_, v)| !v.is_undefined())
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for BridgeValue {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => BridgeValue::Null,
            Json::Bool(b) => BridgeValue::Bool(b),
            Json::Number(n) => BridgeValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => BridgeValue::String(s),
            Json::Array(items) => BridgeValue::Array(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => {
                BridgeValue::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for BridgeValue {
    fn from(b: bool) -> Self {
        BridgeValue::Bool(b)
    }
}

impl From<f64> for BridgeValue {
    fn from(n: f64) -> Self {
        BridgeValue::Number(n)
    }
}

impl From<i32> for BridgeValue {
    fn from(n: i32) -> Self {
        BridgeValue::Number(n as f64)
    }
}

impl From<&str> for BridgeValue {
    fn from(s: &str) -> Self {
        BridgeValue::String(s.to_string())
    }
}

impl From<String> for BridgeValue {
    fn from(s: String) -> Self {
        BridgeValue::String(s)
    }
}

impl From<ValueMap> for BridgeValue {
    fn from(map: ValueMap) -> Self {
        BridgeValue::Object(map)
    }
}

impl<T: Into<BridgeValue>> From<Vec<T>> for BridgeValue {
    fn from(items: Vec<T>) -> Self {
        BridgeValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<BridgeValue>> From<Option<T>> for BridgeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(BridgeValue::Null)
    }
}

impl fmt::Display for BridgeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeValue::Undefined => write!(f, "undefined"),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_names() {
        assert_eq!(BridgeValue::Undefined.type_name(), "undefined");
        assert_eq!(BridgeValue::Null.type_name(), "null");
        assert_eq!(BridgeValue::from(3).type_name(), "number");
        assert_eq!(BridgeValue::from("x").type_name(), "string");
        assert_eq!(BridgeValue::from(true).type_name(), "boolean");
        assert_eq!(BridgeValue::object().type_name(), "object");
    }

    #[test]
    fn test_from_json_object() {
        let v = BridgeValue::from(json!({ "requestOptions": { "keywords": ["a"] }, "n": 2 }));
        assert_eq!(v.get("n").and_then(BridgeValue::as_number), Some(2.0));
        let opts = v.get("requestOptions").unwrap();
        assert_eq!(opts.get("keywords").and_then(BridgeValue::as_array).map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_to_json_drops_undefined_fields() {
        let v = BridgeValue::object_from([
            ("a", BridgeValue::Undefined),
            ("b", BridgeValue::Null),
            ("c", BridgeValue::from("x")),
        ]);
        assert_eq!(v.to_json(), json!({ "b": null, "c": "x" }));
    }

    #[test]
    fn test_non_finite_number_is_null_json() {
        assert_eq!(BridgeValue::Number(f64::INFINITY).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_integral_numbers_are_json_integers() {
        assert_eq!(BridgeValue::from(3).to_json(), json!(3));
        assert!(BridgeValue::from(3).to_json().is_i64());
        assert!(BridgeValue::from(2.5).to_json().is_f64());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(BridgeValue::from(None::<String>), BridgeValue::Null);
        assert_eq!(BridgeValue::from(Some("tc")), BridgeValue::String("tc".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(BridgeValue::Undefined.to_string(), "undefined");
        assert_eq!(BridgeValue::from("a").to_string(), "\"a\"");
    }
}
