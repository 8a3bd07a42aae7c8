//! Closed value domain for validated tool parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A validated parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

/// Validated parameters keyed by name.
pub type ParamMap = BTreeMap<String, ParamValue>;

impl ParamValue {
    /// Short name of the variant, used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Number(_) => "number",
            ParamValue::String(_) => "string",
            ParamValue::List(_) => "array",
            ParamValue::Map(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render as a single query-string or path value.
    ///
    /// Lists are comma-joined; maps are rendered as JSON.
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::Null => String::new(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Number(n) => n.to_string(),
            ParamValue::String(s) => s.clone(),
            ParamValue::List(items) => items
                .iter()
                .map(ParamValue::to_query_value)
                .collect::<Vec<_>>()
                .join(","),
            ParamValue::Map(_) => Value::from(self.clone()).to_string(),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => ParamValue::Number(n),
            Value::String(s) => ParamValue::String(s),
            Value::Array(items) => ParamValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ParamValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<ParamValue> for Value {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Null => Value::Null,
            ParamValue::Bool(b) => Value::Bool(b),
            ParamValue::Number(n) => Value::Number(n),
            ParamValue::String(s) => Value::String(s),
            ParamValue::List(items) => Value::Array(items.into_iter().map(Into::into).collect()),
            ParamValue::Map(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

/// Convert validated parameters into a JSON object.
pub fn to_json_object(params: ParamMap) -> Value {
    Value::Object(params.into_iter().map(|(k, v)| (k, v.into())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_conversion_keeps_integers() {
        let original = json!({"delay": 1200, "ratio": 0.5, "tags": ["a", "b"], "nested": {"ok": true}});
        let value = ParamValue::from(original.clone());
        assert_eq!(Value::from(value), original);
    }

    #[test]
    fn test_query_rendering() {
        assert_eq!(ParamValue::from(json!(true)).to_query_value(), "true");
        assert_eq!(ParamValue::from(json!(42)).to_query_value(), "42");
        assert_eq!(ParamValue::from(json!(["a", 1])).to_query_value(), "a,1");
        assert_eq!(ParamValue::from(json!({"k": "v"})).to_query_value(), "{\"k\":\"v\"}");
        assert_eq!(ParamValue::Null.to_query_value(), "");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ParamValue::from(json!([])).type_name(), "array");
        assert_eq!(ParamValue::from(json!({})).type_name(), "object");
        assert_eq!(ParamValue::from(json!("x")).type_name(), "string");
    }
}
