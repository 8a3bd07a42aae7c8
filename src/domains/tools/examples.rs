//! Example parameter synthesis.
//!
//! Literal examples from the catalog win. Otherwise a value is guessed from
//! the parameter name, and if the guess does not fit the declared type the
//! type's neutral default is used.

use serde_json::{Map, Value, json};

use super::catalog::{ParamType, ParameterDescriptor};

/// Name fragments and the sample they produce, checked in order.
const NAME_HINTS: &[(&[&str], fn() -> Value)] = &[
    (&["instance"], || json!("my-instance")),
    (&["number", "phone"], || json!("5511999999999")),
    (&["text", "message"], || json!("Hello from Evolution API")),
    (&["url"], || json!("https://example.com")),
    (&["email"], || json!("user@example.com")),
    (&["name"], || json!("John Doe")),
    (&["jid", "id"], || json!("5511999999999@s.whatsapp.net")),
    (&["delay"], || json!(1200)),
    (&["enabled", "active"], || json!(true)),
];

/// Example value for one parameter.
pub fn example_for(parameter: &ParameterDescriptor) -> Value {
    if let Some(example) = parameter.example {
        return example.to_json();
    }

    let name = parameter.name.to_lowercase();
    NAME_HINTS
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| name.contains(*f)))
        .map(|(_, sample)| sample())
        .filter(|value| fits(parameter.param_type, value))
        .unwrap_or_else(|| type_default(parameter.param_type))
}

/// Example arguments for a whole operation, keyed by parameter name.
pub fn examples_for(parameters: &[ParameterDescriptor]) -> Map<String, Value> {
    parameters
        .iter()
        .map(|p| (p.name.to_string(), example_for(p)))
        .collect()
}

/// Neutral value of a declared type.
pub fn type_default(param_type: ParamType) -> Value {
    match param_type {
        ParamType::String => json!(""),
        ParamType::Number => json!(0),
        ParamType::Boolean => json!(false),
        ParamType::Array => json!([]),
        ParamType::Object => json!({}),
        ParamType::Any => Value::Null,
    }
}

fn fits(param_type: ParamType, value: &Value) -> bool {
    match param_type {
        ParamType::String => value.is_string(),
        ParamType::Number => value.is_number(),
        ParamType::Boolean => value.is_boolean(),
        ParamType::Array => value.is_array(),
        ParamType::Object => value.is_object(),
        ParamType::Any => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::catalog::ExampleValue;

    fn param(name: &'static str, param_type: ParamType) -> ParameterDescriptor {
        ParameterDescriptor::body(name, param_type, "")
    }

    #[test]
    fn test_literal_example_wins() {
        let p = param("number", ParamType::String).example(ExampleValue::Str("123"));
        assert_eq!(example_for(&p), json!("123"));
    }

    #[test]
    fn test_name_hints() {
        assert_eq!(example_for(&ParameterDescriptor::instance()), json!("my-instance"));
        assert_eq!(example_for(&param("instanceName", ParamType::String)), json!("my-instance"));
        assert_eq!(example_for(&param("number", ParamType::String)), json!("5511999999999"));
        assert_eq!(
            example_for(&param("text", ParamType::String)),
            json!("Hello from Evolution API")
        );
        assert_eq!(example_for(&param("remoteJid", ParamType::String)), json!("5511999999999@s.whatsapp.net"));
        assert_eq!(example_for(&param("delay", ParamType::Number)), json!(1200));
        assert_eq!(example_for(&param("enabled", ParamType::Boolean)), json!(true));
        assert_eq!(example_for(&param("webhookUrl", ParamType::String)), json!("https://example.com"));
    }

    #[test]
    fn test_hint_that_does_not_fit_falls_back() {
        assert_eq!(example_for(&param("readMessages", ParamType::Boolean)), json!(false));
        assert_eq!(example_for(&param("numbers", ParamType::Array)), json!([]));
        assert_eq!(example_for(&param("delay", ParamType::String)), json!(""));
    }

    #[test]
    fn test_type_defaults() {
        assert_eq!(example_for(&param("latitude", ParamType::Number)), json!(0));
        assert_eq!(example_for(&param("where", ParamType::Object)), json!({}));
        assert_eq!(example_for(&param("payload", ParamType::Any)), Value::Null);
    }

    #[test]
    fn test_examples_for_operation() {
        let params = [ParameterDescriptor::instance(), param("caption", ParamType::String)];
        let examples = examples_for(&params);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples["caption"], json!(""));
    }
}
