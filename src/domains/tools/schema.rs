//! Parameter validators built from catalog descriptors.
//!
//! A [`Validator`] checks a JSON argument object against the declared
//! parameters of an operation. Validation is pure and synchronous.

use schemars::{Schema, json_schema};
use serde_json::{Map, Value};

use super::catalog::{ParamType, ParameterDescriptor};
use super::value::{ParamMap, ParamValue};
use crate::api::FieldError;

/// Rule for one declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamRule {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
    /// Documentation only; never affects validation.
    pub description: String,
}

impl ParamRule {
    pub fn from_descriptor(descriptor: &ParameterDescriptor) -> Self {
        Self {
            name: descriptor.name.to_string(),
            param_type: descriptor.param_type,
            required: descriptor.required,
            description: descriptor.description.to_string(),
        }
    }

    /// Check one present value against the declared type.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        let ok = match self.param_type {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Array => value.is_array(),
            ParamType::Object => value.is_object(),
            ParamType::Any => true,
        };
        if ok {
            Ok(())
        } else {
            Err(format!(
                "expected {}, received {}",
                self.param_type.as_str(),
                ParamValue::from(value.clone()).type_name()
            ))
        }
    }

    fn property_schema(&self) -> Value {
        let mut schema = match self.param_type {
            ParamType::String => serde_json::json!({ "type": "string" }),
            ParamType::Number => serde_json::json!({ "type": "number" }),
            ParamType::Boolean => serde_json::json!({ "type": "boolean" }),
            ParamType::Array => serde_json::json!({ "type": "array", "items": {} }),
            ParamType::Object => {
                serde_json::json!({ "type": "object", "additionalProperties": true })
            }
            ParamType::Any => serde_json::json!({}),
        };
        if !self.description.is_empty() {
            schema["description"] = Value::from(self.description.clone());
        }
        schema
    }
}

/// Composite validator for an operation's parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validator {
    rules: Vec<ParamRule>,
}

impl Validator {
    pub fn new(rules: Vec<ParamRule>) -> Self {
        Self { rules }
    }

    /// Build a validator from catalog parameter descriptors.
    pub fn from_parameters(parameters: &[ParameterDescriptor]) -> Self {
        Self::new(parameters.iter().map(ParamRule::from_descriptor).collect())
    }

    pub fn rules(&self) -> &[ParamRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&ParamRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|r| r.required)
            .map(|r| r.name.as_str())
    }

    /// Validate an argument object.
    ///
    /// `null` is treated as an empty object. Undeclared keys are passed
    /// through unchecked. Explicit `null` for an optional parameter counts as
    /// absent.
    pub fn validate(&self, input: &Value) -> Result<ParamMap, Vec<FieldError>> {
        let empty = Map::new();
        let object = match input {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(vec![FieldError::new(
                    "(root)",
                    format!(
                        "expected object, received {}",
                        ParamValue::from(other.clone()).type_name()
                    ),
                )]);
            }
        };

        let mut errors = Vec::new();
        for rule in &self.rules {
            match object.get(&rule.name) {
                None | Some(Value::Null) if rule.required => {
                    errors.push(FieldError::new(&rule.name, "is required"));
                }
                None | Some(Value::Null) => {}
                Some(value) => {
                    if let Err(message) = rule.check(value) {
                        errors.push(FieldError::new(&rule.name, message));
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(object
            .iter()
            .filter(|(key, value)| !(value.is_null() && self.rule(key).is_some()))
            .map(|(key, value)| (key.clone(), ParamValue::from(value.clone())))
            .collect())
    }

    /// JSON Schema describing the accepted argument object.
    pub fn json_schema(&self) -> Schema {
        let properties: Map<String, Value> = self
            .rules
            .iter()
            .map(|rule| (rule.name.clone(), rule.property_schema()))
            .collect();
        let required: Vec<&str> = self.required_names().collect();

        json_schema!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::catalog::ParamLocation;
    use serde_json::json;

    const PARAMS: &[ParameterDescriptor] = &[
        ParameterDescriptor::instance(),
        ParameterDescriptor::body("number", ParamType::String, "Recipient").required(),
        ParameterDescriptor::body("delay", ParamType::Number, "Delay in ms"),
        ParameterDescriptor::body("linkPreview", ParamType::Boolean, "Show preview"),
        ParameterDescriptor::body("mentioned", ParamType::Array, "Mentions"),
        ParameterDescriptor::body("quoted", ParamType::Object, "Quoted message"),
        ParameterDescriptor::new("extra", ParamType::Any, ParamLocation::Body, ""),
    ];

    fn validator() -> Validator {
        Validator::from_parameters(PARAMS)
    }

    #[test]
    fn test_accepts_valid_input_and_passes_unknown_keys() {
        let params = validator()
            .validate(&json!({
                "instance": "i1",
                "number": "5511999999999",
                "delay": 100,
                "mentioned": ["a"],
                "quoted": {"key": {"id": "x"}},
                "extra": [1, {"x": null}],
                "undeclared": "kept"
            }))
            .unwrap();
        assert_eq!(params["number"], ParamValue::String("5511999999999".into()));
        assert_eq!(params["undeclared"], ParamValue::String("kept".into()));
        assert!(!params.contains_key("linkPreview"));
    }

    #[test]
    fn test_reports_every_bad_field() {
        let errors = validator()
            .validate(&json!({"instance": 5, "delay": "soon", "linkPreview": "yes"}))
            .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["instance", "number", "delay", "linkPreview"]);
        assert_eq!(errors[1].message, "is required");
        assert_eq!(errors[2].message, "expected number, received string");
    }

    #[test]
    fn test_null_handling() {
        let v = validator();
        assert!(v.validate(&Value::Null).is_err());

        let params = v
            .validate(&json!({"instance": "i1", "number": "1", "delay": null}))
            .unwrap();
        assert!(!params.contains_key("delay"));

        let errors = v.validate(&json!({"instance": "i1", "number": null})).unwrap_err();
        assert_eq!(errors[0].field, "number");

        assert!(Validator::default().validate(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_object() {
        let errors = validator().validate(&json!(["a"])).unwrap_err();
        assert_eq!(errors[0].field, "(root)");
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = validator().json_schema();
        let object = schema.as_object().unwrap();
        assert_eq!(object["type"], "object");
        assert_eq!(object["required"], json!(["instance", "number"]));
        assert_eq!(object["properties"]["delay"]["type"], "number");
        assert_eq!(object["properties"]["delay"]["description"], "Delay in ms");
        assert_eq!(object["properties"]["extra"], json!({}));
        assert_eq!(object["properties"]["mentioned"]["items"], json!({}));
    }
}
