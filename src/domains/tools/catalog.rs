//! Catalog types describing remote operations.
//!
//! Descriptors are plain `'static` data; the concrete Evolution API catalog
//! lives in `definitions/`.

use serde::Serialize;

use crate::api::HttpMethod;

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    /// Array with unconstrained items.
    Array,
    /// Open string-keyed map.
    Object,
    /// Accepts any value.
    Any,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
            ParamType::Any => "any",
        }
    }
}

/// Where a parameter goes in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Body,
    Header,
}

/// A literal example attached to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExampleValue {
    Str(&'static str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ExampleValue {
    pub fn to_json(self) -> serde_json::Value {
        match self {
            ExampleValue::Str(s) => serde_json::Value::from(s),
            ExampleValue::Int(n) => serde_json::Value::from(n),
            ExampleValue::Float(n) => serde_json::Value::from(n),
            ExampleValue::Bool(b) => serde_json::Value::from(b),
        }
    }
}

/// One parameter of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub param_type: ParamType,
    pub required: bool,
    pub location: ParamLocation,
    pub description: &'static str,
    pub example: Option<ExampleValue>,
}

impl ParameterDescriptor {
    /// Optional parameter of the given type and location.
    pub const fn new(
        name: &'static str,
        param_type: ParamType,
        location: ParamLocation,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            param_type,
            required: false,
            location,
            description,
            example: None,
        }
    }

    /// The `{instance}` path segment every instance-scoped route takes.
    pub const fn instance() -> Self {
        Self::new(
            "instance",
            ParamType::String,
            ParamLocation::Path,
            "Name of the Evolution API instance",
        )
        .required()
    }

    pub const fn body(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self::new(name, param_type, ParamLocation::Body, description)
    }

    pub const fn query(
        name: &'static str,
        param_type: ParamType,
        description: &'static str,
    ) -> Self {
        Self::new(name, param_type, ParamLocation::Query, description)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn example(mut self, example: ExampleValue) -> Self {
        self.example = Some(example);
        self
    }
}

/// One remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperationDescriptor {
    /// Identifying name, e.g. `send-text`.
    pub name: &'static str,
    /// Controller the operation belongs to, e.g. `message`.
    pub group: &'static str,
    /// Path template with `{placeholder}` segments.
    pub path: &'static str,
    pub method: HttpMethod,
    pub description: &'static str,
    pub parameters: &'static [ParameterDescriptor],
}

impl OperationDescriptor {
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of the `{placeholder}` segments in the path template.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    names.push(&after[..end]);
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        names
    }
}
