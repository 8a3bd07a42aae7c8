//! Tool handlers.
//!
//! A handler turns validated arguments into a remote call. The generated
//! [`OperationHandler`] validates input, maps parameters onto the request
//! described by an [`OperationDescriptor`], and dispatches it through the
//! injected [`ApiTransport`].

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::catalog::{OperationDescriptor, ParamLocation};
use super::schema::Validator;
use super::value::ParamMap;
use crate::api::{
    ApiTransport, ErrorContext, FieldError, HttpMethod, Outcome, QueryParams, StructuredError,
};

/// Trait for anything that can execute a tool call.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with the given JSON arguments.
    async fn call(&self, arguments: Value) -> Outcome<Value>;
}

/// A fully resolved HTTP request for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub query: Option<QueryParams>,
}

impl PreparedRequest {
    /// Map validated parameters onto the operation's request.
    ///
    /// Path parameters fill `{placeholder}` segments, query parameters become
    /// the query string and body parameters the JSON body. Undeclared keys go
    /// to the body for methods that carry one and to the query otherwise.
    /// Header parameters are validated but not forwarded.
    pub fn build(
        operation: &OperationDescriptor,
        params: ParamMap,
    ) -> Result<Self, StructuredError> {
        let mut path_values = Map::new();
        let mut body = Map::new();
        let mut query = QueryParams::new();

        for (name, value) in params {
            let location = operation
                .parameter(&name)
                .map(|p| p.location)
                .unwrap_or(if operation.method.has_body() {
                    ParamLocation::Body
                } else {
                    ParamLocation::Query
                });

            match location {
                ParamLocation::Path => {
                    path_values.insert(name, Value::String(value.to_query_value()));
                }
                ParamLocation::Query => {
                    query.insert(name, value.to_query_value());
                }
                ParamLocation::Body => {
                    body.insert(name, value.into());
                }
                ParamLocation::Header => {
                    debug!(operation = operation.name, header = %name, "Header parameter not forwarded");
                }
            }
        }

        let path = fill_path(operation, &path_values)?;

        Ok(Self {
            method: operation.method,
            path,
            body: (!body.is_empty() && operation.method != HttpMethod::Get)
                .then_some(Value::Object(body)),
            query: (!query.is_empty()).then_some(query),
        })
    }
}

fn fill_path(
    operation: &OperationDescriptor,
    values: &Map<String, Value>,
) -> Result<String, StructuredError> {
    let mut path = operation.path.to_string();
    let mut missing = Vec::new();

    for placeholder in operation.placeholders() {
        match values.get(placeholder).and_then(Value::as_str) {
            Some(value) if !value.is_empty() => {
                path = path.replace(&format!("{{{placeholder}}}"), &encode_segment(value));
            }
            _ => missing.push(FieldError::new(
                placeholder,
                "is required to build the request path",
            )),
        }
    }

    if missing.is_empty() {
        Ok(path)
    } else {
        Err(StructuredError::validation(missing))
    }
}

/// Percent-encode a path segment, keeping RFC 3986 unreserved characters
/// plus `@` and `:`.
fn encode_segment(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'@' | b':' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Handler generated for one catalog operation.
pub struct OperationHandler {
    operation: OperationDescriptor,
    validator: Arc<Validator>,
    transport: Option<Arc<dyn ApiTransport>>,
}

impl OperationHandler {
    pub fn new(
        operation: OperationDescriptor,
        validator: Arc<Validator>,
        transport: Option<Arc<dyn ApiTransport>>,
    ) -> Self {
        Self {
            operation,
            validator,
            transport,
        }
    }

    fn context(&self) -> ErrorContext {
        ErrorContext {
            operation: Some(self.operation.name.to_string()),
            method: Some(self.operation.method.to_string()),
            path: Some(self.operation.path.to_string()),
            attempt: None,
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for OperationHandler {
    async fn call(&self, arguments: Value) -> Outcome<Value> {
        let params = match self.validator.validate(&arguments) {
            Ok(params) => params,
            Err(errors) => {
                warn!(
                    operation = self.operation.name,
                    errors = errors.len(),
                    "Rejected tool arguments"
                );
                return Outcome::failure(
                    StructuredError::validation(errors).with_context(self.context()),
                );
            }
        };

        let Some(transport) = self.transport.as_ref() else {
            return Outcome::failure(
                StructuredError::configuration("No API transport is configured for this tool")
                    .with_context(self.context()),
            );
        };

        let request = match PreparedRequest::build(&self.operation, params) {
            Ok(request) => request,
            Err(error) => return Outcome::failure(error.with_context(self.context())),
        };

        debug!(
            operation = self.operation.name,
            method = %request.method,
            path = %request.path,
            "Dispatching tool call"
        );

        let PreparedRequest {
            method,
            path,
            body,
            query,
        } = request;

        match method {
            HttpMethod::Get => transport.get(&path, query).await,
            HttpMethod::Post => transport.post(&path, body, query).await,
            HttpMethod::Put => transport.put(&path, body, query).await,
            HttpMethod::Delete => transport.delete(&path, body, query).await,
            HttpMethod::Patch => transport.patch(&path, body, query).await,
        }
    }
}
