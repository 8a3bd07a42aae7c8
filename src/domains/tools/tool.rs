//! The generated tool record.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use schemars::Schema;
use serde_json::{Map, Value};
use tracing::error;

use super::handlers::ToolHandler;
use super::schema::Validator;
use crate::api::{ErrorClassifier, ErrorContext, Failure, Outcome};

/// An invocable, schema-validated wrapper around one remote operation.
#[derive(Clone)]
pub struct Tool {
    /// Unique tool name.
    pub name: String,

    /// Description shown to clients.
    pub description: String,

    /// Controller the operation belongs to.
    pub group: String,

    /// Validator for the tool's arguments.
    pub validator: Arc<Validator>,

    /// Example arguments.
    pub examples: Map<String, Value>,

    handler: Arc<dyn ToolHandler>,
    classifier: ErrorClassifier,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        group: impl Into<String>,
        validator: Arc<Validator>,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            group: group.into(),
            validator,
            examples: Map::new(),
            handler,
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn with_examples(mut self, examples: Map<String, Value>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// JSON Schema of the accepted arguments.
    pub fn json_schema(&self) -> Schema {
        self.validator.json_schema()
    }

    /// Invoke the tool.
    ///
    /// Always resolves to an [`Outcome`]; a panic inside the handler is
    /// reported as `UNKNOWN_ERROR` with the panic message preserved.
    pub async fn call(&self, arguments: Value) -> Outcome<Value> {
        match AssertUnwindSafe(self.handler.call(arguments))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(tool = %self.name, %message, "Tool handler panicked");
                Outcome::failure(self.classifier.classify(
                    Failure::Unexpected(message),
                    Some(ErrorContext::operation(self.name.clone())),
                ))
            }
        }
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("group", &self.group)
            .field("parameters", &self.validator.rules().len())
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ErrorDetails, ErrorKind};
    use serde_json::json;

    struct PanickingHandler;

    #[async_trait::async_trait]
    impl ToolHandler for PanickingHandler {
        async fn call(&self, _arguments: Value) -> Outcome<Value> {
            panic!("catalog entry is broken")
        }
    }

    struct EchoHandler;

    #[async_trait::async_trait]
    impl ToolHandler for EchoHandler {
        async fn call(&self, arguments: Value) -> Outcome<Value> {
            Outcome::success(arguments, 200)
        }
    }

    #[tokio::test]
    async fn test_panic_becomes_unknown_error() {
        let tool = Tool::new(
            "evolution_broken",
            "Broken",
            "test",
            Arc::new(Validator::default()),
            Arc::new(PanickingHandler),
        );

        let outcome = tool.call(json!({})).await;
        let error = outcome.error.unwrap();
        assert_eq!(error.kind, ErrorKind::UnknownError);
        assert_eq!(
            error.details,
            Some(ErrorDetails::Message {
                message: "catalog entry is broken".into()
            })
        );
        assert_eq!(
            error.context.and_then(|c| c.operation).as_deref(),
            Some("evolution_broken")
        );
    }

    #[test]
    fn test_call_passes_outcome_through() {
        let tool = Tool::new(
            "evolution_echo",
            "Echo",
            "test",
            Arc::new(Validator::default()),
            Arc::new(EchoHandler),
        );
        let outcome = tokio_test::block_on(tool.call(json!({"a": 1})));
        assert_eq!(outcome.data, Some(json!({"a": 1})));
        assert!(format!("{tool:?}").contains("evolution_echo"));
    }
}
