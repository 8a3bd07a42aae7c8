//! Tool Factory - builds one [`Tool`] from one catalog operation.

use std::sync::Arc;

use tracing::debug;

use super::catalog::OperationDescriptor;
use super::examples::examples_for;
use super::handlers::OperationHandler;
use super::schema::Validator;
use super::tool::Tool;
use crate::api::{ApiTransport, ErrorClassifier};

/// Prefix applied to every generated tool name unless overridden.
pub const DEFAULT_NAME_PREFIX: &str = "evolution_";

/// Dependencies injected into generated tools.
#[derive(Clone, Default)]
pub struct ToolCollaborators {
    /// Transport used by the handler; calls fail with
    /// `CONFIGURATION_ERROR` when absent.
    pub transport: Option<Arc<dyn ApiTransport>>,
    pub classifier: ErrorClassifier,
    /// Replaces the validator derived from the descriptor.
    pub validator_override: Option<Arc<Validator>>,
}

impl ToolCollaborators {
    pub fn with_transport(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport: Some(transport),
            ..Self::default()
        }
    }
}

/// Builds tools from operation descriptors.
#[derive(Debug, Clone)]
pub struct ToolFactory {
    prefix: String,
}

impl Default for ToolFactory {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_PREFIX)
    }
}

impl ToolFactory {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `prefix + slug(descriptor.name)`.
    pub fn tool_name(&self, descriptor: &OperationDescriptor) -> String {
        format!("{}{}", self.prefix, slugify(descriptor.name))
    }

    /// `"<Group> Controller: <description>"`.
    pub fn tool_description(descriptor: &OperationDescriptor) -> String {
        format!(
            "{} Controller: {}",
            capitalize(descriptor.group),
            descriptor.description
        )
    }

    /// Build the tool for `descriptor`.
    pub fn build(&self, descriptor: &OperationDescriptor, collaborators: &ToolCollaborators) -> Tool {
        let name = self.tool_name(descriptor);
        let validator = collaborators
            .validator_override
            .clone()
            .unwrap_or_else(|| Arc::new(Validator::from_parameters(descriptor.parameters)));

        let handler = OperationHandler::new(
            *descriptor,
            validator.clone(),
            collaborators.transport.clone(),
        );

        debug!(tool = %name, operation = descriptor.name, "Built tool");

        Tool::new(
            name,
            Self::tool_description(descriptor),
            descriptor.group,
            validator,
            Arc::new(handler),
        )
        .with_examples(examples_for(descriptor.parameters))
        .with_classifier(collaborators.classifier.clone())
    }
}

/// Lowercase, with every non-alphanumeric character replaced by `_`.
pub fn slugify(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
