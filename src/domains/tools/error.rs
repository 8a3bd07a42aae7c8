//! Tool-specific error types.

use thiserror::Error;

/// Errors raised while building or maintaining the tool registry.
///
/// Failures of individual tool calls are not errors; they are reported as
/// failed [`Outcome`](crate::api::Outcome) values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    /// A tool with the same name is already registered.
    #[error("Tool already registered: {0}")]
    Duplicate(String),

    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),
}

impl ToolError {
    /// Create a new "duplicate" error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::Duplicate(name.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}
