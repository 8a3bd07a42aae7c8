//! Application-level error type.
//!
//! Failed tool calls are not errors here; they travel as failed
//! [`Outcome`](crate::api::Outcome) values. This type covers what can stop
//! the server from being built: registry conflicts and an unusable API
//! configuration. Transport failures keep their own
//! [`TransportError`](super::transport::TransportError).

use thiserror::Error;

/// Result alias used across `core`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Tool generation or lookup failed.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// The Evolution API client could not be set up.
    #[error("API error: {0}")]
    Api(#[from] crate::api::StructuredError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ErrorKind, StructuredError};
    use crate::domains::tools::ToolError;

    #[test]
    fn test_conversions_keep_source_message() {
        let err: Error = ToolError::duplicate("evolution_send_text").into();
        assert_eq!(
            err.to_string(),
            "Tool error: Tool already registered: evolution_send_text"
        );

        let err: Error = StructuredError::configuration("base URL is empty").into();
        assert_eq!(
            err.to_string(),
            "API error: [CONFIGURATION_ERROR] base URL is empty"
        );
    }

    #[test]
    fn test_api_error_keeps_kind() {
        let err: Error = StructuredError::configuration("x").into();
        assert!(matches!(err, Error::Api(e) if e.kind == ErrorKind::ConfigurationError));
    }
}
