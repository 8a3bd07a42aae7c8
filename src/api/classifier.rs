//! Failure classification.
//!
//! Turns raw failures (connection errors, timeouts, HTTP error responses and
//! uncategorized errors) into [`StructuredError`] values.

use serde_json::Value;
use tracing::debug;

use super::error::{
    DEFAULT_RETRY_AFTER_SECS, ErrorContext, ErrorDetails, ErrorKind, StructuredError,
};

/// A failure before classification.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Already classified; passed through unchanged.
    Structured(StructuredError),
    /// No response was received (DNS, refused, reset).
    Connection(String),
    /// The request exceeded its timeout.
    Timeout(String),
    /// The API answered with a non-success status.
    Http {
        status: u16,
        body: Option<Value>,
        retry_after_secs: Option<u64>,
    },
    /// Anything that is not a failed network or HTTP call.
    Unexpected(String),
}

impl Failure {
    pub fn http(status: u16, body: Option<Value>) -> Self {
        Self::Http {
            status,
            body,
            retry_after_secs: None,
        }
    }
}

impl From<StructuredError> for Failure {
    fn from(error: StructuredError) -> Self {
        Self::Structured(error)
    }
}

impl From<reqwest::Error> for Failure {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() || error.is_request() {
            Self::Connection(error.to_string())
        } else if let Some(status) = error.status() {
            Self::http(status.as_u16(), None)
        } else {
            Self::Unexpected(error.to_string())
        }
    }
}

/// Classifies failures using the fixed status taxonomy.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a failure, attaching `context` when the result has none.
    pub fn classify(&self, failure: Failure, context: Option<ErrorContext>) -> StructuredError {
        let error = match failure {
            Failure::Structured(error) => error,
            Failure::Connection(message) => StructuredError::network(format!(
                "{}: {message}",
                ErrorKind::NetworkError.default_message()
            ))
            .with_code("CONNECTION_FAILED"),
            Failure::Timeout(message) => StructuredError::timeout(format!(
                "{}: {message}",
                ErrorKind::TimeoutError.default_message()
            ))
            .with_code("TIMEOUT"),
            Failure::Http {
                status,
                body,
                retry_after_secs,
            } => Self::classify_status(status, body, retry_after_secs),
            Failure::Unexpected(message) => StructuredError::unknown(message),
        };

        debug!(kind = %error.kind, retryable = error.retryable, "Classified failure");

        match (error.context.is_none(), context) {
            (true, Some(context)) => error.with_context(context),
            _ => error,
        }
    }

    /// Map an HTTP status to its kind.
    pub fn kind_for_status(status: u16) -> ErrorKind {
        match status {
            400 | 422 => ErrorKind::ValidationError,
            401 => ErrorKind::AuthenticationError,
            403 => ErrorKind::PermissionError,
            404 => ErrorKind::ResourceNotFound,
            429 => ErrorKind::RateLimitError,
            502 => ErrorKind::NetworkError,
            504 => ErrorKind::TimeoutError,
            _ => ErrorKind::ApiError,
        }
    }

    fn classify_status(
        status: u16,
        body: Option<Value>,
        retry_after_secs: Option<u64>,
    ) -> StructuredError {
        let kind = Self::kind_for_status(status);
        let message = body
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| format!("{} (HTTP {status})", kind.default_message()));

        let error = match (kind, body) {
            (ErrorKind::RateLimitError, body) => {
                let retry_after_secs = retry_after_secs.unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                StructuredError::rate_limit(message, retry_after_secs)
                    .with_details(ErrorDetails::RateLimit {
                        retry_after_secs,
                        body,
                    })
            }
            (_, Some(body)) => {
                StructuredError::new(kind, message).with_details(ErrorDetails::Response { body })
            }
            (_, None) => StructuredError::new(kind, message),
        };

        error.with_code(format!("HTTP_{status}")).with_status(status)
    }
}

/// Pull a human message out of an API error body.
///
/// Handles plain strings, `{"message": ..}`, `{"error": ..}` and the nested
/// `{"response": {"message": [..]}}` shape.
fn extract_message(body: &Value) -> Option<String> {
    fn text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().filter_map(text).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }

    match body {
        Value::String(_) => text(body),
        Value::Object(map) => map
            .get("response")
            .and_then(|r| r.get("message"))
            .and_then(text)
            .or_else(|| map.get("message").and_then(text))
            .or_else(|| map.get("error").and_then(text)),
        _ => None,
    }
}
