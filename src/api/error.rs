//! Structured error values returned by the remote API layer.
//!
//! Every failure surfaced to a tool caller is a [`StructuredError`]: a single
//! value with a closed [`ErrorKind`] and a per-kind [`ErrorDetails`] payload.
//! Retryability and severity are derived from the kind and never set by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed taxonomy of failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ConfigurationError,
    AuthenticationError,
    ApiError,
    NetworkError,
    ValidationError,
    TimeoutError,
    RateLimitError,
    PermissionError,
    ResourceNotFound,
    InternalError,
    UnknownError,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 11] = [
        ErrorKind::ConfigurationError,
        ErrorKind::AuthenticationError,
        ErrorKind::ApiError,
        ErrorKind::NetworkError,
        ErrorKind::ValidationError,
        ErrorKind::TimeoutError,
        ErrorKind::RateLimitError,
        ErrorKind::PermissionError,
        ErrorKind::ResourceNotFound,
        ErrorKind::InternalError,
        ErrorKind::UnknownError,
    ];

    /// Whether a failure of this kind may succeed if the call is repeated.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::NetworkError | ErrorKind::TimeoutError | ErrorKind::RateLimitError
        )
    }

    /// Severity attached to every error of this kind.
    pub fn severity(self) -> Severity {
        match self {
            ErrorKind::ValidationError | ErrorKind::ResourceNotFound => Severity::Low,
            ErrorKind::NetworkError | ErrorKind::TimeoutError | ErrorKind::RateLimitError => {
                Severity::Medium
            }
            ErrorKind::ApiError | ErrorKind::PermissionError | ErrorKind::UnknownError => {
                Severity::High
            }
            ErrorKind::ConfigurationError
            | ErrorKind::AuthenticationError
            | ErrorKind::InternalError => Severity::Critical,
        }
    }

    /// Wire name, e.g. `RATE_LIMIT_ERROR`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorKind::AuthenticationError => "AUTHENTICATION_ERROR",
            ErrorKind::ApiError => "API_ERROR",
            ErrorKind::NetworkError => "NETWORK_ERROR",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::TimeoutError => "TIMEOUT_ERROR",
            ErrorKind::RateLimitError => "RATE_LIMIT_ERROR",
            ErrorKind::PermissionError => "PERMISSION_ERROR",
            ErrorKind::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorKind::InternalError => "INTERNAL_ERROR",
            ErrorKind::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Message used when the failure itself carries nothing better.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::ConfigurationError => "The server is not configured to reach the API",
            ErrorKind::AuthenticationError => "Authentication with the API failed",
            ErrorKind::ApiError => "The API returned an error",
            ErrorKind::NetworkError => "Could not reach the API",
            ErrorKind::ValidationError => "The request parameters are invalid",
            ErrorKind::TimeoutError => "The request to the API timed out",
            ErrorKind::RateLimitError => "Too many requests sent to the API",
            ErrorKind::PermissionError => "Not allowed to perform this operation",
            ErrorKind::ResourceNotFound => "The requested resource was not found",
            ErrorKind::InternalError => "An internal error occurred",
            ErrorKind::UnknownError => "An unexpected error occurred",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a failure is for the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Where a failure happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<u32>,
}

impl ErrorContext {
    /// Context for a named operation.
    pub fn operation(name: impl Into<String>) -> Self {
        Self {
            operation: Some(name.into()),
            ..Self::default()
        }
    }

    /// Context for one HTTP request.
    pub fn request(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Kind-specific payload carried by a [`StructuredError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorDetails {
    /// Per-field validation messages.
    Fields { errors: Vec<FieldError> },
    /// Body returned by the remote API.
    Response { body: serde_json::Value },
    /// Rate limit information, with the response body when the API sent one.
    RateLimit {
        retry_after_secs: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<serde_json::Value>,
    },
    /// The original message of an uncategorized failure.
    Message { message: String },
}

/// A classified, typed failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub severity: Severity,
    pub retryable: bool,
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl StructuredError {
    /// Create an error of the given kind. Severity, retryability and
    /// suggestions follow from the kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            status_code: None,
            severity: kind.severity(),
            retryable: kind.is_retryable(),
            suggestions: default_suggestions(kind),
            timestamp: Utc::now(),
            context: None,
            details: None,
        }
    }

    /// Error of the given kind with its default message.
    pub fn of_kind(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigurationError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthenticationError, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApiError, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TimeoutError, message)
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceNotFound, message)
    }

    /// Validation failure listing every rejected field.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let message = if errors.is_empty() {
            ErrorKind::ValidationError.default_message().to_string()
        } else {
            let fields: Vec<String> = errors.iter().map(ToString::to_string).collect();
            format!("Invalid parameters: {}", fields.join("; "))
        };
        Self::new(ErrorKind::ValidationError, message)
            .with_details(ErrorDetails::Fields { errors })
    }

    /// Rate limit failure; the wait time is echoed in the suggestions.
    pub fn rate_limit(message: impl Into<String>, retry_after_secs: u64) -> Self {
        let mut error = Self::new(ErrorKind::RateLimitError, message)
            .with_details(ErrorDetails::RateLimit {
                retry_after_secs,
                body: None,
            });
        error.suggestions[0] = format!("Wait {retry_after_secs} seconds before retrying");
        error
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(ErrorKind::InternalError, message.clone())
            .with_details(ErrorDetails::Message { message })
    }

    /// Uncategorized failure; the original message is kept in `details`.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorKind::UnknownError,
            format!("{}: {message}", ErrorKind::UnknownError.default_message()),
        )
        .with_details(ErrorDetails::Message { message })
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Field errors, if this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match &self.details {
            Some(ErrorDetails::Fields { errors }) => errors,
            _ => &[],
        }
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for StructuredError {}

/// Default seconds to wait after a rate limit without a `Retry-After` hint.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

fn default_suggestions(kind: ErrorKind) -> Vec<String> {
    let suggestions: &[&str] = match kind {
        ErrorKind::ConfigurationError => &[
            "Set EVOLUTION_API_URL and EVOLUTION_API_KEY",
            "Restart the server after changing the configuration",
        ],
        ErrorKind::AuthenticationError => &[
            "Verify the API credentials",
            "Check that EVOLUTION_API_KEY matches the key configured on the API",
        ],
        ErrorKind::ApiError => &[
            "Check the API server logs",
            "Retry later if the service is degraded",
        ],
        ErrorKind::NetworkError => &[
            "Check that the API server is running",
            "Verify EVOLUTION_API_URL and network connectivity",
        ],
        ErrorKind::ValidationError => &[
            "Check the parameter names and types against the tool schema",
            "Provide every required parameter",
        ],
        ErrorKind::TimeoutError => &[
            "Retry the request",
            "Increase EVOLUTION_TIMEOUT_MS if the API is slow",
        ],
        ErrorKind::RateLimitError => &[
            "Wait 60 seconds before retrying",
            "Reduce the request rate",
        ],
        ErrorKind::PermissionError => &[
            "Check that the API key has access to this instance",
        ],
        ErrorKind::ResourceNotFound => &[
            "Check that the instance or resource exists",
            "Verify identifiers such as the instance name",
        ],
        ErrorKind::InternalError => &["Report the issue with the server logs attached"],
        ErrorKind::UnknownError => &[
            "Retry the request",
            "Report the issue if it persists",
        ],
    };
    suggestions.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_follows_kind() {
        for kind in ErrorKind::ALL {
            let error = StructuredError::of_kind(kind);
            assert_eq!(error.retryable, kind.is_retryable(), "{kind}");
            assert_eq!(error.severity, kind.severity(), "{kind}");
            assert!(!error.suggestions.is_empty(), "{kind}");
        }
    }

    #[test]
    fn test_only_transient_kinds_are_retryable() {
        let retryable: Vec<_> = ErrorKind::ALL
            .into_iter()
            .filter(|k| k.is_retryable())
            .collect();
        assert_eq!(
            retryable,
            vec![
                ErrorKind::NetworkError,
                ErrorKind::TimeoutError,
                ErrorKind::RateLimitError
            ]
        );
    }

    #[test]
    fn test_kind_serializes_as_wire_name() {
        let value = serde_json::to_value(ErrorKind::ResourceNotFound).unwrap();
        assert_eq!(value, serde_json::json!("RESOURCE_NOT_FOUND"));
        for kind in ErrorKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }

    #[test]
    fn test_validation_lists_fields() {
        let error = StructuredError::validation(vec![
            FieldError::new("number", "is required"),
            FieldError::new("delay", "expected number"),
        ]);
        assert_eq!(error.kind, ErrorKind::ValidationError);
        assert_eq!(error.field_errors().len(), 2);
        assert!(error.message.contains("number: is required"));
        assert!(!error.retryable);
    }

    #[test]
    fn test_rate_limit_suggests_wait() {
        let error = StructuredError::rate_limit("slow down", 12);
        assert!(error.retryable);
        assert_eq!(error.suggestions[0], "Wait 12 seconds before retrying");
        assert_eq!(
            error.details,
            Some(ErrorDetails::RateLimit {
                retry_after_secs: 12,
                body: None
            })
        );
    }

    #[test]
    fn test_unknown_preserves_original_message() {
        let error = StructuredError::unknown("boom");
        assert_eq!(error.kind, ErrorKind::UnknownError);
        assert_eq!(
            error.details,
            Some(ErrorDetails::Message {
                message: "boom".to_string()
            })
        );
    }
}
