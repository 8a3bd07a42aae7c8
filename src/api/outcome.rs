//! The universal result value returned by transports and tool handlers.

use serde::{Deserialize, Serialize};

use super::error::StructuredError;

/// Result of one transport call or tool invocation.
///
/// Failures are values, never panics: a failed outcome carries the
/// classified [`StructuredError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome<T> {
    /// Whether the call succeeded.
    pub success: bool,

    /// Payload of a successful call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Classified failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StructuredError>,

    /// HTTP status reported by the remote API, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl<T> Outcome<T> {
    /// Create a successful outcome.
    pub fn success(data: T, status_code: u16) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status_code: Some(status_code),
        }
    }

    /// Create a failed outcome. The status code is taken from the error.
    pub fn failure(error: StructuredError) -> Self {
        Self {
            success: false,
            data: None,
            status_code: error.status_code,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&StructuredError> {
        self.error.as_ref()
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, StructuredError> {
        match (self.data, self.error) {
            (Some(data), None) if self.success => Ok(data),
            (_, Some(error)) => Err(error),
            _ => Err(StructuredError::internal(
                "outcome carries neither data nor error",
            )),
        }
    }

    /// Transform the success payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            status_code: self.status_code,
        }
    }
}
