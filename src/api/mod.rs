//! Remote API layer.
//!
//! This module contains everything needed to talk to the Evolution API:
//!
//! - `error` - The closed failure taxonomy and [`StructuredError`]
//! - `classifier` - Turns raw failures into structured errors
//! - `retry` - Bounded exponential backoff around a single call
//! - `outcome` - The [`Outcome`] value returned by every call
//! - `client` - The [`ApiTransport`] capability and its reqwest implementation

mod classifier;
mod client;
mod error;
mod outcome;
mod retry;

#[cfg(test)]
pub(crate) mod testing;

pub use classifier::{ErrorClassifier, Failure};
pub use client::{ApiTransport, HttpApiClient, HttpMethod, QueryParams};
pub use error::{
    DEFAULT_RETRY_AFTER_SECS, ErrorContext, ErrorDetails, ErrorKind, FieldError, Severity,
    StructuredError,
};
pub use outcome::Outcome;
pub use retry::{RequestCounter, RequestExecutor, RetryPolicy};
