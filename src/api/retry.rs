//! Bounded retry with exponential backoff.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{error, warn};

use super::classifier::{ErrorClassifier, Failure};
use super::error::ErrorContext;
use super::outcome::Outcome;

/// Retry bounds for one logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts is `max_retries + 1`.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            max_delay,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO, Duration::ZERO)
    }

    /// Delay slept after failed attempt `attempt` (zero-based):
    /// `min(initial_delay * 2^attempt, max_delay)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
            .min(self.max_delay)
    }

    /// Every delay the policy may sleep, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_retries).map(|attempt| self.delay_for(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000), Duration::from_millis(10_000))
    }
}

/// Shared count of attempted requests, for statistics only.
#[derive(Debug, Clone, Default)]
pub struct RequestCounter(Arc<AtomicU64>);

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs calls under a [`RetryPolicy`], classifying every failure.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor {
    policy: RetryPolicy,
    classifier: ErrorClassifier,
    counter: RequestCounter,
}

impl RequestExecutor {
    pub fn new(policy: RetryPolicy, classifier: ErrorClassifier) -> Self {
        Self {
            policy,
            classifier,
            counter: RequestCounter::new(),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    pub fn counter(&self) -> &RequestCounter {
        &self.counter
    }

    /// Total attempts made through this executor.
    pub fn request_count(&self) -> u64 {
        self.counter.get()
    }

    /// Run `make_call` until it succeeds, fails with a non-retryable error,
    /// or the attempts are exhausted.
    ///
    /// `make_call` receives the zero-based attempt number and resolves to the
    /// payload and HTTP status on success.
    pub async fn execute<T, F, Fut>(&self, context: ErrorContext, mut make_call: F) -> Outcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<(T, u16), Failure>>,
    {
        let mut attempt = 0;

        loop {
            self.counter.increment();

            let failure = match make_call(attempt).await {
                Ok((data, status)) => return Outcome::success(data, status),
                Err(failure) => failure,
            };

            let error = self
                .classifier
                .classify(failure, Some(context.clone().with_attempt(attempt)));

            if !error.retryable {
                return Outcome::failure(error);
            }

            if attempt >= self.policy.max_retries {
                error!(
                    attempts = attempt + 1,
                    kind = %error.kind,
                    "Giving up after exhausting retries"
                );
                return Outcome::failure(error);
            }

            let delay = self.policy.delay_for(attempt);
            warn!(
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                kind = %error.kind,
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;

            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ErrorKind, StructuredError};
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn executor(retries: u32, initial_ms: u64, max_ms: u64) -> RequestExecutor {
        RequestExecutor::new(
            RetryPolicy::new(
                retries,
                Duration::from_millis(initial_ms),
                Duration::from_millis(max_ms),
            ),
            ErrorClassifier::new(),
        )
    }

    #[test]
    fn test_delay_schedule() {
        let policy = RetryPolicy::new(6, Duration::from_millis(100), Duration::from_millis(1000));
        let delays: Vec<u64> = policy.delays().map(|d| d.as_millis() as u64).collect();
        assert_eq!(delays, vec![100, 200, 400, 800, 1000, 1000]);
    }

    #[test]
    fn test_delay_does_not_overflow() {
        let policy = RetryPolicy::new(64, Duration::from_secs(1), Duration::from_secs(30));
        assert_eq!(policy.delay_for(63), Duration::from_secs(30));
        let delays: Vec<_> = policy.delays().collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retryable_failure_exhausts_attempts() {
        let executor = executor(2, 100, 10_000);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let start = Instant::now();

        let outcome: Outcome<()> = executor
            .execute(ErrorContext::request("GET", "/x"), |_| {
                let calls = calls.clone();
                async move {
                    calls.lock().unwrap().push(start.elapsed());
                    Err(Failure::Connection("refused".into()))
                }
            })
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.error().map(|e| e.kind), Some(ErrorKind::NetworkError));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1] - calls[0], Duration::from_millis(100));
        assert_eq!(calls[2] - calls[1], Duration::from_millis(200));
        assert_eq!(executor.request_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_delay_capped_by_max() {
        let executor = executor(2, 500, 100);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let start = Instant::now();

        let _: Outcome<()> = executor
            .execute(ErrorContext::default(), |_| {
                let calls = calls.clone();
                async move {
                    calls.lock().unwrap().push(start.elapsed());
                    Err(Failure::Connection("refused".into()))
                }
            })
            .await;

        let calls = calls.lock().unwrap();
        let gaps: Vec<_> = calls.windows(2).map(|w| w[1] - w[0]).collect();
        let expected: Vec<_> = executor.policy().delays().collect();
        assert_eq!(gaps, expected);
        assert_eq!(gaps, vec![Duration::from_millis(100); 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_stops_immediately() {
        let executor = executor(5, 100, 10_000);
        let mut count = 0;

        let outcome: Outcome<()> = executor
            .execute(ErrorContext::default(), |_| {
                count += 1;
                async { Err(Failure::http(401, None)) }
            })
            .await;

        assert_eq!(count, 1);
        let error = outcome.error.unwrap();
        assert_eq!(error.kind, ErrorKind::AuthenticationError);
        assert_eq!(error.context.and_then(|c| c.attempt), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_transient_failure() {
        let executor = executor(3, 50, 1000);

        let outcome = executor
            .execute(ErrorContext::default(), |attempt| async move {
                if attempt < 2 {
                    Err(Failure::http(502, None))
                } else {
                    Ok(("done", 200))
                }
            })
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.data, Some("done"));
        assert_eq!(outcome.status_code, Some(200));
        assert_eq!(executor.request_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_single_attempt() {
        let executor = executor(0, 100, 1000);
        let outcome: Outcome<()> = executor
            .execute(ErrorContext::default(), |_| async {
                Err(Failure::Structured(StructuredError::timeout("slow")))
            })
            .await;
        assert_eq!(outcome.error().map(|e| e.kind), Some(ErrorKind::TimeoutError));
        assert_eq!(executor.request_count(), 1);
    }
}
