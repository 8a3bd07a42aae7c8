//! In-memory transport used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiTransport, HttpMethod, Outcome, QueryParams, StructuredError};

/// One call seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub query: Option<QueryParams>,
}

/// Transport that records calls and replays scripted outcomes.
///
/// When the script runs out it answers with `fallback`.
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    script: Mutex<VecDeque<Outcome<Value>>>,
    fallback: Outcome<Value>,
}

impl RecordingTransport {
    pub fn responding(data: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            fallback: Outcome::success(data, 200),
        }
    }

    pub fn failing(error: StructuredError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            fallback: Outcome::failure(error),
        }
    }

    pub fn then(self, outcome: Outcome<Value>) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ApiTransport for RecordingTransport {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Outcome<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
            query,
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
