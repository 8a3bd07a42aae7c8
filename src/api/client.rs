//! Transport capability and its reqwest-backed implementation.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::classifier::{ErrorClassifier, Failure};
use super::error::{ErrorContext, StructuredError};
use super::outcome::Outcome;
use super::retry::{RequestExecutor, RetryPolicy};
use crate::core::config::ApiConfig;

/// Query string parameters, kept sorted for stable URLs.
pub type QueryParams = BTreeMap<String, String>;

/// HTTP methods used by catalog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether requests with this method usually carry a JSON body.
    ///
    /// `DELETE` may still send one when the operation declares body
    /// parameters.
    pub fn has_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Capability to call the remote API.
///
/// Implementations handle authentication, timeouts and their own retry
/// policy; every call resolves to an [`Outcome`], never an error.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Outcome<Value>;

    async fn get(&self, path: &str, query: Option<QueryParams>) -> Outcome<Value> {
        self.request(HttpMethod::Get, path, None, query).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Outcome<Value> {
        self.request(HttpMethod::Post, path, body, query).await
    }

    async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Outcome<Value> {
        self.request(HttpMethod::Put, path, body, query).await
    }

    async fn delete(
        &self,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Outcome<Value> {
        self.request(HttpMethod::Delete, path, body, query).await
    }

    async fn patch(
        &self,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Outcome<Value> {
        self.request(HttpMethod::Patch, path, body, query).await
    }
}

/// HTTP client for the Evolution API.
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    executor: RequestExecutor,
    logging_enabled: bool,
}

impl HttpApiClient {
    /// Build a client from the resolved API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, StructuredError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref() {
            let value = HeaderValue::from_str(key).map_err(|_| {
                StructuredError::configuration("API key contains invalid header characters")
            })?;
            headers.insert("apikey", value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| StructuredError::configuration(format!("Failed to build HTTP client: {e}")))?;

        let policy = RetryPolicy::new(
            config.retry_attempts,
            Duration::from_millis(config.retry_delay_ms),
            Duration::from_millis(config.max_retry_delay_ms),
        );

        info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            retries = config.retry_attempts,
            "Evolution API client initialized"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            executor: RequestExecutor::new(policy, ErrorClassifier::new()),
            logging_enabled: config.logging_enabled,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of HTTP attempts made so far, retries included.
    pub fn request_count(&self) -> u64 {
        self.executor.request_count()
    }

    /// Absolute URL for `path` with an encoded query string.
    pub fn url_for(&self, path: &str, query: Option<&QueryParams>) -> Result<String, Failure> {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let encoded = serde_urlencoded::to_string(query)
                .map_err(|e| Failure::Unexpected(format!("Failed to encode query: {e}")))?;
            url.push('?');
            url.push_str(&encoded);
        }
        Ok(url)
    }

    async fn send_once(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<(Value, u16), Failure> {
        let mut request = self.http.request(method.into(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let text = response.text().await?;
        let payload = parse_body(&text);

        if status.is_success() {
            Ok((payload.unwrap_or(Value::Null), status.as_u16()))
        } else {
            Err(Failure::Http {
                status: status.as_u16(),
                body: payload,
                retry_after_secs,
            })
        }
    }
}

impl fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url)
            .field("policy", self.executor.policy())
            .field("requests", &self.request_count())
            .finish()
    }
}

#[async_trait]
impl ApiTransport for HttpApiClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Option<QueryParams>,
    ) -> Outcome<Value> {
        let context = ErrorContext::request(method.as_str(), path);

        let url = match self.url_for(path, query.as_ref()) {
            Ok(url) => url,
            Err(failure) => {
                return Outcome::failure(
                    self.executor.classifier().classify(failure, Some(context)),
                );
            }
        };

        if self.logging_enabled {
            debug!(%method, %url, "Sending request");
        }

        let outcome = self
            .executor
            .execute(context, |_| self.send_once(method, &url, body.as_ref()))
            .await;

        if self.logging_enabled {
            match &outcome.error {
                None => debug!(%method, path, status = ?outcome.status_code, "Request succeeded"),
                Some(error) => info!(%method, path, kind = %error.kind, "Request failed"),
            }
        }

        outcome
    }
}

/// Parse a response body as JSON, falling back to a string.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ErrorDetails, ErrorKind};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `response` to every connection on a local port. Returns the
    /// base URL and the number of requests received.
    async fn serve(response: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request_complete(&request) {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (format!("http://{addr}"), hits)
    }

    /// Headers received and, when announced, the whole body.
    fn request_complete(request: &[u8]) -> bool {
        let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&request[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= end + 4 + length
    }

    fn local_client(base_url: String, retry_attempts: u32) -> HttpApiClient {
        HttpApiClient::new(&ApiConfig {
            base_url,
            retry_attempts,
            retry_delay_ms: 10,
            max_retry_delay_ms: 10,
            timeout_ms: 5000,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    fn config() -> ApiConfig {
        ApiConfig {
            base_url: "http://localhost:8080/".to_string(),
            api_key: Some("secret".to_string()),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_url_building() {
        let client = HttpApiClient::new(&config()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");

        let url = client.url_for("/chat/findChats/i1", None).unwrap();
        assert_eq!(url, "http://localhost:8080/chat/findChats/i1");

        let mut query = QueryParams::new();
        query.insert("number".into(), "55 11".into());
        query.insert("a".into(), "1".into());
        let url = client.url_for("group/participants/i1", Some(&query)).unwrap();
        assert_eq!(
            url,
            "http://localhost:8080/group/participants/i1?a=1&number=55+11"
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad = ApiConfig {
            base_url: String::new(),
            ..ApiConfig::default()
        };
        let error = HttpApiClient::new(&bad).unwrap_err();
        assert_eq!(error.kind, crate::api::ErrorKind::ConfigurationError);
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("{\"a\":1}"), Some(serde_json::json!({"a": 1})));
        assert_eq!(parse_body("Bad Gateway"), Some(Value::String("Bad Gateway".into())));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = HttpApiClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            retry_attempts: 0,
            timeout_ms: 2000,
            ..ApiConfig::default()
        })
        .unwrap();

        let outcome = client.get("instance/fetchInstances", None).await;
        assert!(!outcome.success);
        let kind = outcome.error.map(|e| e.kind);
        assert!(matches!(
            kind,
            Some(crate::api::ErrorKind::NetworkError) | Some(crate::api::ErrorKind::TimeoutError)
        ));
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_response_is_retried() {
        const BODY: &str = r#"{"message":"Too many requests"}"#;
        const RESPONSE: &str = concat!(
            "HTTP/1.1 429 Too Many Requests\r\n",
            "Retry-After: 5\r\n",
            "Content-Type: application/json\r\n",
            "Content-Length: 31\r\n",
            "Connection: close\r\n\r\n",
            r#"{"message":"Too many requests"}"#
        );
        assert_eq!(BODY.len(), 31);

        let (base_url, hits) = serve(RESPONSE).await;
        let client = local_client(base_url, 1);

        let outcome = client.get("instance/fetchInstances", None).await;
        let error = outcome.error.unwrap();
        assert_eq!(error.kind, ErrorKind::RateLimitError);
        assert_eq!(error.status_code, Some(429));
        assert_eq!(error.code.as_deref(), Some("HTTP_429"));
        assert_eq!(error.message, "Too many requests");
        assert_eq!(error.suggestions[0], "Wait 5 seconds before retrying");
        assert_eq!(
            error.details,
            Some(ErrorDetails::RateLimit {
                retry_after_secs: 5,
                body: Some(serde_json::json!({"message": "Too many requests"})),
            })
        );

        assert_eq!(client.request_count(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_success_response_is_parsed() {
        const RESPONSE: &str = concat!(
            "HTTP/1.1 201 Created\r\n",
            "Content-Type: application/json\r\n",
            "Content-Length: 11\r\n",
            "Connection: close\r\n\r\n",
            r#"{"id":"m1"}"#
        );

        let (base_url, hits) = serve(RESPONSE).await;
        let client = local_client(base_url, 3);

        let outcome = client
            .post("message/sendText/i1", Some(serde_json::json!({"text": "hi"})), None)
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.status_code, Some(201));
        assert_eq!(outcome.data, Some(serde_json::json!({"id": "m1"})));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        const RESPONSE: &str = concat!(
            "HTTP/1.1 401 Unauthorized\r\n",
            "Content-Length: 12\r\n",
            "Connection: close\r\n\r\n",
            "Unauthorized"
        );

        let (base_url, hits) = serve(RESPONSE).await;
        let client = local_client(base_url, 3);

        let outcome = client.get("instance/fetchInstances", None).await;
        let error = outcome.error.unwrap();
        assert_eq!(error.kind, ErrorKind::AuthenticationError);
        assert_eq!(error.message, "Unauthorized");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_method_body_rules() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Patch.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }
}
