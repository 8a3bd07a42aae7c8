//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file) or defaults. The tool
//! pipeline only ever sees the resolved values.

use super::transport::TransportConfig;
use crate::api::StructuredError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Evolution API connection settings.
    pub api: ApiConfig,

    /// Which catalog operations are exposed as tools.
    pub tools: ToolsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Resolved settings for the remote API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Evolution API, e.g. `http://localhost:8080`.
    pub base_url: String,

    /// Global API key sent in the `apikey` header.
    pub api_key: Option<String>,

    /// Per-request timeout.
    pub timeout_ms: u64,

    /// Retries after the first attempt.
    pub retry_attempts: u32,

    /// Delay before the first retry; doubles on each retry.
    pub retry_delay_ms: u64,

    /// Upper bound for the retry delay.
    pub max_retry_delay_ms: u64,

    /// Whether individual requests are logged.
    pub logging_enabled: bool,
}

/// Custom Debug implementation to redact the API key from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_ms", &self.timeout_ms)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("max_retry_delay_ms", &self.max_retry_delay_ms)
            .field("logging_enabled", &self.logging_enabled)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout_ms: 30_000,
            retry_attempts: 3,
            retry_delay_ms: 1_000,
            max_retry_delay_ms: 10_000,
            logging_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Check that the values can be used to build a client.
    pub fn validate(&self) -> Result<(), StructuredError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(StructuredError::configuration("EVOLUTION_API_URL is empty"));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(StructuredError::configuration(format!(
                "EVOLUTION_API_URL must start with http:// or https://, got '{base}'"
            )));
        }
        if self.timeout_ms == 0 {
            return Err(StructuredError::configuration(
                "EVOLUTION_TIMEOUT_MS must be greater than zero",
            ));
        }
        if self.retry_delay_ms > self.max_retry_delay_ms {
            return Err(StructuredError::configuration(format!(
                "retry delay ({} ms) exceeds the maximum retry delay ({} ms)",
                self.retry_delay_ms, self.max_retry_delay_ms
            )));
        }
        Ok(())
    }
}

/// Selection of catalog operations to expose.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Controller groups to include; all groups when `None`.
    pub groups: Option<Vec<String>>,

    /// Operation names to keep (applied after the group filter).
    pub include: Option<Vec<String>>,

    /// Operation names to drop.
    pub exclude: Option<Vec<String>>,

    /// Tool name prefix; the factory default when `None`.
    pub name_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "evolution-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// API settings use the `EVOLUTION_` prefix, server settings the `MCP_`
    /// prefix. Unparseable numbers keep their defaults with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(flag) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = parse_flag(&flag);
        }

        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("EVOLUTION_API_URL") {
            config.api.base_url = url;
        }

        match std::env::var("EVOLUTION_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                config.api.api_key = Some(key);
                info!("Evolution API key loaded from environment");
            }
            _ => warn!("EVOLUTION_API_KEY not set - requests will be sent unauthenticated"),
        }

        parse_env("EVOLUTION_TIMEOUT_MS", &mut config.api.timeout_ms);
        parse_env("EVOLUTION_RETRY_ATTEMPTS", &mut config.api.retry_attempts);
        parse_env("EVOLUTION_RETRY_DELAY_MS", &mut config.api.retry_delay_ms);
        parse_env(
            "EVOLUTION_MAX_RETRY_DELAY_MS",
            &mut config.api.max_retry_delay_ms,
        );

        if let Ok(enabled) = std::env::var("EVOLUTION_LOGGING") {
            config.api.logging_enabled = parse_flag(&enabled);
        }

        config.tools.groups = list_env("MCP_TOOL_GROUPS");
        config.tools.include = list_env("MCP_TOOL_INCLUDE");
        config.tools.exclude = list_env("MCP_TOOL_EXCLUDE");
        config.tools.name_prefix = std::env::var("MCP_TOOL_PREFIX").ok();

        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, target: &mut T) {
    if let Ok(raw) = std::env::var(key) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => warn!("Ignoring invalid value for {}: '{}'", key, raw),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(raw.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

/// Comma-separated list; `None` when unset or empty.
fn list_env(key: &str) -> Option<Vec<String>> {
    let raw = std::env::var(key).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}
