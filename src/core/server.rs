//! MCP Server implementation and lifecycle management.
//!
//! The server exposes the tools generated from the Evolution API catalog.
//! The ToolRouter is built from the registry in `domains/tools/router.rs`,
//! so adding an operation to the catalog does not require touching this file.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use super::error::Result as CoreResult;
use crate::api::{HttpApiClient, Outcome};
use crate::domains::tools::{
    GenerateOptions, ToolError, ToolGenerator, ToolRegistry, build_tool_router,
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Snapshot of the generated tools.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server over an already generated registry.
    pub fn new(config: Config, registry: ToolRegistry) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(&registry),
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// Build the HTTP client, generate the configured tools and wrap them in
    /// a server.
    pub fn from_config(config: Config) -> CoreResult<Self> {
        let client = HttpApiClient::new(&config.api)?;

        let options = GenerateOptions {
            groups: config.tools.groups.clone(),
            include_names: config.tools.include.clone(),
            exclude_names: config.tools.exclude.clone(),
            name_prefix: config.tools.name_prefix.clone(),
            ..GenerateOptions::with_transport(Arc::new(client))
        };

        let mut generator = ToolGenerator::default();
        generator.generate(&options)?;

        for issue in generator.validate() {
            warn!(tool = %issue.tool, "Tool failed consistency check: {}", issue.problem);
        }

        let stats = generator.stats();
        info!(
            "Registered {} of {} catalog operations",
            stats.registered, stats.available
        );

        Ok(Self::new(config, generator.into_registry()))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Names of the tools served.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }

    /// Call a tool by name, bypassing the MCP protocol layer.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> CoreResult<Outcome<Value>> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| ToolError::not_found(name))?;
        Ok(tool.call(arguments).await)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "{} exposes the Evolution API (WhatsApp) as tools: instances, messages, chats, \
                 groups, profile, webhooks and settings. Every tool takes the instance name as \
                 `instance`.",
                self.config.server.name
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingTransport;
    use crate::core::Error;
    use serde_json::json;

    fn server(transport: Arc<RecordingTransport>) -> McpServer {
        let mut generator = ToolGenerator::default();
        generator
            .generate(&GenerateOptions {
                groups: Some(vec!["instance".into()]),
                ..GenerateOptions::with_transport(transport)
            })
            .unwrap();
        McpServer::new(Config::default(), generator.into_registry())
    }

    #[test]
    fn test_server_lists_generated_tools() {
        let server = server(Arc::new(RecordingTransport::responding(json!({}))));
        let names = server.tool_names();
        assert_eq!(names.len(), server.registry().len());
        assert!(names.contains(&"evolution_connection_state".to_string()));
        assert!(!names.contains(&"evolution_send_text".to_string()));
    }

    #[test]
    fn test_server_info() {
        let server = server(Arc::new(RecordingTransport::responding(json!({}))));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert_eq!(info.server_info.name, server.name());
    }

    #[test]
    fn test_server_implements_handler() {
        fn routed_tools<H: ServerHandler>(_: &H) {}

        let server = server(Arc::new(RecordingTransport::responding(json!({}))));
        routed_tools(&server);
        assert!(server.tool_router.has_route("evolution_connection_state"));
    }

    #[tokio::test]
    async fn test_call_tool_by_name() {
        let transport = Arc::new(RecordingTransport::responding(json!({"state": "open"})));
        let server = server(transport.clone());

        let outcome = server
            .call_tool("evolution_connection_state", json!({"instance": "main"}))
            .await
            .unwrap();
        assert_eq!(outcome.data, Some(json!({"state": "open"})));
        assert_eq!(transport.calls()[0].path, "/instance/connectionState/main");

        let missing = server.call_tool("evolution_nope", json!({})).await;
        assert!(matches!(missing, Err(Error::Tool(ToolError::NotFound(_)))));
    }

    #[test]
    fn test_from_config_rejects_invalid_api_config() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(matches!(McpServer::from_config(config), Err(Error::Api(_))));
    }

    #[tokio::test]
    async fn test_from_config_generates_selected_groups() {
        let mut config = Config::default();
        config.tools.groups = Some(vec!["webhook".into()]);
        config.tools.name_prefix = Some("wa_".into());
        let server = McpServer::from_config(config).unwrap();
        let mut names = server.tool_names();
        names.sort();
        assert_eq!(names, vec!["wa_find_webhook", "wa_set_webhook"]);
    }
}
