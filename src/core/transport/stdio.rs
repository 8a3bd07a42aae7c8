//! STDIO transport implementation.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Serves one MCP session over stdin/stdout.
pub struct StdioTransport;

impl StdioTransport {
    /// Run until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            tools = server.registry().len(),
            "Ready - communicating via stdin/stdout"
        );

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}
