//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every generated tool becomes one dynamic route. The route passes the
//! call arguments to [`Tool::call`] and renders the resulting [`Outcome`]
//! as JSON text content.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content, JsonObject},
};
use serde_json::Value;
use tracing::{info, warn};

use super::registry::ToolRegistry;
use super::tool::Tool;
use crate::api::Outcome;

/// Build the tool router with every tool in `registry`.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .tools()
        .fold(ToolRouter::new(), |router, tool| router.with_route(create_route(tool.clone())))
}

/// MCP description of a generated tool.
pub fn to_mcp_tool(tool: &Tool) -> rmcp::model::Tool {
    let input_schema: JsonObject = tool
        .json_schema()
        .as_object()
        .cloned()
        .unwrap_or_default();

    rmcp::model::Tool {
        name: tool.name.clone().into(),
        description: Some(tool.description.clone().into()),
        input_schema: Arc::new(input_schema),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Create a ToolRoute for STDIO/TCP transport.
pub fn create_route<S>(tool: Tool) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let tool = Arc::new(tool);
    ToolRoute::new_dyn(to_mcp_tool(&tool), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let tool = tool.clone();
        async move {
            let outcome = tool.call(Value::Object(args)).await;
            Ok::<_, rmcp::ErrorData>(outcome_to_result(&tool.name, outcome))
        }
        .boxed()
    })
}

/// Render an outcome as MCP content. Failures are reported as tool errors,
/// not protocol errors, so the client sees the structured error body.
pub fn outcome_to_result(tool_name: &str, outcome: Outcome<Value>) -> CallToolResult {
    if outcome.is_success() {
        info!(tool = tool_name, status = ?outcome.status_code, "Tool call succeeded");
        let body = outcome.data.unwrap_or(Value::Null);
        CallToolResult::success(vec![Content::text(render(&body))])
    } else {
        let body = match &outcome.error {
            Some(error) => {
                warn!(tool = tool_name, kind = %error.kind.as_str(), "Tool call failed: {}", error.message);
                serde_json::to_value(error).unwrap_or_else(|_| Value::String(error.to_string()))
            }
            None => Value::String("Tool call failed".to_string()),
        };
        CallToolResult::error(vec![Content::text(render(&body))])
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
