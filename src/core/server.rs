//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol. Tool metadata and dispatch live in `domains/tools`; this
//! handler only wires them to the protocol surface.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! The rmcp `ToolRouter` (built in `domains/tools/router.rs`) serves the
//! STDIO/TCP transports; the HTTP transport calls the same tools through the
//! transport-independent `Dispatcher`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::warn;

use super::config::Config;
use crate::domains::tools::{Dispatcher, ToolRegistry, build_tool_router};

/// The main MCP server handler.
///
/// Implements the `ServerHandler` trait from rmcp and owns the shared
/// read-only tool registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool catalogue, built once at startup, immutable afterwards.
    registry: Arc<ToolRegistry>,

    /// Tool router for STDIO/TCP tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(ToolRegistry::with_default_tools()),
            tool_router: build_tool_router::<Self>(),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The shared tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// List all available tools as JSON metadata (for HTTP transport).
    ///
    /// Order is the registration order, stable across calls.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry.list_tools_json()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Routes through the dispatcher, so the outcome is always a result -
    /// unknown tools and argument problems come back as text. The blocking
    /// dispatcher runs under `spawn_blocking` because the fetch tool uses a
    /// blocking HTTP client.
    pub async fn call_tool_dispatched(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> CallToolResult {
        let dispatcher = Dispatcher::new(self.registry.clone());
        let name = name.to_string();

        match tokio::task::spawn_blocking(move || dispatcher.invoke_value(&name, arguments)).await
        {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool task failed to join: {}", e);
                CallToolResult::success(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Demo MCP server exposing echotest, timeserver and fetch tools.".to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_server_reports_config_identity() {
        let server = McpServer::new(Config::default());
        assert_eq!(server.name(), "nettools-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_list_tools_metadata() {
        let server = McpServer::new(Config::default());
        let tools = server.list_tools();
        let names: Vec<_> = tools
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["echotest", "timeserver", "fetch"]);
    }

    #[tokio::test]
    async fn test_call_tool_dispatched_echo() {
        let server = McpServer::new(Config::default());
        let result = server
            .call_tool_dispatched("echotest", serde_json::json!({"message": "hi"}))
            .await;
        assert_eq!(result_text(&result), "hi");
    }

    #[tokio::test]
    async fn test_call_tool_dispatched_unknown() {
        let server = McpServer::new(Config::default());
        let result = server
            .call_tool_dispatched("nope", serde_json::json!({}))
            .await;
        assert_eq!(result_text(&result), "Unknown tool: nope");
    }
}
