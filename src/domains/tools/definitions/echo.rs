//! Echo tool definition.
//!
//! Returns the provided message verbatim. When no `message` field is present
//! the tool degrades to echoing the raw argument payload, which keeps
//! non-JSON smoke testing possible over line-based transports.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::domains::tools::error::ToolError;
use crate::domains::tools::registry::{ToolCallArgs, ToolHandler};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the echo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// Message to echo back.
    ///
    /// The schema marks this required; the tool itself tolerates absence and
    /// falls back to the raw payload.
    #[schemars(required)]
    pub message: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Echo tool - identity transform over the provided message.
pub struct EchoTool;

impl EchoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "echotest";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Echo back the provided message";

    /// Execute the tool logic.
    ///
    /// `raw_arguments` is the argument payload as received on the wire; it is
    /// the fallback output when `message` is absent.
    pub fn execute(params: &EchoParams, raw_arguments: &str) -> CallToolResult {
        let text = match &params.message {
            Some(message) => message.clone(),
            None => raw_arguments.to_string(),
        };

        info!("TOOL: echotest -> {}", text);

        CallToolResult::success(vec![Content::text(text)])
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<EchoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Handler used by the dispatcher.
    pub fn handler() -> ToolHandler {
        Arc::new(|args: &ToolCallArgs| {
            let params: EchoParams = serde_json::from_value(args.value.clone())
                .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
            Ok(Self::execute(&params, &args.raw))
        })
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let raw = serde_json::Value::Object(args.clone()).to_string();
                let params: EchoParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &raw))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
