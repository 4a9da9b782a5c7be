//! Dispatcher - the transport-independent invocation boundary.
//!
//! Every transport adapter resolves a frame into a tool name plus raw
//! argument bytes and hands them to [`Dispatcher::invoke`]. The dispatcher
//! looks the tool up, decodes the arguments and runs the handler. Every
//! outcome - unknown tool, undecodable arguments, handler fault - comes back
//! as a textual [`CallToolResult`]; no error ever crosses back into the
//! transport layer.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content};
use tracing::{info, warn};

use super::registry::{ToolCallArgs, ToolRegistry};

/// Transport-independent request/response engine for tool calls.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over a shared registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Invoke a tool with raw JSON argument bytes.
    ///
    /// The arguments must decode as a JSON object; anything else (a bare
    /// array, string, number or null) is rejected before any handler runs.
    pub fn invoke(&self, name: &str, raw_arguments: &[u8]) -> CallToolResult {
        let raw = String::from_utf8_lossy(raw_arguments).into_owned();

        let value: serde_json::Value = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(v) if v.is_object() => v,
            Ok(_) => {
                warn!("Tool {} called with non-object arguments", name);
                return text_result("Error: Invalid JSON arguments");
            }
            Err(e) => {
                warn!("Tool {} called with undecodable arguments: {}", name, e);
                return text_result("Error: Invalid JSON arguments");
            }
        };

        self.dispatch(name, &ToolCallArgs { value, raw })
    }

    /// Invoke a tool with already-decoded JSON arguments.
    ///
    /// Used by transports that deserialize the enclosing frame themselves
    /// (e.g. the HTTP JSON-RPC adapter). The same object-shape requirement
    /// as [`Dispatcher::invoke`] applies.
    pub fn invoke_value(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        if !arguments.is_object() {
            warn!("Tool {} called with non-object arguments", name);
            return text_result("Error: Invalid JSON arguments");
        }

        self.dispatch(name, &ToolCallArgs::from_value(arguments))
    }

    fn dispatch(&self, name: &str, args: &ToolCallArgs) -> CallToolResult {
        let handler = match self.registry.lookup(name) {
            Some(h) => h,
            None => {
                warn!("Unknown tool requested: {}", name);
                return text_result(format!("Unknown tool: {}", name));
            }
        };

        info!("Dispatching tool call: {}", name);

        match handler(args) {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                text_result(format!("Error: {}", e))
            }
        }
    }
}

/// Wrap plain text as a successful-shaped tool result.
fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}
