//! Tool Registry - the static catalogue of available tools.
//!
//! The registry maps tool names to their metadata and handlers. It is built
//! once at startup, wrapped in an `Arc` and shared read-only by every
//! transport; nothing mutates it afterwards, so concurrent invocations need
//! no synchronization.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};

use super::definitions::{EchoTool, FetchTool, TimeServerTool};
use super::error::ToolError;

/// Arguments handed to a tool handler by the dispatcher.
///
/// Carries both the decoded JSON value and the raw argument text. Most tools
/// only look at `value`; the echo tool falls back to `raw` when no `message`
/// field is present.
#[derive(Debug, Clone)]
pub struct ToolCallArgs {
    /// Decoded JSON arguments.
    pub value: serde_json::Value,

    /// The raw argument payload as received on the wire.
    pub raw: String,
}

impl ToolCallArgs {
    /// Build call arguments from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Self {
        let raw = value.to_string();
        Self { value, raw }
    }
}

/// Handler function invoked by the dispatcher for a registered tool.
///
/// Handlers convert their own failures into textual results; an `Err` here
/// means an unconverted internal fault, which the dispatcher folds into an
/// `"Error: ..."` text result.
pub type ToolHandler =
    Arc<dyn Fn(&ToolCallArgs) -> Result<CallToolResult, ToolError> + Send + Sync>;

/// Tool registry - maps tool names to descriptors and handlers.
pub struct ToolRegistry {
    /// Tool descriptors in registration order (the `tools/list` order).
    tools: Vec<Tool>,

    /// Handlers keyed by tool name.
    handlers: HashMap<String, ToolHandler>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with the standard tool set registered.
    ///
    /// Registration cannot collide here because the tool names are distinct
    /// constants, so the error path is folded away.
    pub fn with_default_tools() -> Self {
        let mut registry = Self::new();

        let defaults: [(Tool, ToolHandler); 3] = [
            (EchoTool::to_tool(), EchoTool::handler()),
            (TimeServerTool::to_tool(), TimeServerTool::handler()),
            (FetchTool::to_tool(), FetchTool::handler()),
        ];

        for (tool, handler) in defaults {
            // Distinct constant names, cannot fail
            let _ = registry.register(tool, handler);
        }

        registry
    }

    /// Register a tool and its handler.
    ///
    /// Fails if a tool with the same name is already registered.
    pub fn register(&mut self, tool: Tool, handler: ToolHandler) -> Result<(), ToolError> {
        let name = tool.name.to_string();
        if self.handlers.contains_key(&name) {
            return Err(ToolError::duplicate(name));
        }
        self.tools.push(tool);
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Look up the handler for a tool name.
    pub fn lookup(&self, name: &str) -> Option<&ToolHandler> {
        self.handlers.get(name)
    }

    /// All tool descriptors, in registration order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// All tool names, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.to_string()).collect()
    }

    /// Tool metadata as JSON objects for the `tools/list` capability.
    pub fn list_tools_json(&self) -> Vec<serde_json::Value> {
        self.tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;

    #[derive(serde::Deserialize, schemars::JsonSchema)]
    struct DummyParams {}

    fn dummy_tool(name: &str) -> Tool {
        Tool {
            name: name.to_string().into(),
            description: Some("dummy".into()),
            input_schema: rmcp::handler::server::tool::cached_schema_for_type::<DummyParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    fn dummy_handler() -> ToolHandler {
        Arc::new(|_args| Ok(CallToolResult::success(vec![Content::text("ok")])))
    }

    #[test]
    fn test_default_registry_tool_names() {
        let registry = ToolRegistry::with_default_tools();
        let names = registry.tool_names();
        assert_eq!(names, vec!["echotest", "timeserver", "fetch"]);
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = ToolRegistry::new();
        registry.register(dummy_tool("zeta"), dummy_handler()).unwrap();
        registry.register(dummy_tool("alpha"), dummy_handler()).unwrap();
        registry.register(dummy_tool("mid"), dummy_handler()).unwrap();

        assert_eq!(registry.tool_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = ToolRegistry::new();
        registry.register(dummy_tool("twice"), dummy_handler()).unwrap();
        let err = registry
            .register(dummy_tool("twice"), dummy_handler())
            .unwrap_err();
        assert!(matches!(err, ToolError::Duplicate(_)));
        // The failed registration must not leave a second descriptor behind
        assert_eq!(registry.tools().len(), 1);
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let registry = ToolRegistry::with_default_tools();
        assert!(registry.lookup("nope").is_none());
        assert!(registry.lookup("fetch").is_some());
    }

    #[test]
    fn test_list_tools_json_shape() {
        let registry = ToolRegistry::with_default_tools();
        let listed = registry.list_tools_json();
        assert_eq!(listed.len(), 3);
        for entry in &listed {
            assert!(entry.get("name").is_some());
            assert!(entry.get("description").is_some());
            assert!(entry.get("inputSchema").is_some());
        }
    }
}
