//! Tool Router - builds the rmcp ToolRouter for the stdio/TCP transports.
//!
//! Each tool definition knows how to create its own route; this module just
//! assembles them. The HTTP transport goes through the [`Dispatcher`]
//! instead, so the two paths must expose the same tool set (tested below).
//!
//! [`Dispatcher`]: super::Dispatcher

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{EchoTool, FetchTool, TimeServerTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>() -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(EchoTool::create_route())
        .with_route(TimeServerTool::create_route())
        .with_route(FetchTool::create_route())
}
