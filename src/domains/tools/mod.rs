//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to
//! perform specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool catalogue: name -> descriptor + handler
//! - `dispatch.rs` - Transport-independent invocation boundary
//! - `router.rs` - rmcp ToolRouter builder for STDIO/TCP transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, `execute()`, `to_tool()`, `handler()` and
//!    `create_route()`
//! 3. Export it in `definitions/mod.rs`
//! 4. Register it in `registry.rs` (`with_default_tools`) and add its route
//!    in `router.rs`

pub mod definitions;
mod dispatch;
mod error;
mod registry;
pub mod router;

pub use dispatch::Dispatcher;
pub use error::ToolError;
pub use registry::{ToolCallArgs, ToolHandler, ToolRegistry};
pub use router::build_tool_router;
