//! MCP Server Library
//!
//! This crate implements a small Model Context Protocol (MCP) server exposing
//! three tools - `echotest`, `timeserver` and `fetch` - over interchangeable
//! transports.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the main server handler and the transport layer (stdio, TCP, HTTP)
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: the tool registry, the transport-independent dispatcher and
//!     the individual tool definitions
//!
//! Every transport funnels tool calls through the same invocation boundary
//! ([`domains::tools::Dispatcher`]), which always produces a textual result
//! and never lets a fault escape to the transport layer.
//!
//! # Example
//!
//! ```rust,no_run
//! use nettools_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
