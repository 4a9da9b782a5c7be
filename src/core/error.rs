//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type covering the crate's two
//! fallible domains. Note that tool invocations never surface these errors
//! to clients: the dispatcher folds every failure into a textual tool
//! result (see `domains::tools::Dispatcher`).

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::TransportError;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_domain_errors_fold_into_unified_error() {
        let err: Error = ToolError::duplicate("echotest").into();
        assert_eq!(
            err.to_string(),
            "Tool error: Tool already registered: echotest"
        );

        let err: Error = TransportError::init("no runtime").into();
        assert_eq!(
            err.to_string(),
            "Transport error: Server initialization error: no runtime"
        );
    }
}
