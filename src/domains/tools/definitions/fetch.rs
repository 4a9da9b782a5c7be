//! Fetch tool definition.
//!
//! Performs a bounded HTTP(S) GET. The response body read is hard-capped at
//! a clamped `max_bytes` so one oversized or malicious target cannot exhaust
//! the server's memory, and the request carries a fixed 10-second timeout so
//! a slow target cannot stall a worker.

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::domains::tools::error::ToolError;
use crate::domains::tools::registry::{ToolCallArgs, ToolHandler};

/// Default body cap when the caller supplies no (or a non-positive) limit.
pub const DEFAULT_MAX_BYTES: i64 = 4096;

/// Smallest accepted body cap.
pub const MIN_BYTES: i64 = 256;

/// Largest accepted body cap.
pub const MAX_BYTES: i64 = 65536;

/// Total request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Identifying user agent sent with every fetch.
const USER_AGENT: &str = "nettools-mcp-server/1.0 (+https://example.local)";

/// Clamp a requested byte limit into the safe range.
///
/// Non-positive values mean "not specified" and resolve to the default
/// rather than the floor.
pub fn clamp_max_bytes(value: i64) -> i64 {
    if value <= 0 {
        return DEFAULT_MAX_BYTES;
    }
    value.clamp(MIN_BYTES, MAX_BYTES)
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the fetch tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FetchParams {
    /// URL to fetch (must be http or https).
    #[serde(default)]
    #[schemars(required)]
    pub url: String,

    /// Limit response body bytes (default 4096, min 256, max 65536).
    #[serde(default)]
    pub max_bytes: i64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Fetch tool - bounded, truncation-aware HTTP GET proxy.
pub struct FetchTool;

impl FetchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fetch";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Fetch content from a URL (HTTP/HTTPS). Optional max_bytes to limit response size";

    /// Execute the tool logic.
    ///
    /// Blocking: performs the network round trip on the calling thread. The
    /// async route wraps this in `spawn_blocking`.
    #[instrument(skip_all, fields(url = %params.url))]
    pub fn execute(params: &FetchParams) -> CallToolResult {
        if params.url.is_empty() {
            return text_result("Error: URL is required");
        }

        if !params.url.starts_with("http://") && !params.url.starts_with("https://") {
            return text_result("Error: URL must start with http:// or https://");
        }

        let max_bytes = clamp_max_bytes(params.max_bytes);

        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                let error_msg = format!("Fetch error: {}", e);
                error!("fetch error: {}", error_msg);
                return text_result(error_msg);
            }
        };

        let response = match client.get(&params.url).send() {
            Ok(r) => r,
            Err(e) => {
                // Connection, DNS and timeout failures are transport-level
                let error_msg = if e.is_timeout() || e.is_connect() || e.is_request() {
                    format!("URL Error: {}", e)
                } else {
                    format!("Fetch error: {}", e)
                };
                error!("fetch error: {}", error_msg);
                return text_result(error_msg);
            }
        };

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let error_msg = format!(
                "HTTP Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
            error!("fetch error: {}", error_msg);
            return text_result(error_msg);
        }

        // Truncation detection is header-based: the note reflects the
        // declared Content-Length, not whether the capped read stopped short.
        let content_length: Option<i64> = response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());

        let mut body = Vec::new();
        if let Err(e) = response.take(max_bytes as u64).read_to_end(&mut body) {
            // A stall mid-body is a transport failure like a connect timeout
            let error_msg = if is_timeout_read_error(&e) {
                format!("URL Error: {}", e)
            } else {
                format!("Fetch error: {}", e)
            };
            error!("fetch error: {}", error_msg);
            return text_result(error_msg);
        }

        let truncated_note = match content_length {
            Some(declared) if declared > max_bytes => " (truncated)",
            _ => "",
        };

        let result = format!(
            "URL: {}\nStatus: {} {}\nBytes: {}{}\n\n{}",
            params.url,
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            body.len(),
            truncated_note,
            String::from_utf8_lossy(&body)
        );

        info!("TOOL: fetch -> {} ({} bytes)", params.url, body.len());

        text_result(result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FetchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Handler used by the dispatcher.
    ///
    /// Blocking like `execute`; async callers go through `spawn_blocking`
    /// (see `McpServer::call_tool`).
    pub fn handler() -> ToolHandler {
        Arc::new(|args: &ToolCallArgs| {
            let params: FetchParams = serde_json::from_value(args.value.clone())
                .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
            Ok(Self::execute(&params))
        })
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    ///
    /// reqwest::blocking creates its own runtime, so the call runs under
    /// `spawn_blocking` to stay off the async worker threads.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: FetchParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                let result = tokio::task::spawn_blocking(move || Self::execute(&params))
                    .await
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(result)
            }
            .boxed()
        })
    }
}

/// Wrap plain text as a successful-shaped tool result.
fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Whether an io error from the capped body read is a timeout.
///
/// The blocking reader reports the request timeout either as a `TimedOut`
/// io error or as a wrapped `reqwest::Error` with the timeout flag set.
fn is_timeout_read_error(e: &std::io::Error) -> bool {
    if matches!(
        e.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    ) {
        return true;
    }

    e.get_ref()
        .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
        .is_some_and(|inner| inner.is_timeout())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    fn fetch(url: &str, max_bytes: i64) -> String {
        let params = FetchParams {
            url: url.to_string(),
            max_bytes,
        };
        result_text(&FetchTool::execute(&params))
    }

    #[test]
    fn test_clamp_law() {
        assert_eq!(clamp_max_bytes(-100), DEFAULT_MAX_BYTES);
        assert_eq!(clamp_max_bytes(0), DEFAULT_MAX_BYTES);
        assert_eq!(clamp_max_bytes(1), MIN_BYTES);
        assert_eq!(clamp_max_bytes(255), MIN_BYTES);
        assert_eq!(clamp_max_bytes(256), 256);
        assert_eq!(clamp_max_bytes(4096), 4096);
        assert_eq!(clamp_max_bytes(65536), 65536);
        assert_eq!(clamp_max_bytes(65537), MAX_BYTES);
        assert_eq!(clamp_max_bytes(i64::MAX), MAX_BYTES);
    }

    #[test]
    fn test_missing_url() {
        assert_eq!(fetch("", 0), "Error: URL is required");
    }

    #[test]
    fn test_bad_scheme() {
        assert_eq!(
            fetch("ftp://x", 0),
            "Error: URL must start with http:// or https://"
        );
        assert_eq!(
            fetch("file:///etc/passwd", 0),
            "Error: URL must start with http:// or https://"
        );
    }

    #[test]
    fn test_fetch_small_body_not_truncated() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/small");
            then.status(200).body("hello body");
        });

        let text = fetch(&server.url("/small"), 0);
        assert!(text.starts_with(&format!("URL: {}\n", server.url("/small"))));
        assert!(text.contains("Status: 200 OK"));
        assert!(text.contains("Bytes: 10"));
        assert!(!text.contains("(truncated)"));
        assert!(text.ends_with("hello body"));
    }

    #[test]
    fn test_fetch_byte_cap_and_truncation_note() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/big");
            then.status(200).body("a".repeat(512));
        });

        let text = fetch(&server.url("/big"), 256);
        assert!(text.contains("Bytes: 256 (truncated)"));

        // The body after the blank line is exactly the capped prefix
        let body = text.split_once("\n\n").map(|(_, b)| b).unwrap();
        assert_eq!(body.len(), 256);
        assert!(body.bytes().all(|b| b == b'a'));
    }

    #[test]
    fn test_fetch_cap_below_floor_clamps_to_min() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/floor");
            then.status(200).body("b".repeat(1000));
        });

        // 10 clamps to 256
        let text = fetch(&server.url("/floor"), 10);
        assert!(text.contains("Bytes: 256 (truncated)"));
    }

    #[test]
    fn test_fetch_http_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("gone");
        });

        let text = fetch(&server.url("/missing"), 0);
        assert_eq!(text, "HTTP Error 404: Not Found");
    }

    #[test]
    fn test_fetch_server_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/boom");
            then.status(500);
        });

        let text = fetch(&server.url("/boom"), 0);
        assert_eq!(text, "HTTP Error 500: Internal Server Error");
    }

    #[test]
    fn test_fetch_sends_identifying_user_agent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ua")
                .header("user-agent", USER_AGENT);
            then.status(200).body("ok");
        });

        fetch(&server.url("/ua"), 0);
        mock.assert();
    }

    #[test]
    fn test_fetch_body_within_default_cap() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/exact");
            then.status(200).body("c".repeat(4096));
        });

        // Declared length equals the cap: not truncated
        let text = fetch(&server.url("/exact"), 0);
        assert!(text.contains("Bytes: 4096"));
        assert!(!text.contains("(truncated)"));
    }

    #[test]
    fn test_body_read_timeout_is_a_url_error() {
        use std::io::{Error as IoError, ErrorKind};

        assert!(is_timeout_read_error(&IoError::new(
            ErrorKind::TimedOut,
            "read timed out"
        )));
        assert!(is_timeout_read_error(&IoError::new(
            ErrorKind::WouldBlock,
            "read would block"
        )));
        // Non-timeout read failures stay fetch-shaped
        assert!(!is_timeout_read_error(&IoError::new(
            ErrorKind::UnexpectedEof,
            "peer closed mid-body"
        )));
        assert!(!is_timeout_read_error(&IoError::new(
            ErrorKind::ConnectionReset,
            "reset"
        )));
    }

    #[test]
    fn test_fetch_lossy_body_decoding() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/bin");
            then.status(200).body(vec![b'o', b'k', 0xff, 0xfe]);
        });

        let text = fetch(&server.url("/bin"), 0);
        // Invalid sequences replaced, never an error
        assert!(text.contains("Bytes: 4"));
        assert!(text.contains('\u{FFFD}'));
    }
}
