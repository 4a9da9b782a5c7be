//! Time server tool definition.
//!
//! Reports the current time as three lines: the local timestamp with its
//! zone label, the UTC timestamp, and the Unix epoch seconds derived from
//! the local timestamp so the epoch always matches the displayed instant.

use chrono::{Local, SecondsFormat, Utc};
use chrono_tz::Tz;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::domains::tools::error::ToolError;
use crate::domains::tools::registry::{ToolCallArgs, ToolHandler};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the time server tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TimeServerParams {
    /// IANA timezone, e.g. "Europe/Kyiv". Empty or absent uses the host's
    /// local zone, labelled "Local".
    #[serde(default)]
    pub timezone: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Time server tool - current time with optional IANA timezone resolution.
pub struct TimeServerTool;

impl TimeServerTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "timeserver";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Return current time; optional IANA tz via timezone arg";

    /// Execute the tool logic.
    pub fn execute(params: &TimeServerParams) -> CallToolResult {
        let (local_str, label, unix) = if params.timezone.is_empty() {
            let now_local = Local::now();
            (
                now_local.to_rfc3339_opts(SecondsFormat::Micros, false),
                "Local".to_string(),
                now_local.timestamp(),
            )
        } else {
            match params.timezone.parse::<Tz>() {
                Ok(tz) => {
                    let now_local = Utc::now().with_timezone(&tz);
                    (
                        now_local.to_rfc3339_opts(SecondsFormat::Micros, false),
                        params.timezone.clone(),
                        now_local.timestamp(),
                    )
                }
                Err(_) => {
                    let error_msg = format!("Error: invalid timezone '{}'", params.timezone);
                    error!("{}", error_msg);
                    return CallToolResult::success(vec![Content::text(error_msg)]);
                }
            }
        };

        let now_utc = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false);

        let result = format!(
            "now_local={} (tz={})\nnow_utc={}\nunix={}",
            local_str, label, now_utc, unix
        );

        info!("TOOL: timeserver (tz={})", label);

        CallToolResult::success(vec![Content::text(result)])
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TimeServerParams>(),
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
            let params: TimeServerParams = serde_json::from_value(args.value.clone())
                .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
            Ok(Self::execute(&params))
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
                let params: TimeServerParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    fn run(timezone: &str) -> String {
        let params = TimeServerParams {
            timezone: timezone.to_string(),
        };
        result_text(&TimeServerTool::execute(&params))
    }

    #[test]
    fn test_default_zone_is_labelled_local() {
        let text = run("");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("now_local="));
        assert!(lines[0].ends_with("(tz=Local)"));
        assert!(lines[1].starts_with("now_utc="));
        assert!(lines[2].starts_with("unix="));
    }

    #[test]
    fn test_named_zone_is_labelled_with_its_name() {
        let text = run("Europe/Kyiv");
        assert!(text.lines().next().unwrap().ends_with("(tz=Europe/Kyiv)"));
    }

    #[test]
    fn test_utc_zone_resolves() {
        let text = run("UTC");
        assert!(text.lines().next().unwrap().ends_with("(tz=UTC)"));
    }

    #[test]
    fn test_invalid_zone_reports_error_text() {
        let text = run("Not/AZone");
        assert!(text.starts_with("Error: invalid timezone"));
        assert_eq!(text, "Error: invalid timezone 'Not/AZone'");
    }

    #[test]
    fn test_unix_matches_local_instant() {
        let text = run("");
        let unix: i64 = text
            .lines()
            .nth(2)
            .unwrap()
            .strip_prefix("unix=")
            .unwrap()
            .parse()
            .unwrap();
        assert!((Utc::now().timestamp() - unix).abs() < 5);
    }

    #[test]
    fn test_named_zone_unix_matches_utc_instant() {
        // The epoch is zone-independent; a named zone must not shift it.
        let text = run("Asia/Tokyo");
        let unix: i64 = text
            .lines()
            .nth(2)
            .unwrap()
            .strip_prefix("unix=")
            .unwrap()
            .parse()
            .unwrap();
        assert!((Utc::now().timestamp() - unix).abs() < 5);
    }
}
