//! Click and presence tools.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use deepclick_protocols::error::ToolError;
use deepclick_protocols::tool::{AbortSignal, Tool, ToolContext, ToolDefinition, ToolResult};
use deepclick_protocols::types::RiskLevel;

use crate::interaction::ClickSkill;

const ABORT_POLL: Duration = Duration::from_millis(50);

/// Resolves once `signal` is raised.
pub(crate) async fn aborted(signal: &AbortSignal) {
    while !signal.is_aborted() {
        tokio::time::sleep(ABORT_POLL).await;
    }
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: serde_json::Value) -> Result<T, ToolError> {
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters(e.to_string()))
}

// ============================================================================
// Click Tool
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClickParams {
    pub selector: String,
    /// Seconds to wait before clicking.
    #[serde(default)]
    pub wait_before_execution: f64,
}

/// Click an element anywhere on the current page, including inside shadow
/// roots and same-origin frames.
pub struct ClickTool {
    definition: ToolDefinition,
    skill: Arc<ClickSkill>,
}

impl ClickTool {
    pub fn new(skill: Arc<ClickSkill>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "browser_click",
                "Browser Click",
                "Click an element on the current page by CSS selector. Searches the document, \
                 open shadow roots and same-origin frames. Reports new content that appears \
                 as a result of the click.",
            )
            .with_parameters_schema(json!({
                "type": "object",
                "properties": {
                    "selector": {
                        "type": "string",
                        "description": "CSS selector of the element, e.g. [mmid='114']"
                    },
                    "wait_before_execution": {
                        "type": "number",
                        "description": "Seconds to wait before clicking",
                        "default": 0.0
                    }
                },
                "required": ["selector"]
            }))
            .with_risk_level(RiskLevel::Medium),
            skill,
        }
    }
}

#[async_trait]
impl Tool for ClickTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: ClickParams = parse_params(params)?;
        debug!(
            correlation_id = %ctx.correlation_id,
            "browser_click on {}", params.selector
        );

        let report = tokio::select! {
            report = self.skill.click(&params.selector, params.wait_before_execution) => {
                report.map_err(|e| ToolError::ExecutionFailed(e.to_string()))?
            }
            _ = aborted(&ctx.abort_signal) => {
                debug!("Click on {} cancelled", params.selector);
                return Err(ToolError::Cancelled);
            }
        };

        let message = report.message();
        let result = if report.succeeded() {
            ToolResult::success(message)
        } else {
            ToolResult::failure(message)
        };
        Ok(result
            .with_metadata("selector", json!(params.selector))
            .with_metadata("new_content", json!(report.changes.is_some())))
    }
}

// ============================================================================
// Element Exists Tool
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ElementExistsParams {
    pub selector: String,
}

/// Report whether a selector matches anywhere on the current page.
pub struct ElementExistsTool {
    definition: ToolDefinition,
    skill: Arc<ClickSkill>,
}

impl ElementExistsTool {
    pub fn new(skill: Arc<ClickSkill>) -> Self {
        Self {
            definition: ToolDefinition::new(
                "browser_element_exists",
                "Browser Element Exists",
                "Check whether an element matching a CSS selector exists on the current page, \
                 including inside shadow roots and same-origin frames.",
            )
            .with_parameters_schema(json!({
                "type": "object",
                "properties": {
                    "selector": {
                        "type": "string",
                        "description": "CSS selector to look for"
                    }
                },
                "required": ["selector"]
            })),
            skill,
        }
    }
}

#[async_trait]
impl Tool for ElementExistsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let params: ElementExistsParams = parse_params(params)?;

        let exists = tokio::select! {
            exists = self.skill.element_exists(&params.selector) => {
                exists.map_err(|e| ToolError::ExecutionFailed(e.to_string()))?
            }
            _ = aborted(&ctx.abort_signal) => return Err(ToolError::Cancelled),
        };

        debug!("{} exists: {}", params.selector, exists);
        Ok(ToolResult::success(exists.to_string()).with_metadata("exists", json!(exists)))
    }
}
