//! `cancel_order` tool: the single business action the support agent can take.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

/// Tool name the model uses to request a cancellation.
pub const TOOL_CANCEL_ORDER: &str = "cancel_order";

/// Cancels the order and returns the confirmation text.
///
/// Pure formatting: no order backend is attached, so the same id always yields the same text.
pub fn cancel_order(order_id: &str) -> String {
    format!("Order {} has been cancelled.", order_id)
}

#[derive(Debug, Deserialize)]
struct CancelOrderArgs {
    order_id: String,
}

/// Exposes [`cancel_order`] to the model.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelOrderTool;

#[async_trait]
impl Tool for CancelOrderTool {
    fn name(&self) -> &str {
        TOOL_CANCEL_ORDER
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_CANCEL_ORDER.to_string(),
            description: Some("Cancel an order that hasn't shipped.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "order_id": {
                        "type": "string",
                        "description": "Id of the order to cancel."
                    }
                },
                "required": ["order_id"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let args: CancelOrderArgs = serde_json::from_value(args)
            .map_err(|e| ToolSourceError::InvalidInput(e.to_string()))?;
        tracing::debug!(order_id = %args.order_id, "cancel_order");
        Ok(ToolCallContent {
            text: cancel_order(&args.order_id),
        })
    }
}
