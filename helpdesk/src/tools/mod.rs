mod cancel_order;
mod registry;
mod r#trait;

pub use cancel_order::{cancel_order, CancelOrderTool, TOOL_CANCEL_ORDER};
pub use r#trait::Tool;
pub use registry::ToolRegistry;

/// Registry holding every tool the support agent offers (currently only `cancel_order`).
pub fn support_tools() -> ToolRegistry {
    ToolRegistry::new().with_tool(Box::new(CancelOrderTool))
}
