use async_trait::async_trait;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

/// A single tool that the model can call.
///
/// Each tool has a unique name, a specification (description and JSON schema) and the call
/// logic. Tools are registered with [`ToolRegistry`](super::ToolRegistry), which validates
/// arguments against `spec().input_schema` before `call` runs.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use helpdesk::tools::Tool;
/// use helpdesk::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
///
/// struct TrackOrder;
///
/// #[async_trait]
/// impl Tool for TrackOrder {
///     fn name(&self) -> &str {
///         "track_order"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "track_order".to_string(),
///             description: Some("Track an order".to_string()),
///             input_schema: serde_json::json!({}),
///         }
///     }
///
///     async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolSourceError> {
///         Ok(ToolCallContent {
///             text: "in transit".to_string(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of this tool within a registry.
    fn name(&self) -> &str;

    /// Specification sent to the model and used for argument validation.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool. `args` is a JSON object that already passed schema validation.
    ///
    /// Return `ToolSourceError::Execution` for business failures; the agent reports them to
    /// the model instead of failing the turn.
    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError>;
}
