//! Tool source abstraction: list tools and call a tool.
//!
//! The support agent depends on `ToolSource` instead of a concrete registry. The model
//! client gets the tool list from `list_tools()`; the agent executes requested calls with
//! `call_tool(name, args)`. [`ToolRegistry`](crate::tools::ToolRegistry) is the implementation
//! used by the binary.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification, aligned with the OpenAI function-calling schema.
///
/// **Interaction**: Returned by `ToolSource::list_tools()`; bound to `ChatOpenAI` with
/// `with_tools`, and read by `ToolRegistry` to validate arguments before a call.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name the model uses in its tool calls.
    pub name: String,
    /// Human-readable description for the model.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Result of a single tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    /// Result text, sent back to the model as a tool message.
    pub text: String,
}

/// Errors from listing or calling tools.
///
/// The support agent turns every variant into a tool-result message, so none of them abort
/// a turn.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    /// The model asked for a tool that is not registered.
    #[error("tool not found: {0}")]
    NotFound(String),
    /// Arguments are not a JSON object or miss a required field.
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    /// The tool ran and failed (e.g. order already shipped).
    #[error("tool execution failed: {0}")]
    Execution(String),
}

/// Tool source: list tools and call a tool.
///
/// **Interaction**: Used by `SupportAgent` (call_tool) and by `build_support_agent`
/// (list_tools, to bind the tool list to the model client).
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// List available tools.
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    /// Call a tool by name with JSON arguments.
    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError>;
}
