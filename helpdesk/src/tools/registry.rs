use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::tool_source::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
use crate::tools::r#trait::Tool;

/// Registry of the tools the model may call, keyed by name.
///
/// Implements [`ToolSource`]: `list_tools` returns every spec sorted by name, `call_tool`
/// looks the tool up, validates the arguments against its `input_schema` and runs it.
///
/// # Examples
///
/// ```
/// use helpdesk::tools::{CancelOrderTool, ToolRegistry};
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(CancelOrderTool));
/// assert_eq!(registry.list()[0].name, "cancel_order");
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_tool(mut self, tool: Box<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Specs of all registered tools, sorted by name.
    pub fn list(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|tool| tool.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Calls a tool by name after validating `args` against its schema.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no tool has this name.
    /// - `InvalidInput` when `args` is not an object or misses a required property.
    /// - Whatever the tool itself returns.
    pub async fn call(&self, name: &str, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        validate_arguments(&tool.spec(), &args)?;
        tool.call(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolSource for ToolRegistry {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.list())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        self.call(name, arguments).await
    }
}

/// Checks the argument shape before a tool runs: object arguments and every `required`
/// property present. Property types are not checked.
fn validate_arguments(spec: &ToolSpec, args: &Value) -> Result<(), ToolSourceError> {
    let obj = args.as_object().ok_or_else(|| {
        ToolSourceError::InvalidInput(format!("{} expects a JSON object of arguments", spec.name))
    })?;
    let required = spec
        .input_schema
        .get("required")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let missing: Vec<&str> = required
        .iter()
        .filter_map(Value::as_str)
        .filter(|field| obj.get(*field).map_or(true, Value::is_null))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ToolSourceError::InvalidInput(format!(
            "missing required field(s) for {}: {}",
            spec.name,
            missing.join(", ")
        )))
    }
}
