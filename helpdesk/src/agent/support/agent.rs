//! Turn controller: system prompt, first model pass, tool execution, confirmation pass.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::{ConversationState, ToolCall};
use crate::tool_source::{ToolSource, ToolSourceError};

use super::policy::ToolCallPolicy;
use super::prompt::system_prompt;

/// Node id of the support agent in the support graph.
pub const ASSISTANT_NODE_ID: &str = "assistant";

/// Tool-result text for a failed or malformed tool call.
pub const DEFAULT_EXECUTION_ERROR_TEMPLATE: &str =
    "Error executing tool '{tool_name}' with kwargs {tool_kwargs} with error:\n {error}\n Please fix the error and try again.";

/// One-turn support agent.
///
/// A turn asks the model once with the order-aware system prompt; when the reply requests
/// tools, the selected calls run through the tool source and the model is asked again for a
/// confirmation. The turn returns only the messages it produced.
///
/// **Interaction**: Implements `Node<ConversationState>` (id `"assistant"`); compile it with
/// `build_support_graph`, which merges the output through `AppendMessages`.
pub struct SupportAgent {
    llm: Arc<dyn LlmClient>,
    tools: Arc<dyn ToolSource>,
    tool_call_policy: ToolCallPolicy,
}

impl SupportAgent {
    /// Creates an agent. `llm` should have the tool list of `tools` bound to it.
    pub fn new(llm: Arc<dyn LlmClient>, tools: Arc<dyn ToolSource>) -> Self {
        Self {
            llm,
            tools,
            tool_call_policy: ToolCallPolicy::default(),
        }
    }

    pub fn with_tool_call_policy(mut self, policy: ToolCallPolicy) -> Self {
        self.tool_call_policy = policy;
        self
    }

    pub fn tool_call_policy(&self) -> ToolCallPolicy {
        self.tool_call_policy
    }

    /// Runs one turn over `state` and returns the new messages in order.
    ///
    /// Output is `[assistant]` when the model requests no tool, otherwise
    /// `[assistant, tool.., assistant]`. A model failure on either pass returns
    /// `AgentError::ModelUnavailable` and no messages. Tool failures do not fail the turn;
    /// they become tool-result messages built from [`DEFAULT_EXECUTION_ERROR_TEMPLATE`].
    pub async fn run_turn(&self, state: &ConversationState) -> Result<Vec<Message>, AgentError> {
        let order = state.order_or_default();
        let mut context = Vec::with_capacity(state.messages.len() + 4);
        context.push(Message::system(system_prompt(&order)));
        context.extend(state.messages.iter().cloned());

        debug!(
            order_id = %order.order_id,
            message_count = context.len(),
            "Support turn: first model pass"
        );
        let mut first = self.llm.invoke(&context).await?;
        log_usage("first", &first);
        if first.tool_calls.is_empty() {
            return Ok(vec![first.into_message()]);
        }

        assign_call_ids(&mut first.tool_calls);
        let requested = first.tool_calls.len();
        let selected = self.tool_call_policy.select_count(requested);
        if selected < requested {
            debug!(
                policy = %self.tool_call_policy,
                requested,
                dropped = requested - selected,
                "Ignoring extra tool calls"
            );
        }
        // Every call left on the assistant message needs a tool reply on the next request.
        first.tool_calls.truncate(selected);
        let calls = first.tool_calls.clone();

        let mut output = vec![first.into_message()];
        for call in &calls {
            output.push(self.execute_tool_call(call).await);
        }

        context.extend(output.iter().cloned());
        debug!(
            message_count = context.len(),
            "Support turn: confirmation model pass"
        );
        let confirmation = self.llm.invoke(&context).await?;
        log_usage("confirmation", &confirmation);
        output.push(confirmation.into_message());
        Ok(output)
    }

    /// Executes one call and wraps the result (or the error text) in a tool message.
    async fn execute_tool_call(&self, call: &ToolCall) -> Message {
        let call_id = call.id.as_deref().unwrap_or_default();
        let args = match parse_tool_arguments(&call.arguments) {
            Ok(args) => args,
            Err(e) => {
                warn!(tool = %call.name, error = %e, arguments = %call.arguments, "tool arguments JSON parse failed");
                let text = format_execution_error(&call.name, &call.arguments, &e);
                return Message::tool(call_id, text);
            }
        };

        debug!(tool = %call.name, args = %args, call_id, "Calling tool");
        match self.tools.call_tool(&call.name, args.clone()).await {
            Ok(content) => {
                trace!(tool = %call.name, result = %content.text, "Tool returned");
                Message::tool(call_id, content.text)
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool call failed");
                Message::tool(
                    call_id,
                    format_execution_error(&call.name, &args.to_string(), &e),
                )
            }
        }
    }
}

fn log_usage(pass: &str, response: &LlmResponse) {
    if let Some(usage) = &response.usage {
        debug!(
            pass,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Model usage"
        );
    }
}

/// Gives every call without an id a fresh `call_<uuid>` so tool results can reference it.
fn assign_call_ids(calls: &mut [ToolCall]) {
    for call in calls.iter_mut().filter(|c| c.id.as_deref().map_or(true, str::is_empty)) {
        call.id = Some(format!("call_{}", uuid::Uuid::new_v4().simple()));
    }
}

/// Parses the model's argument text. Empty text means no arguments (`{}`).
fn parse_tool_arguments(arguments: &str) -> Result<Value, ToolSourceError> {
    if arguments.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(arguments)
        .map_err(|e| ToolSourceError::InvalidInput(format!("arguments are not valid JSON: {}", e)))
}

fn format_execution_error(tool_name: &str, tool_kwargs: &str, error: &ToolSourceError) -> String {
    DEFAULT_EXECUTION_ERROR_TEMPLATE
        .replace("{tool_name}", tool_name)
        .replace("{tool_kwargs}", tool_kwargs)
        .replace("{error}", &error.to_string())
}

#[async_trait]
impl Node<ConversationState> for SupportAgent {
    fn id(&self) -> &str {
        ASSISTANT_NODE_ID
    }

    /// Returns a partial state holding only this turn's messages (`order: None`).
    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let messages = self.run_turn(&state).await?;
        Ok((
            ConversationState {
                messages,
                order: None,
            },
            Next::Continue,
        ))
    }
}
