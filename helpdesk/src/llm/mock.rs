//! Mock LLM for tests.
//!
//! Returns scripted responses in order and records every message list it was invoked with,
//! so tests can assert on what the model saw (system prompt, tool results).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;
use crate::tools::TOOL_CANCEL_ORDER;

/// Scripted LLM.
///
/// Each `invoke()` pops the next scripted step; when only one step is left it is repeated,
/// so a single-response mock answers every call the same way. A step is either a response or
/// a failure (reported as `AgentError::ModelUnavailable`).
///
/// **Interaction**: Implements `LlmClient`; used by `SupportAgent` in tests.
pub struct MockLlm {
    steps: Mutex<VecDeque<Result<LlmResponse, String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Creates a mock that replays `responses` in order (the last one repeats).
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self::from_steps(responses.into_iter().map(Ok).collect())
    }

    fn from_steps(steps: VecDeque<Result<LlmResponse, String>>) -> Self {
        Self {
            steps: Mutex::new(steps),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that always answers with `content` and no tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::new(vec![LlmResponse::text(content)])
    }

    /// Creates a mock whose first response requests `cancel_order(order_id)` (call id
    /// `call-1`) and whose later responses confirm the cancellation in plain text.
    pub fn with_cancel_order_call(order_id: &str) -> Self {
        Self::new(vec![
            LlmResponse::with_tool_calls("", vec![cancel_order_call(order_id, "call-1")]),
            LlmResponse::text(format!("Your order {} has been cancelled.", order_id)),
        ])
    }

    /// Creates a mock whose every invocation fails with `ModelUnavailable(reason)`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::from_steps(VecDeque::from([Err(reason.into())]))
    }

    /// Appends a failing step after the scripted responses (e.g. fail on the second pass).
    pub fn then_fail(self, reason: impl Into<String>) -> Self {
        self.lock_steps().push_back(Err(reason.into()));
        self
    }

    /// Message lists received so far, one entry per `invoke()`.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `invoke()` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn lock_steps(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<LlmResponse, String>>> {
        self.steps.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A `cancel_order` tool call with the given order id and call id.
pub(crate) fn cancel_order_call(order_id: &str, call_id: &str) -> ToolCall {
    ToolCall {
        name: TOOL_CANCEL_ORDER.to_string(),
        arguments: serde_json::json!({ "order_id": order_id }).to_string(),
        id: Some(call_id.to_string()),
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(messages.to_vec());

        let step = {
            let mut steps = self.lock_steps();
            if steps.len() > 1 {
                steps.pop_front()
            } else {
                steps.front().cloned()
            }
        };
        match step {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(AgentError::ModelUnavailable(reason)),
            None => Err(AgentError::ModelUnavailable(
                "mock has no scripted responses".to_string(),
            )),
        }
    }
}
