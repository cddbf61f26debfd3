//! Agent execution error types.
//!
//! Returned by `Node::run`, `SupportAgent::run_turn` and `LlmClient::invoke`. Tool failures
//! are not part of this enum: they are reported back to the model as tool-result messages.

use thiserror::Error;

/// Agent execution error.
///
/// Any variant aborts the current turn; nothing produced by the turn is committed to state.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model backend failed (network, API error, empty response). Fatal for the turn;
    /// callers retry the whole turn.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Execution failed with a message (e.g. graph routed to an unknown node).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
