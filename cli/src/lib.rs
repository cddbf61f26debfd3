//! Library side of the `helpdesk` binary: options, one-turn run and output rendering.
//!
//! `main.rs` parses arguments, loads config and logging, then calls [`run`] and
//! [`render`]. Tests drive [`run_with_agent`] with a scripted model.

mod display;

use std::sync::Arc;

use helpdesk::{
    build_support_agent, build_support_graph, AgentError, BuildError, CompilationError,
    ConversationState, Message, OrderContext, SupportAgent, SupportBuildConfig, ToolCallPolicy,
};
use thiserror::Error;

pub use display::{format_message, render};

/// Order used when none is given.
pub const DEFAULT_ORDER_ID: &str = "A12345";

/// User message used when none is given.
pub const DEFAULT_MESSAGE: &str = "Please cancel my order A12345.";

/// Error from a CLI run; printed to stderr with exit code 1.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config: {0}")]
    Config(#[from] helpdesk_config::LoadError),
    #[error("build: {0}")]
    Build(#[from] BuildError),
    #[error("graph: {0}")]
    Compile(#[from] CompilationError),
    #[error("turn failed: {0}")]
    Agent(#[from] AgentError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to run, after argument parsing.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub order_id: String,
    pub message: String,
    /// Overrides the model from the environment.
    pub model: Option<String>,
    /// Overrides `HELPDESK_TOOL_CALL_POLICY`.
    pub tool_call_policy: Option<ToolCallPolicy>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            order_id: DEFAULT_ORDER_ID.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            model: None,
            tool_call_policy: None,
        }
    }
}

impl RunOptions {
    pub fn initial_state(&self) -> ConversationState {
        ConversationState::new(
            OrderContext::new(self.order_id.clone()),
            vec![Message::user(self.message.clone())],
        )
    }

    /// `config` with the command-line overrides applied.
    pub fn apply_to(&self, mut config: SupportBuildConfig) -> SupportBuildConfig {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(policy) = self.tool_call_policy {
            config.tool_call_policy = policy;
        }
        config
    }
}

/// Builds the agent from `config` (plus overrides) and runs one turn.
pub async fn run(
    opts: &RunOptions,
    config: SupportBuildConfig,
) -> Result<ConversationState, RunError> {
    let config = opts.apply_to(config);
    let agent = build_support_agent(&config).await?;
    run_with_agent(opts, agent).await
}

/// Runs one turn through the support graph with a ready agent.
pub async fn run_with_agent(
    opts: &RunOptions,
    agent: SupportAgent,
) -> Result<ConversationState, RunError> {
    let graph = build_support_graph(Arc::new(agent))?;
    tracing::info!(order_id = %opts.order_id, "Running support turn");
    Ok(graph.invoke(opts.initial_state()).await?)
}
