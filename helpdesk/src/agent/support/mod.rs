//! One-turn order-support agent.
//!
//! [`SupportAgent::run_turn`] builds the order-aware system prompt, asks the model, runs the
//! requested `cancel_order` call (per [`ToolCallPolicy`]) and asks the model again for a
//! confirmation. [`build_support_graph`] wires the agent as the single `"assistant"` node;
//! [`build_support_agent`] constructs it from environment-derived [`SupportBuildConfig`].

mod agent;
mod config;
mod graph;
mod policy;
mod prompt;

pub use agent::{SupportAgent, ASSISTANT_NODE_ID, DEFAULT_EXECUTION_ERROR_TEMPLATE};
pub use config::{build_support_agent, BuildError, SupportBuildConfig, DEFAULT_MODEL};
pub use graph::build_support_graph;
pub use policy::ToolCallPolicy;
pub use prompt::system_prompt;
