//! Agents built on the graph runtime.
//!
//! - [`support`]: one-turn order-support agent (`SupportAgent`) and its graph wiring.

pub mod support;

pub use support::{
    build_support_agent, build_support_graph, system_prompt, BuildError, SupportAgent,
    SupportBuildConfig, ToolCallPolicy, ASSISTANT_NODE_ID, DEFAULT_EXECUTION_ERROR_TEMPLATE,
    DEFAULT_MODEL,
};
