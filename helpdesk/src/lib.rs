//! # Helpdesk
//!
//! A one-turn order-support agent with a **state-in, state-out** design: a
//! [`ConversationState`] (messages plus the order being discussed) flows through a single
//! graph node, the [`SupportAgent`], which may cancel the order through a tool and confirm.
//!
//! ## Turn
//!
//! 1. System prompt with the order id and the cancellation policy ([`system_prompt`]).
//! 2. First model pass with the `cancel_order` tool bound ([`LlmClient`]).
//! 3. Requested tool calls, selected by [`ToolCallPolicy`], run through the [`ToolRegistry`];
//!    each result becomes a tool message with the matching call id.
//! 4. Second model pass for a natural-language confirmation.
//!
//! A model failure aborts the turn and nothing is appended; tool failures are reported to the
//! model as tool messages.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`].
//! - [`channels`]: [`StateUpdater`] and the conversation reducer [`AppendMessages`].
//! - [`agent`]: [`SupportAgent`], [`build_support_graph`], [`SupportBuildConfig`].
//! - [`llm`]: [`LlmClient`], [`ChatOpenAI`], [`MockLlm`].
//! - [`tools`] / [`tool_source`]: [`Tool`], [`ToolRegistry`], [`ToolSource`], `cancel_order`.
//! - [`state`] / [`message`]: [`ConversationState`], [`OrderContext`], [`Message`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use helpdesk::{
//!     build_support_graph, support_tools, ConversationState, Message, MockLlm, OrderContext,
//!     SupportAgent,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let agent = SupportAgent::new(
//!     Arc::new(MockLlm::with_cancel_order_call("A12345")),
//!     Arc::new(support_tools()),
//! );
//! let graph = build_support_graph(Arc::new(agent))?;
//! let state = ConversationState::new(
//!     OrderContext::new("A12345"),
//!     vec![Message::user("Please cancel my order A12345.")],
//! );
//! let state = graph.invoke(state).await?;
//! for msg in &state.messages {
//!     println!("{}: {}", msg.kind(), msg.content());
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod channels;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod state;
pub mod tool_source;
pub mod tools;

pub use agent::{
    build_support_agent, build_support_graph, system_prompt, BuildError, SupportAgent,
    SupportBuildConfig, ToolCallPolicy, ASSISTANT_NODE_ID, DEFAULT_EXECUTION_ERROR_TEMPLATE,
    DEFAULT_MODEL,
};
pub use channels::{AppendMessages, ReplaceUpdater, StateUpdater};
pub use error::AgentError;
pub use graph::{CompilationError, CompiledStateGraph, Next, Node, StateGraph, END, START};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm, ToolChoiceMode};
pub use message::Message;
pub use state::{ConversationState, OrderContext, ToolCall, UNKNOWN_ORDER_ID};
pub use tool_source::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
pub use tools::{cancel_order, support_tools, CancelOrderTool, Tool, ToolRegistry, TOOL_CANCEL_ORDER};
