//! Single-node support graph: START → assistant → END.

use std::sync::Arc;

use crate::channels::AppendMessages;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph};
use crate::state::ConversationState;

use super::agent::{SupportAgent, ASSISTANT_NODE_ID};

/// Compiles the support graph: `agent` is both entry and finish point, and its output is
/// appended to the conversation with [`AppendMessages`].
///
/// **Interaction**: `invoke(state)` runs exactly one turn and returns the merged state.
pub fn build_support_graph(
    agent: Arc<SupportAgent>,
) -> Result<CompiledStateGraph<ConversationState>, CompilationError> {
    let mut graph = StateGraph::<ConversationState>::new();
    graph
        .add_node(ASSISTANT_NODE_ID, agent)
        .set_entry_point(ASSISTANT_NODE_ID)
        .set_finish_point(ASSISTANT_NODE_ID);
    graph
        .with_state_updater(Arc::new(AppendMessages))
        .compile()
}
