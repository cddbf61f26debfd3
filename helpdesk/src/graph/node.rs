//! Graph node trait: one step in a StateGraph.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

use super::Next;

/// One step in a graph: state in, (state out, next step).
///
/// What "state out" means depends on the graph's `StateUpdater`: with the default
/// `ReplaceUpdater` it is the full new state, with `AppendMessages` it is a partial state
/// holding only what the node produced.
///
/// **Interaction**: Implemented by `SupportAgent`. See `StateGraph::add_node` and
/// `CompiledStateGraph::invoke`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"assistant"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: state in, (state out, next step).
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
