//! State graph: nodes + explicit edges (from → to), compiled into a runnable chain.
//!
//! Add nodes with `add_node`, define the chain with `add_edge(from, to)` using `START` and
//! `END` for entry/exit (or `set_entry_point` / `set_finish_point`), then `compile`.
//!
//! # State Updates
//!
//! By default, nodes return a new state that completely replaces the previous state.
//! Use `with_state_updater` to merge instead (e.g. `AppendMessages`).

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use crate::channels::{BoxedStateUpdater, ReplaceUpdater};
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
use crate::graph::node::Node;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// State graph: nodes plus explicit edges.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge`, then `compile()`.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Edges (from_id, to_id).
    edges: Vec<(String, String)>,
    state_updater: Option<BoxedStateUpdater<S>>,
    recursion_limit: usize,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            state_updater: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Attaches a custom state updater (default: `ReplaceUpdater`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use helpdesk::channels::AppendMessages;
    /// use helpdesk::{ConversationState, StateGraph};
    ///
    /// let graph = StateGraph::<ConversationState>::new()
    ///     .with_state_updater(Arc::new(AppendMessages));
    /// ```
    pub fn with_state_updater(self, updater: BoxedStateUpdater<S>) -> Self {
        Self {
            state_updater: Some(updater),
            ..self
        }
    }

    /// Maximum number of node executions per `invoke` (guards against `Next::Node` loops).
    pub fn with_recursion_limit(self, recursion_limit: usize) -> Self {
        Self {
            recursion_limit,
            ..self
        }
    }

    /// Adds a node; replaces an existing node with the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds an edge from `from_id` to `to_id`. Use `START` / `END` for entry and exit.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Marks `id` as the entry point; same as `add_edge(START, id)`.
    pub fn set_entry_point(&mut self, id: impl Into<String>) -> &mut Self {
        self.add_edge(START, id)
    }

    /// Marks `id` as a finish point; same as `add_edge(id, END)`.
    pub fn set_finish_point(&mut self, id: impl Into<String>) -> &mut Self {
        self.add_edge(id, END)
    }

    /// Validates the edges and builds the executable graph.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }

        let start_edges: Vec<_> = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t.clone())
            .collect();
        let first = match start_edges.as_slice() {
            [] => return Err(CompilationError::MissingStart),
            [only] => only.clone(),
            _ => {
                return Err(CompilationError::InvalidChain(
                    "multiple edges from START (branch)".into(),
                ))
            }
        };
        if first == END {
            return Err(CompilationError::InvalidChain(
                "START connects directly to END".into(),
            ));
        }

        if !self.edges.iter().any(|(_, t)| t == END) {
            return Err(CompilationError::MissingEnd);
        }

        let mut next_map: HashMap<String, String> = HashMap::new();
        for (from, to) in self.edges.iter().filter(|(f, _)| f.as_str() != START) {
            if next_map.insert(from.clone(), to.clone()).is_some() {
                return Err(CompilationError::InvalidChain(format!(
                    "duplicate from (branch): {}",
                    from
                )));
            }
        }

        let mut current = first.clone();
        let mut visited = HashSet::from([current.clone()]);
        while let Some(next) = next_map.get(&current) {
            if next == END {
                break;
            }
            if !visited.insert(next.clone()) {
                return Err(CompilationError::InvalidChain("cycle detected".into()));
            }
            current = next.clone();
        }

        let state_updater = self
            .state_updater
            .unwrap_or_else(|| Arc::new(ReplaceUpdater));

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            next_map,
            state_updater,
            recursion_limit: self.recursion_limit,
        })
    }
}
