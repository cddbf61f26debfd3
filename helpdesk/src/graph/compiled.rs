//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds nodes, the entry node and the edge map derived
//! from explicit edges at compile time, plus the state updater used to merge node output.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::channels::BoxedStateUpdater;
use crate::error::AgentError;

use super::logging::{
    log_run_complete, log_run_failed, log_run_start, log_step_merged, log_step_start,
};
use super::state_graph::END;
use super::{Next, Node};

/// Default cap on node executions per `invoke`.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Compiled graph: immutable structure, supports invoke only.
///
/// Runs from the entry node; each node's returned `Next` chooses what runs after it
/// (`Continue` follows the compiled edge). Node output is merged through the state updater.
///
/// If any node fails, `invoke` returns the error and no partial result: the caller's
/// state is untouched because the run works on its own copy.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) first_node_id: String,
    /// from_id -> to_id for every edge except the one from START.
    pub(super) next_map: HashMap<String, String>,
    pub(super) state_updater: BoxedStateUpdater<S>,
    pub(super) recursion_limit: usize,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Runs the graph from the entry node until END and returns the final state.
    ///
    /// **Interaction**: Calls `Node::run` for each step, then `StateUpdater::apply_update`.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        log_run_start(&self.first_node_id, self.recursion_limit);
        let mut state = state;
        let mut steps = 0usize;
        match self.run_loop(&mut state, &mut steps).await {
            Ok(()) => {
                log_run_complete(steps);
                Ok(state)
            }
            Err(e) => {
                log_run_failed(steps, &e);
                Err(e)
            }
        }
    }

    async fn run_loop(&self, state: &mut S, steps: &mut usize) -> Result<(), AgentError> {
        let mut current_id = self.first_node_id.clone();

        loop {
            if *steps >= self.recursion_limit {
                return Err(AgentError::ExecutionFailed(format!(
                    "recursion limit of {} reached at node {}",
                    self.recursion_limit, current_id
                )));
            }
            *steps += 1;

            let node = self.nodes.get(&current_id).cloned().ok_or_else(|| {
                AgentError::ExecutionFailed(format!("node not found: {}", current_id))
            })?;

            log_step_start(&current_id, *steps);
            let (update, next) = node.run(state.clone()).await?;
            self.state_updater.apply_update(state, &update);
            log_step_merged(&current_id, *steps, &next);

            let next_id = match next {
                Next::End => None,
                Next::Node(id) => Some(id),
                Next::Continue => self.next_map.get(&current_id).cloned(),
            };
            match next_id {
                Some(id) if id != END => current_id = id,
                _ => return Ok(()),
            }
        }
    }

    /// Id of the node that runs first.
    pub fn entry_point(&self) -> &str {
        &self.first_node_id
    }
}
