//! Tracing events for one `CompiledStateGraph::invoke`.
//!
//! A run logs its start and end at `info`; each node step is `debug`, numbered from 1.

use crate::error::AgentError;
use crate::graph::Next;

pub fn log_run_start(entry: &str, recursion_limit: usize) {
    tracing::info!(entry, recursion_limit, "Graph run started");
}

pub fn log_step_start(node_id: &str, step: usize) {
    tracing::debug!(node_id, step, "Node step started");
}

/// Logged after the node's output has been merged into the run state.
pub fn log_step_merged(node_id: &str, step: usize, next: &Next) {
    tracing::debug!(node_id, step, ?next, "Node step merged");
}

pub fn log_run_complete(steps: usize) {
    tracing::info!(steps, "Graph run complete");
}

/// `steps` counts the node that failed.
pub fn log_run_failed(steps: usize, error: &AgentError) {
    tracing::error!(steps, %error, "Graph run failed");
}
