//! Next-step result from a graph node: continue linear chain, jump to a node, or end.

/// Next step after running a node.
///
/// - **Continue**: follow the outgoing edge (END when the node is the finish point).
/// - **Node(id)**: jump to the given node.
/// - **End**: stop; return current state as final result.
///
/// **Interaction**: Returned by `Node::run`; consumed by `CompiledStateGraph::invoke`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    Continue,
    Node(String),
    End,
}
