//! State updaters: how a node's output is merged into graph state.
//!
//! By default the node's return value replaces the state. Conversation graphs use
//! [`AppendMessages`] instead: `messages` accumulates (new messages are appended in order)
//! while `order` is replaced only when a node supplies one.

use std::fmt::Debug;
use std::sync::Arc;

use crate::state::ConversationState;

/// Trait for customizing how state updates are applied.
pub trait StateUpdater<S>: Send + Sync + Debug
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Merge the node's output (`update`) into `current`.
    fn apply_update(&self, current: &mut S, update: &S);
}

/// Default state updater that replaces the entire state.
#[derive(Debug, Clone, Default)]
pub struct ReplaceUpdater;

impl<S> StateUpdater<S> for ReplaceUpdater
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn apply_update(&self, current: &mut S, update: &S) {
        *current = update.clone();
    }
}

/// Conversation reducer: appends the update's messages in order and replaces the order
/// context only when the update carries one.
///
/// Nodes using this updater return a *partial* state holding just the messages they produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendMessages;

impl StateUpdater<ConversationState> for AppendMessages {
    fn apply_update(&self, current: &mut ConversationState, update: &ConversationState) {
        current.messages.extend(update.messages.iter().cloned());
        if update.order.is_some() {
            current.order = update.order.clone();
        }
    }
}

/// Boxed state updater for type erasure.
pub type BoxedStateUpdater<S> = Arc<dyn StateUpdater<S>>;
