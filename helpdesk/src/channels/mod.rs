//! State update strategies for graph runs.
//!
//! See [`StateUpdater`]; [`AppendMessages`] is the reducer used by the support graph.

mod updater;

pub use updater::{AppendMessages, BoxedStateUpdater, ReplaceUpdater, StateUpdater};
