//! Conversation state and tool-call types for the support agent.
//!
//! `ConversationState` holds the message history plus the order the customer is talking
//! about. The turn controller reads it and returns new messages; the graph merges them back
//! with [`AppendMessages`](crate::channels::AppendMessages).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::Message;

/// Order id embedded in the system prompt when the caller supplies no order.
pub const UNKNOWN_ORDER_ID: &str = "UNKNOWN";

/// A single tool invocation requested by the model.
///
/// `arguments` is the raw JSON text from the model; it is parsed and validated only when the
/// call is executed. `id` correlates the call with its `Message::Tool` result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as registered in the tool registry (e.g. `cancel_order`).
    pub name: String,
    /// Arguments as JSON string.
    pub arguments: String,
    /// Call id assigned by the model; the agent fills one in when missing.
    pub id: Option<String>,
}

/// The order a conversation is about.
///
/// Only `order_id` is interpreted; any other fields supplied by the caller are carried along
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderContext {
    pub order_id: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl OrderContext {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            extra: BTreeMap::new(),
        }
    }
}

impl Default for OrderContext {
    fn default() -> Self {
        Self::new(UNKNOWN_ORDER_ID)
    }
}

/// State for the single-node support graph.
///
/// Satisfies `Clone + Send + Sync + Debug + 'static` for use with `Node<ConversationState>`
/// and `StateGraph<ConversationState>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Conversation history; append-only.
    pub messages: Vec<Message>,
    /// Order being discussed; `None` means the default `{order_id: "UNKNOWN"}`.
    #[serde(default)]
    pub order: Option<OrderContext>,
}

impl ConversationState {
    /// State with one order and an initial message list.
    pub fn new(order: OrderContext, messages: Vec<Message>) -> Self {
        Self {
            messages,
            order: Some(order),
        }
    }

    /// The order context, or the `UNKNOWN` default when absent.
    pub fn order_or_default(&self) -> OrderContext {
        self.order.clone().unwrap_or_default()
    }

    /// Content of the chronologically last assistant message, if any.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}
