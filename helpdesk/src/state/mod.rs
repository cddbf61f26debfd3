//! State types for the support graph.
//!
//! # Main types
//!
//! - [`ConversationState`]: conversation messages plus the [`OrderContext`] being discussed.
//! - [`ToolCall`]: a tool invocation requested by the model; executed by
//!   [`SupportAgent`](crate::SupportAgent) through the tool registry.
//!
//! # Example
//!
//! ```rust
//! use helpdesk::{ConversationState, Message, OrderContext};
//!
//! let state = ConversationState::new(
//!     OrderContext::new("A12345"),
//!     vec![Message::user("Please cancel my order A12345.")],
//! );
//! assert_eq!(state.order_or_default().order_id, "A12345");
//! ```

mod conversation;

pub use conversation::{ConversationState, OrderContext, ToolCall, UNKNOWN_ORDER_ID};
