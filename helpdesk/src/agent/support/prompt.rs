//! System instruction for the support agent.

use crate::state::OrderContext;

/// Builds the system instruction for one turn: the order id plus the cancellation policy.
///
/// The literal `UNKNOWN` id (see [`OrderContext::default`]) is embedded like any other id.
pub fn system_prompt(order: &OrderContext) -> String {
    format!(
        "You are an ecommerce support agent.\n\
         ORDER ID: {}\n\
         If the customer asks to cancel, call cancel_order(order_id) and then send a simple confirmation.\n\
         Otherwise, just respond normally.",
        order.order_id
    )
}
