//! Conversation output for stdout.

use helpdesk::{ConversationState, Message};

use crate::RunError;

/// `"{type}: {content}"`, type being `system`, `human`, `ai` or `tool`.
pub fn format_message(message: &Message) -> String {
    format!("{}: {}", message.kind(), message.content())
}

/// Renders the final state: one formatted line per message, or pretty JSON when `json`.
pub fn render(state: &ConversationState, json: bool) -> Result<String, RunError> {
    if json {
        return Ok(serde_json::to_string_pretty(state)?);
    }
    Ok(state
        .messages
        .iter()
        .map(format_message)
        .collect::<Vec<_>>()
        .join("\n"))
}
