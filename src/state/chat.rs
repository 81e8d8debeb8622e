#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub author: String,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,
}

/// Transient input state for the chat room view.
///
/// `connected` is the last value observed on the connection stream, not the
/// collaborator's authoritative state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomDraft {
    pub name: String,
    pub text: String,
    pub connected: bool,
}

impl RoomDraft {
    /// Name, or `None` when there is nothing to connect with.
    pub fn pending_name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|n| !n.is_empty())
    }

    /// Draft text, or `None` when there is nothing to send.
    pub fn pending_text(&self) -> Option<&str> {
        Some(self.text.as_str()).filter(|t| !t.is_empty())
    }
}
