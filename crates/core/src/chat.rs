//! Chat history value types (spec.md §3 "Chat message").

use serde::{Deserialize, Serialize};

use crate::id::MessageId;

/// Messages older context recall truncates content to this many characters.
pub const CONTEXT_TRUNCATE_LEN: usize = 500;

/// Number of trailing messages (user+assistant pairs × 2) folded into the
/// next prompt as conversational context.
pub const CONTEXT_WINDOW_MESSAGES: usize = 6;

/// Rows loaded from persistence into in-memory history on startup.
pub const PERSISTED_HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One turn-half: either the user's prompt or the assistant's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub agent_used: Option<String>,
    pub duration_ms: Option<u64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::User,
            content: content.into(),
            agent_used: None,
            duration_ms: None,
            timestamp,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        agent_used: impl Into<String>,
        duration_ms: u64,
        timestamp: i64,
    ) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Assistant,
            content: content.into(),
            agent_used: Some(agent_used.into()),
            duration_ms: Some(duration_ms),
            timestamp,
        }
    }

    /// Truncates content to [`CONTEXT_TRUNCATE_LEN`] characters for context recall.
    pub fn truncated_content(&self) -> String {
        truncate_chars(&self.content, CONTEXT_TRUNCATE_LEN)
    }
}

/// Truncates `s` to at most `max_chars` Unicode scalar values.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod tests;
