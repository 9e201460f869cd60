//! Chat turns and conversation assembly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::settings::RelaySettings;

/// Author of a chat turn.
///
/// Caller-supplied history may carry roles the relay does not know; those are
/// kept as [`Role::Other`] and forwarded unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn in a conversation. Ordering within a conversation is oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Returns the most recent `window` entries of `history`, oldest first.
pub fn trailing_window(history: &[ChatMessage], window: usize) -> &[ChatMessage] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

/// Builds the upstream message sequence: system instruction, then the
/// trailing history window, then the new user message.
pub fn build_conversation(
    settings: &RelaySettings,
    history: &[ChatMessage],
    message: &str,
) -> Vec<ChatMessage> {
    let recent = trailing_window(history, settings.history_window);
    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(ChatMessage::system(settings.system_prompt.clone()));
    messages.extend_from_slice(recent);
    messages.push(ChatMessage::user(message));
    messages
}
