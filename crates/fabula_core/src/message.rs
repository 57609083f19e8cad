//! Message types for conversation history.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single message in a conversation.
///
/// Messages are append-only: once created they are never mutated, and
/// history ordering is insertion order.
///
/// # Examples
///
/// ```
/// use fabula_core::{ChatMessage, Role};
///
/// let message = ChatMessage::new(Role::User, "Hello!");
///
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Convenience constructor for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Convenience constructor for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Convenience constructor for an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
