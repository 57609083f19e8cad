//! Persisted conversation logs.

use crate::ChatMessage;
use serde::{Deserialize, Serialize};

/// The full persisted conversation log for one (project, mode) pair.
///
/// The log grows without bound in storage; only a bounded suffix is sent to
/// the provider per call. The `version` field is an optimistic-concurrency
/// stamp: a turn commits only if the stored version still matches the one it
/// loaded, so a concurrent turn's append is detected instead of silently
/// overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLog {
    /// Monotonically increasing commit counter
    #[serde(default)]
    pub version: u64,
    /// The ordered, append-only message history
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ConversationLog {
    /// The most recent `max` messages, in original order.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_core::{ChatMessage, ConversationLog, Role};
    ///
    /// let log = ConversationLog {
    ///     version: 1,
    ///     messages: (0..50)
    ///         .map(|i| ChatMessage::new(Role::User, format!("m{i}")))
    ///         .collect(),
    /// };
    /// let recent = log.recent(40);
    /// assert_eq!(recent.len(), 40);
    /// assert_eq!(recent[0].content, "m10");
    /// ```
    pub fn recent(&self, max: usize) -> &[ChatMessage] {
        if self.messages.len() > max {
            &self.messages[self.messages.len() - max..]
        } else {
            &self.messages
        }
    }
}
