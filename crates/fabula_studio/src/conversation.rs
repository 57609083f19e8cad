//! Conversation context management.

use crate::{keys, records};
use fabula_core::{ChatMessage, ChatMode, ConversationLog};
use fabula_error::{ConversationError, ConversationErrorKind, FabulaResult};
use fabula_interface::RecordStore;
use std::sync::Arc;
use tracing::debug;

/// Per-(project, mode) conversation log access.
///
/// A missing stored log is an empty sequence at version 0, never an error.
/// Commits are optimistic: the turn loads the log, calls the provider, and
/// persists the appended log only if the stored version still matches the
/// loaded one. A concurrent turn that committed in between surfaces as
/// `ConcurrentTurn` instead of silently dropping its append.
pub struct ConversationStore {
    records: Arc<dyn RecordStore>,
}

impl ConversationStore {
    /// Create a store over the given record backend.
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    /// Load the full log for `(project_id, mode)`.
    pub async fn load(&self, project_id: &str, mode: ChatMode) -> FabulaResult<ConversationLog> {
        let key = keys::chat(project_id, mode);
        let log = records::read::<ConversationLog>(self.records.as_ref(), &key)
            .await?
            .unwrap_or_default();
        debug!(key = %key, version = log.version, messages = log.messages.len(), "Loaded conversation log");
        Ok(log)
    }

    /// Append `appended` to the log loaded as `loaded` and persist it.
    ///
    /// The full, unbounded log is persisted; bounding applies only to the
    /// outbound prompt. Returns the committed log.
    ///
    /// # Errors
    ///
    /// `ConcurrentTurn` if the stored version no longer matches
    /// `loaded.version`; the store is left untouched.
    pub async fn commit(
        &self,
        project_id: &str,
        mode: ChatMode,
        loaded: &ConversationLog,
        appended: Vec<ChatMessage>,
    ) -> FabulaResult<ConversationLog> {
        let key = keys::chat(project_id, mode);

        let stored_version = records::read::<ConversationLog>(self.records.as_ref(), &key)
            .await?
            .map(|log| log.version)
            .unwrap_or(0);

        if stored_version != loaded.version {
            return Err(ConversationError::new(ConversationErrorKind::ConcurrentTurn {
                key,
                loaded: loaded.version,
                stored: stored_version,
            })
            .into());
        }

        let mut messages = loaded.messages.clone();
        messages.extend(appended);
        let committed = ConversationLog {
            version: loaded.version + 1,
            messages,
        };

        records::write(self.records.as_ref(), &key, &committed).await?;
        debug!(key = %key, version = committed.version, messages = committed.messages.len(), "Committed conversation log");
        Ok(committed)
    }
}
