//! Prompt composition for chat turns.

use crate::prompts;
use fabula_core::{CanonDocument, ChatMessage, ConversationLog, Role, ScriptRecord};
use fabula_error::FabulaResult;

/// Cap on how many persisted messages are sent per call.
///
/// The full log is still persisted; only the outbound prompt is bounded.
pub const MAX_HISTORY_MESSAGES: usize = 40;

/// Character ceiling for the script excerpt in the soft-context message.
pub const SCRIPT_EXCERPT_MAX_CHARS: usize = 20_000;

/// Marker appended when the script excerpt was truncated.
pub const SCRIPT_TRUNCATION_MARKER: &str = "\n\n[... script truncated for length ...]";

/// Builds the ordered system/context message sequence for a chat turn.
///
/// Output order: canon system message, optional soft-context system message,
/// sanitized history suffix, sanitized new-turn messages. Inputs are never
/// mutated.
pub struct PromptComposer<'a> {
    canon: &'a CanonDocument,
    script: Option<&'a ScriptRecord>,
}

impl<'a> PromptComposer<'a> {
    /// Create a composer for the given canon and optional source script.
    pub fn new(canon: &'a CanonDocument, script: Option<&'a ScriptRecord>) -> Self {
        Self { canon, script }
    }

    /// Build the outbound message sequence.
    pub fn compose(
        &self,
        log: &ConversationLog,
        new_messages: &[ChatMessage],
    ) -> FabulaResult<Vec<ChatMessage>> {
        let mut messages = Vec::new();

        messages.push(ChatMessage::system(prompts::canon_system_prompt(
            self.canon,
        )?));

        if let Some(script) = self.script {
            if !script.text.trim().is_empty() {
                let excerpt = excerpt_of(&script.text);
                messages.push(ChatMessage::system(prompts::script_context_prompt(
                    script, &excerpt,
                )));
            }
        }

        // Stored history may predate the current sanitization rules; drop
        // anything that is not a well-formed user/assistant entry.
        for m in log.recent(MAX_HISTORY_MESSAGES) {
            if m.content.is_empty() {
                continue;
            }
            if !matches!(m.role, Role::User | Role::Assistant) {
                continue;
            }
            messages.push(m.clone());
        }

        for m in new_messages {
            if m.content.is_empty() {
                continue;
            }
            messages.push(m.clone());
        }

        Ok(messages)
    }
}

/// The first [`SCRIPT_EXCERPT_MAX_CHARS`] characters of `text`, with the
/// truncation marker appended when anything was cut.
fn excerpt_of(text: &str) -> String {
    match text.char_indices().nth(SCRIPT_EXCERPT_MAX_CHARS) {
        Some((byte_offset, _)) => {
            let mut excerpt = text[..byte_offset].to_string();
            excerpt.push_str(SCRIPT_TRUNCATION_MARKER);
            excerpt
        }
        None => text.to_string(),
    }
}
