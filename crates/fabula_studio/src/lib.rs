//! Generation orchestration for the Fabula canon studio.
//!
//! This crate sequences the other components: it resolves engines through
//! the catalog, composes prompts from canon data and conversation history,
//! calls provider adapters, extracts structured canon documents from raw
//! model output, and maintains the bounded, ordered conversation context.
//!
//! The top-level entry points live on [`Studio`]: `ingest`,
//! `extract_canon`, `chat`, `list_history`, `generate_hero`, and
//! `generate_entity_image`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod composer;
mod conversation;
mod extraction;
mod keys;
mod prompts;
mod records;
mod studio;

pub use composer::{
    MAX_HISTORY_MESSAGES, PromptComposer, SCRIPT_EXCERPT_MAX_CHARS, SCRIPT_TRUNCATION_MARKER,
};
pub use conversation::ConversationStore;
pub use extraction::{extract_canon_json, strip_json_fence};
pub use studio::{ChatOutcome, IngestOutcome, Studio};
