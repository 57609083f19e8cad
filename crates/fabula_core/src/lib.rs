//! Core data types for the Fabula canon studio.
//!
//! This crate provides the foundation data types shared across the Fabula
//! workspace: the canonical chat message model, the structured canon
//! document, and the project-level records the orchestrator persists.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod canon;
mod conversation;
mod image;
mod message;
mod mode;
mod project;
mod role;
mod telemetry;

pub use canon::{
    ArtStyleData, CanonDocument, CharacterCard, CharacterDetail, CharacterSet, LocationCard,
    LocationDetail, LocationSet, PlotData, Relationship, WorldRulesData,
};
pub use conversation::ConversationLog;
pub use image::{GeneratedImage, ImageSize};
pub use message::ChatMessage;
pub use mode::ChatMode;
pub use project::{
    EntityKind, FileKind, HeroRecord, ImageProvenance, ImageRecord, IngestSummary, ProjectMeta,
    ScriptRecord,
};
pub use role::Role;
pub use telemetry::init_telemetry;
