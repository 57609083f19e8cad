//! Fabula - multi-provider generation orchestration for narrative canon
//! studios.
//!
//! A user submits a narrative script and receives a structured canon
//! document (characters, locations, plot, art style, world rules),
//! illustrative images, and a persistent conversational assistant scoped to
//! that canon. Fabula is the orchestration layer underneath: it resolves
//! which backend text/image engine serves each request, builds
//! provider-specific payloads from one canonical message model, normalizes
//! heterogeneous responses, extracts structured data from free-form model
//! output, and maintains bounded conversation context across turns in two
//! coexisting modes (strict canon vs. loose copilot).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fabula::{
//!     AdapterSet, ClientConfig, EngineCatalog, PartialEngineConfig,
//!     PlainTextExtractor, Studio,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> fabula::FabulaResult<()> {
//!     let config = ClientConfig::default();
//!     let studio = Studio::new(
//!         EngineCatalog::standard(),
//!         Arc::new(AdapterSet::from_env(&config)?),
//!         Arc::new(my_record_store()),
//!         Arc::new(my_object_store()),
//!         Arc::new(PlainTextExtractor::new()),
//!     );
//!
//!     let outcome = studio
//!         .ingest("Tide Road", "tide.txt", &script_bytes, PartialEngineConfig::default())
//!         .await?;
//!     println!("canon title: {}", outcome.canon.plot.title);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Fabula is organized as a workspace with focused crates:
//!
//! - `fabula_core` - canonical data types (messages, canon document, records)
//! - `fabula_error` - error types
//! - `fabula_interface` - driver and collaborator traits
//! - `fabula_engine` - engine catalog and per-project configuration
//! - `fabula_models` - provider adapters (OpenAI, Gemini)
//! - `fabula_storage` - record/object store backends and media collaborators
//! - `fabula_studio` - prompt composition, extraction, conversation context,
//!   and the orchestrator
//!
//! This crate re-exports the public surface for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use fabula_core::{
    ArtStyleData, CanonDocument, CharacterCard, CharacterDetail, CharacterSet, ChatMessage,
    ChatMode, ConversationLog, EntityKind, FileKind, GeneratedImage, HeroRecord, ImageProvenance,
    ImageRecord, ImageSize, IngestSummary, LocationCard, LocationDetail, LocationSet, PlotData,
    ProjectMeta, Relationship, Role, ScriptRecord, WorldRulesData, init_telemetry,
};
pub use fabula_engine::{
    Capability, EngineCatalog, EngineDefinition, EngineFallback, EngineId, EngineKind,
    ModelBinding, PartialEngineConfig, ProjectEngineConfig, ProviderId,
};
pub use fabula_error::{
    ConfigError, ConversationError, ConversationErrorKind, DocumentError, DocumentErrorKind,
    EngineError, EngineErrorKind, ExtractionError, ExtractionErrorKind, FabulaError,
    FabulaErrorKind, FabulaResult, HttpError, JsonError, ModelsError, ModelsErrorKind,
    ModelsResult, StorageError, StorageErrorKind, StudioError, StudioErrorKind,
};
pub use fabula_interface::{
    DocumentExtractor, DriverSet, ExtractedScript, ImageDriver, ObjectStore, PageRasterizer,
    RecordStore, TextDriver, UrlFetcher,
};
pub use fabula_models::{AdapterSet, ClientConfig, GeminiClient, OpenAiClient};
pub use fabula_storage::{
    FileSystemObjectStore, HttpUrlFetcher, MemoryObjectStore, MemoryRecordStore, PdfCoRasterizer,
    PlainTextExtractor,
};
pub use fabula_studio::{
    ChatOutcome, ConversationStore, IngestOutcome, PromptComposer, Studio, extract_canon_json,
    strip_json_fence,
};
