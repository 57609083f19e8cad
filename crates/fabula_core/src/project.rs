//! Project-level records persisted by the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File kind of an uploaded source document.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    /// Plain text
    Txt,
    /// PDF document
    Pdf,
    /// Word document
    Docx,
    /// Anything else
    Other,
}

/// Project registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    /// Project identifier (UUID string)
    pub id: String,
    /// Display name
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// The soft canon: the original script text a canon was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRecord {
    /// Original filename
    pub filename: String,
    /// Full extracted text
    pub text: String,
    /// When the script was ingested
    pub created_at: DateTime<Utc>,
}

/// Where a stored image came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageProvenance {
    /// Rasterized from the uploaded source document
    Pdf,
    /// Synthesized by an image generation engine
    Ai,
}

/// One representative key-art image for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroRecord {
    /// Public URL of the stored image
    pub url: String,
    /// Provenance tag
    pub source: ImageProvenance,
    /// Engine that generated the image, when AI-sourced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_id: Option<String>,
}

/// Kinds of canon entities that can get an illustrative image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    /// A character from the canon
    Character,
    /// A location from the canon
    Location,
}

impl EntityKind {
    /// Singular key segment ("character" / "location").
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Character => "character",
            EntityKind::Location => "location",
        }
    }

    /// Plural key segment ("characters" / "locations").
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Character => "characters",
            EntityKind::Location => "locations",
        }
    }
}

/// Persisted record of a generated entity image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Public URL of the stored image
    pub url: String,
    /// Logical engine id the caller requested
    pub engine_id: String,
    /// Owning project
    pub project_id: String,
    /// Canon entity the image illustrates
    pub entity_id: String,
    /// When the image was generated
    pub created_at: DateTime<Utc>,
    /// Provenance tag (always `ai` for entity images)
    pub source: ImageProvenance,
}

/// Counts reported after a successful ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    /// Whitespace-separated word count of the script
    pub word_count: usize,
    /// Number of characters extracted
    pub characters: usize,
    /// Number of locations extracted
    pub locations: usize,
}
