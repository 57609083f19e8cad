//! Contracts for external collaborators.
//!
//! These services are consumed through narrow request/response interfaces
//! and are not redesigned here: the durable record store, the binary object
//! store, the document-text extractor, and the page-rasterization service.

use async_trait::async_trait;
use fabula_core::FileKind;
use fabula_error::{DocumentError, FabulaResult, StorageError};
use std::collections::HashMap;

/// Durable key-value record store.
///
/// Keys are hierarchical strings scoped by project id and data kind; values
/// are JSON. Single-key operations are atomic; no transaction spans keys.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get the value stored at `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    /// Set the value at `key`, replacing any previous value.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError>;

    /// Delete the value at `key`. Deleting an absent key is not an error.
    async fn del(&self, key: &str) -> Result<(), StorageError>;

    /// Get all fields of the hash stored at `key` (empty if absent).
    async fn hash_get(&self, key: &str) -> Result<HashMap<String, String>, StorageError>;

    /// Merge `fields` into the hash stored at `key`, creating it if absent.
    async fn hash_set(
        &self,
        key: &str,
        fields: HashMap<String, String>,
    ) -> Result<(), StorageError>;
}

/// Binary object store returning publicly reachable URLs.
///
/// Puts are idempotent per distinct key; callers mint unique
/// (timestamp-suffixed) keys to avoid overwriting.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URL.
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Result of extracting text from an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedScript {
    /// The extracted plain text
    pub text: String,
    /// Recognized file kind of the source
    pub file_kind: FileKind,
}

/// Document-text extractor: behaves as a pure function from file bytes to
/// plain text.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract text from `bytes`, using `filename` to determine the format.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFormat` for unrecognized extensions
    /// - `EmptyContent` if extracted text is empty or whitespace-only
    async fn extract(&self, bytes: &[u8], filename: &str)
    -> Result<ExtractedScript, DocumentError>;
}

/// Third-party page-rasterization service (PDF page to PNG URL).
///
/// The PDF must be reachable at a public URL first. The service returns
/// either a direct URL or a list of URLs, of which the first is taken.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// Rasterize `pages` (e.g. "1") of the PDF at `pdf_url`, returning the
    /// URL of the first resulting image.
    async fn rasterize(&self, pdf_url: &str, pages: &str) -> FabulaResult<String>;
}

/// Fetches the bytes behind a public URL.
///
/// Used to pull a rasterized page image back into our own object store so
/// the hero URL outlives the rasterization service's retention window.
#[async_trait]
pub trait UrlFetcher: Send + Sync {
    /// Download the resource at `url`.
    async fn fetch(&self, url: &str) -> FabulaResult<Vec<u8>>;
}
