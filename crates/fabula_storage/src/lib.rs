//! Storage backends and external media collaborators for Fabula.
//!
//! Implementations of the collaborator traits defined in
//! `fabula_interface`:
//!
//! - [`MemoryRecordStore`] - in-process record store for tests and
//!   single-process development
//! - [`FileSystemObjectStore`] - key-addressed binary object store on the
//!   local filesystem, returning base-URL-joined public URLs
//! - [`MemoryObjectStore`] - in-process object store for tests
//! - [`PlainTextExtractor`] - document-text extractor for plain-text
//!   uploads; richer formats are served by external extractor services
//!   behind the same trait
//! - [`PdfCoRasterizer`] - client for the third-party PDF-page-to-PNG
//!   rasterization service
//! - [`HttpUrlFetcher`] - pulls a remote resource (e.g. a rasterized page)
//!   back into our own object store

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extractor;
mod fetcher;
mod object_filesystem;
mod object_memory;
mod rasterizer;
mod record_memory;

pub use extractor::PlainTextExtractor;
pub use fetcher::HttpUrlFetcher;
pub use object_filesystem::FileSystemObjectStore;
pub use object_memory::MemoryObjectStore;
pub use rasterizer::PdfCoRasterizer;
pub use record_memory::MemoryRecordStore;
