//! Trait definitions for the Fabula canon studio.
//!
//! Two families of seams live here:
//! - [`TextDriver`] and [`ImageDriver`], implemented by provider adapters;
//! - the external-collaborator contracts ([`RecordStore`], [`ObjectStore`],
//!   [`DocumentExtractor`], [`PageRasterizer`]) the orchestrator consumes
//!   but does not implement.
//!
//! Programming to these traits keeps the orchestrator independent of any
//! concrete provider or storage backend and lets tests swap in mocks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collaborators;
mod drivers;

pub use collaborators::{
    DocumentExtractor, ExtractedScript, ObjectStore, PageRasterizer, RecordStore, UrlFetcher,
};
pub use drivers::{DriverSet, ImageDriver, TextDriver};
