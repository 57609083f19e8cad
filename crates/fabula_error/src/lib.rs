//! Error types for the Fabula canon studio.
//!
//! This crate provides the foundation error types used throughout the Fabula
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fabula_error::{FabulaResult, HttpError};
//!
//! fn fetch_data() -> FabulaResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod conversation;
mod document;
mod engine;
mod error;
mod extraction;
mod http;
mod json;
mod models;
mod storage;
mod studio;

pub use config::ConfigError;
pub use conversation::{ConversationError, ConversationErrorKind};
pub use document::{DocumentError, DocumentErrorKind};
pub use engine::{EngineError, EngineErrorKind};
pub use error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use storage::{StorageError, StorageErrorKind};
pub use studio::{StudioError, StudioErrorKind};
