//! Provider adapters for the Fabula canon studio.
//!
//! One adapter per backend provider. Each translates the canonical message
//! model into that provider's wire format, performs the call, and parses the
//! provider's response shape into a canonical result or a typed failure.
//!
//! Adapters are selected by the explicit provider tag on a resolved engine
//! definition (see [`AdapterSet`]); nothing here sniffs model-name strings.
//! Every call is best-effort, once: no retry, but an explicit per-client
//! request timeout so a hung upstream fails the request instead of blocking
//! it indefinitely.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod client_config;
mod gemini;
mod openai;

pub use adapter::AdapterSet;
pub use client_config::ClientConfig;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
