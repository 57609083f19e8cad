//! Google Gemini chat and image adapter.

mod client;
mod dto;

pub use client::GeminiClient;
