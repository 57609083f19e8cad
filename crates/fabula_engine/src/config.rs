//! Per-project engine configuration.

use crate::EngineId;
use fabula_core::ChatMode;
use serde::{Deserialize, Serialize};

/// Fully resolved per-project engine selection.
///
/// Created once when a project is ingested. Slots are filled from the
/// global slot at [`PartialEngineConfig::ensure`] time, never retroactively:
/// a later change to the global slot does not rewrite an explicitly-set one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEngineConfig {
    /// The global choice the user made
    pub global_engine_id: EngineId,
    /// Canon (structured extraction) engine
    pub canon_engine_id: EngineId,
    /// Copilot chat engine
    pub copilot_engine_id: EngineId,
    /// Image generation engine (hero, characters, locations)
    pub image_engine_id: EngineId,
}

impl ProjectEngineConfig {
    /// The chat engine slot for `mode`.
    pub fn chat_engine(&self, mode: ChatMode) -> EngineId {
        match mode {
            ChatMode::Canon => self.canon_engine_id,
            ChatMode::Copilot => self.copilot_engine_id,
        }
    }
}

/// Partially specified engine selection, as read from storage or a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialEngineConfig {
    /// The global choice, if made
    #[serde(default)]
    pub global_engine_id: Option<EngineId>,
    /// Canon engine, if explicitly set
    #[serde(default)]
    pub canon_engine_id: Option<EngineId>,
    /// Copilot engine, if explicitly set
    #[serde(default)]
    pub copilot_engine_id: Option<EngineId>,
    /// Image engine, if explicitly set
    #[serde(default)]
    pub image_engine_id: Option<EngineId>,
}

impl PartialEngineConfig {
    /// Fill unset slots from the global slot, defaulting the global slot to
    /// `fallback` when absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_engine::{EngineId, PartialEngineConfig};
    ///
    /// let partial = PartialEngineConfig {
    ///     global_engine_id: Some(EngineId::OpenAiGpt51),
    ///     canon_engine_id: Some(EngineId::Gemini3Preview),
    ///     ..Default::default()
    /// };
    /// let config = partial.ensure(EngineId::Gemini3Preview);
    /// assert_eq!(config.canon_engine_id, EngineId::Gemini3Preview);
    /// assert_eq!(config.copilot_engine_id, EngineId::OpenAiGpt51);
    /// assert_eq!(config.image_engine_id, EngineId::OpenAiGpt51);
    /// ```
    pub fn ensure(&self, fallback: EngineId) -> ProjectEngineConfig {
        let global = self.global_engine_id.unwrap_or(fallback);
        ProjectEngineConfig {
            global_engine_id: global,
            canon_engine_id: self.canon_engine_id.unwrap_or(global),
            copilot_engine_id: self.copilot_engine_id.unwrap_or(global),
            image_engine_id: self.image_engine_id.unwrap_or(global),
        }
    }
}
