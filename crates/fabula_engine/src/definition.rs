//! Engine definitions: the immutable catalog entries.

use crate::{EngineId, ProviderId};
use fabula_error::{EngineError, EngineErrorKind};
use serde::{Deserialize, Serialize};

/// Generation capabilities a caller can request from an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Capability {
    /// Chat / canon extraction / copilot
    Text,
    /// Hero, character, and location images
    Image,
}

impl Capability {
    /// Stable lowercase name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Text => "text",
            Capability::Image => "image",
        }
    }
}

/// Capability flag set of an engine definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EngineKind {
    /// Text generation only
    Text,
    /// Image generation only
    Image,
    /// Both text and image generation
    Both,
}

/// Binding of a capability to a provider-native model identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ModelBinding {
    /// Provider that serves this model
    provider: ProviderId,
    /// Provider-native model identifier
    model: String,
}

impl ModelBinding {
    /// Create a new binding.
    pub fn new(provider: ProviderId, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

/// One catalog entry: a logical engine and its concrete model bindings.
///
/// Immutable, defined at process start, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct EngineDefinition {
    /// Logical id (unique, stable)
    id: EngineId,
    /// Human-readable label
    label: String,
    /// Provider identity
    provider: ProviderId,
    /// Capability flag set
    kind: EngineKind,
    /// Text model binding, when the engine supports text
    text: Option<ModelBinding>,
    /// Image model binding, when the engine supports images
    image: Option<ModelBinding>,
}

impl EngineDefinition {
    /// Create a new definition.
    pub fn new(
        id: EngineId,
        label: impl Into<String>,
        provider: ProviderId,
        kind: EngineKind,
        text: Option<ModelBinding>,
        image: Option<ModelBinding>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            provider,
            kind,
            text,
            image,
        }
    }

    /// The binding for `capability`, if the engine supports it.
    pub fn binding(&self, capability: Capability) -> Option<&ModelBinding> {
        match capability {
            Capability::Text => self.text.as_ref(),
            Capability::Image => self.image.as_ref(),
        }
    }

    /// The binding for `capability`, or `CapabilityNotConfigured`.
    ///
    /// Capability mismatch is surfaced here, at the caller's request site,
    /// not inside the registry lookup.
    pub fn require_binding(&self, capability: Capability) -> Result<&ModelBinding, EngineError> {
        self.binding(capability).ok_or_else(|| {
            EngineError::new(EngineErrorKind::CapabilityNotConfigured {
                engine: self.id.as_str().to_string(),
                capability: capability.as_str(),
            })
        })
    }
}
