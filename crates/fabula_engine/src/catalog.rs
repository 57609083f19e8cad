//! The read-only engine catalog and its lookup policies.

use crate::{Capability, EngineDefinition, EngineId, EngineKind, ModelBinding, ProviderId};
use fabula_error::{EngineError, EngineErrorKind};
use std::str::FromStr;

/// A substitution event produced by the leniency fallback policy.
///
/// Emitted when a caller-supplied identifier did not resolve and the
/// capability default was used instead. The orchestrator logs these; tests
/// assert on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFallback {
    /// The identifier the caller asked for
    pub requested: String,
    /// The id actually used
    pub resolved: EngineId,
}

/// Static catalog mapping logical engine ids to concrete provider + model
/// pairs.
///
/// Built once at process start and injected by reference wherever engine
/// resolution happens; pure lookup, no side effects.
///
/// # Examples
///
/// ```
/// use fabula_engine::{Capability, EngineCatalog, EngineId};
///
/// let catalog = EngineCatalog::standard();
/// let def = catalog.resolve(EngineId::Gemini3Preview).unwrap();
/// assert_eq!(def.text().as_ref().unwrap().model().as_str(), "gemini-3-pro-preview");
/// assert_eq!(catalog.default_for(Capability::Image), EngineId::Gemini3Preview);
/// ```
#[derive(Debug, Clone)]
pub struct EngineCatalog {
    engines: Vec<EngineDefinition>,
}

impl EngineCatalog {
    /// The standard catalog shipped with the studio.
    pub fn standard() -> Self {
        let engines = vec![
            EngineDefinition::new(
                EngineId::OpenAiGpt51,
                "OpenAI · GPT-5.1",
                ProviderId::OpenAi,
                EngineKind::Both,
                Some(ModelBinding::new(ProviderId::OpenAi, "gpt-5.1")),
                Some(ModelBinding::new(ProviderId::OpenAi, "gpt-image-1")),
            ),
            EngineDefinition::new(
                EngineId::OpenAiGpt5Mini,
                "OpenAI · GPT-5 mini",
                ProviderId::OpenAi,
                EngineKind::Both,
                Some(ModelBinding::new(ProviderId::OpenAi, "gpt-5-mini")),
                Some(ModelBinding::new(ProviderId::OpenAi, "gpt-image-1")),
            ),
            EngineDefinition::new(
                EngineId::Gemini3Preview,
                "Gemini · 3 Pro Preview",
                ProviderId::Gemini,
                EngineKind::Both,
                Some(ModelBinding::new(ProviderId::Gemini, "gemini-3-pro-preview")),
                Some(ModelBinding::new(
                    ProviderId::Gemini,
                    "gemini-3-pro-image-preview",
                )),
            ),
        ];
        Self { engines }
    }

    /// Build a catalog from explicit definitions (tests, alternate rollouts).
    pub fn from_definitions(engines: Vec<EngineDefinition>) -> Self {
        Self { engines }
    }

    /// All definitions, in catalog order.
    pub fn engines(&self) -> &[EngineDefinition] {
        &self.engines
    }

    /// Resolve a logical id to its definition.
    ///
    /// # Errors
    ///
    /// `UnknownEngine` if the id is not in this catalog (possible with
    /// test catalogs built from a subset of definitions).
    pub fn resolve(&self, id: EngineId) -> Result<&EngineDefinition, EngineError> {
        self.engines
            .iter()
            .find(|e| *e.id() == id)
            .ok_or_else(|| EngineError::new(EngineErrorKind::UnknownEngine(id.as_str().into())))
    }

    /// Resolve a raw string id to its definition.
    ///
    /// Only exact logical ids are accepted here; free-text identifiers go
    /// through [`EngineCatalog::normalize`] first.
    pub fn resolve_str(&self, raw: &str) -> Result<&EngineDefinition, EngineError> {
        let id = EngineId::from_str(raw)
            .map_err(|_| EngineError::new(EngineErrorKind::UnknownEngine(raw.to_string())))?;
        self.resolve(id)
    }

    /// The process-wide default engine for `capability`.
    pub fn default_for(&self, _capability: Capability) -> EngineId {
        EngineId::Gemini3Preview
    }

    /// Map a legacy or free-text identifier to a canonical id.
    ///
    /// Upstream callers pass ad hoc strings: logical ids, provider-native
    /// model names, or historical aliases. This is the single place those
    /// spellings are recognized; everything downstream routes on the
    /// resolved definition's provider tag.
    pub fn normalize(&self, raw: &str) -> Option<EngineId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(id) = EngineId::from_str(trimmed) {
            return Some(id);
        }
        match trimmed {
            "gpt-5.1" => Some(EngineId::OpenAiGpt51),
            "gpt-5-mini" => Some(EngineId::OpenAiGpt5Mini),
            "gpt-image-1" | "openai-image-1" => Some(EngineId::OpenAiGpt51),
            "gemini-3-pro-preview" | "gemini-3-pro-image-preview" => {
                Some(EngineId::Gemini3Preview)
            }
            _ => None,
        }
    }

    /// Leniency fallback policy: resolve `raw`, substituting the capability
    /// default when it does not normalize.
    ///
    /// Unknown identifiers are not an error here because they may originate
    /// from client-supplied, loosely validated strings; the substitution is
    /// reported so callers can log it.
    pub fn resolve_lenient(
        &self,
        raw: &str,
        capability: Capability,
    ) -> (EngineId, Option<EngineFallback>) {
        match self.normalize(raw) {
            Some(id) => (id, None),
            None => {
                let resolved = self.default_for(capability);
                (
                    resolved,
                    Some(EngineFallback {
                        requested: raw.to_string(),
                        resolved,
                    }),
                )
            }
        }
    }
}

impl Default for EngineCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_idempotent() {
        let catalog = EngineCatalog::standard();
        let first = catalog.resolve(EngineId::OpenAiGpt51).unwrap().clone();
        let second = catalog.resolve(EngineId::OpenAiGpt51).unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_str_rejects_unknown() {
        let catalog = EngineCatalog::standard();
        let err = catalog.resolve_str("made-up-engine").unwrap_err();
        assert!(matches!(err.kind, EngineErrorKind::UnknownEngine(_)));
    }

    #[test]
    fn normalize_maps_provider_model_names() {
        let catalog = EngineCatalog::standard();
        assert_eq!(
            catalog.normalize("gemini-3-pro-image-preview"),
            Some(EngineId::Gemini3Preview)
        );
        assert_eq!(catalog.normalize("openai-image-1"), Some(EngineId::OpenAiGpt51));
        assert_eq!(catalog.normalize("openai-gpt-5-mini"), Some(EngineId::OpenAiGpt5Mini));
        assert_eq!(catalog.normalize("  gemini-3-preview  "), Some(EngineId::Gemini3Preview));
        assert_eq!(catalog.normalize("stable-diffusion"), None);
        assert_eq!(catalog.normalize(""), None);
    }

    #[test]
    fn lenient_resolution_reports_substitution() {
        let catalog = EngineCatalog::standard();

        let (id, fallback) = catalog.resolve_lenient("openai-gpt-5.1", Capability::Text);
        assert_eq!(id, EngineId::OpenAiGpt51);
        assert!(fallback.is_none());

        let (id, fallback) = catalog.resolve_lenient("dall-e-9", Capability::Image);
        assert_eq!(id, EngineId::Gemini3Preview);
        let event = fallback.unwrap();
        assert_eq!(event.requested, "dall-e-9");
        assert_eq!(event.resolved, EngineId::Gemini3Preview);
    }

    #[test]
    fn capability_mismatch_surfaces_at_binding() {
        let text_only = EngineDefinition::new(
            EngineId::Gemini3Preview,
            "Gemini · text only",
            ProviderId::Gemini,
            EngineKind::Text,
            Some(ModelBinding::new(ProviderId::Gemini, "gemini-3-pro-preview")),
            None,
        );
        let catalog = EngineCatalog::from_definitions(vec![text_only]);
        let def = catalog.resolve(EngineId::Gemini3Preview).unwrap();
        assert!(def.require_binding(Capability::Text).is_ok());
        let err = def.require_binding(Capability::Image).unwrap_err();
        assert!(matches!(
            err.kind,
            EngineErrorKind::CapabilityNotConfigured { .. }
        ));
    }
}
