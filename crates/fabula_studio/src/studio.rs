//! The generation orchestrator.

use crate::conversation::ConversationStore;
use crate::{composer::PromptComposer, extraction, keys, prompts, records};
use chrono::Utc;
use fabula_core::{
    CanonDocument, ChatMessage, ChatMode, EntityKind, FileKind, HeroRecord, ImageProvenance,
    ImageRecord, ImageSize, IngestSummary, ProjectMeta, ScriptRecord,
};
use fabula_engine::{Capability, EngineCatalog, EngineId, PartialEngineConfig, ProjectEngineConfig};
use fabula_error::{FabulaResult, StudioError, StudioErrorKind};
use fabula_interface::{
    DocumentExtractor, DriverSet, ObjectStore, PageRasterizer, RecordStore, UrlFetcher,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Character ceiling for the script text sent to canon extraction.
const EXTRACTION_SCRIPT_MAX_CHARS: usize = 80_000;

/// Result of a successful chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    /// The assistant reply
    pub reply: String,
    /// The engine that served the turn
    pub engine_id: EngineId,
    /// The full persisted history after the turn
    pub history: Vec<ChatMessage>,
}

/// Result of a successful project ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// Newly minted project identifier
    pub project_id: String,
    /// Project display name
    pub project_name: String,
    /// Word/entity counts
    pub summary: IngestSummary,
    /// The extracted canon
    pub canon: CanonDocument,
    /// Hero image record, when either pipeline produced one
    pub hero: Option<HeroRecord>,
    /// The fully resolved engine configuration
    pub engines: ProjectEngineConfig,
    /// The persisted script record
    pub script: ScriptRecord,
}

/// Top-level entry points over the generation components.
///
/// Owns nothing global: the engine catalog, driver set, stores, and
/// collaborators are all injected, so tests run against in-memory backends
/// and mock drivers.
pub struct Studio {
    catalog: EngineCatalog,
    drivers: Arc<dyn DriverSet>,
    records: Arc<dyn RecordStore>,
    objects: Arc<dyn ObjectStore>,
    extractor: Arc<dyn DocumentExtractor>,
    rasterizer: Option<(Arc<dyn PageRasterizer>, Arc<dyn UrlFetcher>)>,
    conversations: ConversationStore,
}

impl Studio {
    /// Create a studio over the given components.
    pub fn new(
        catalog: EngineCatalog,
        drivers: Arc<dyn DriverSet>,
        records: Arc<dyn RecordStore>,
        objects: Arc<dyn ObjectStore>,
        extractor: Arc<dyn DocumentExtractor>,
    ) -> Self {
        let conversations = ConversationStore::new(Arc::clone(&records));
        Self {
            catalog,
            drivers,
            records,
            objects,
            extractor,
            rasterizer: None,
            conversations,
        }
    }

    /// Enable the PDF-page hero pipeline.
    ///
    /// Without a rasterizer, `generate_hero` goes straight to AI generation
    /// for every source kind.
    pub fn with_rasterizer(
        mut self,
        rasterizer: Arc<dyn PageRasterizer>,
        fetcher: Arc<dyn UrlFetcher>,
    ) -> Self {
        self.rasterizer = Some((rasterizer, fetcher));
        self
    }

    /// The engine catalog this studio resolves against.
    pub fn catalog(&self) -> &EngineCatalog {
        &self.catalog
    }

    // ---------- canon extraction ----------

    /// Extract a structured canon from raw script text.
    ///
    /// The engine must have text capability. Script input is truncated to a
    /// fixed ceiling before the call; the provider reply goes through fence
    /// stripping, JSON parsing, and shape validation.
    #[instrument(skip_all, fields(engine = %engine_id, script_chars = script_text.len()))]
    pub async fn extract_canon(
        &self,
        script_text: &str,
        engine_id: EngineId,
    ) -> FabulaResult<CanonDocument> {
        let definition = self.catalog.resolve(engine_id)?;
        let binding = definition.require_binding(Capability::Text)?;

        let excerpt = truncate_chars(script_text, EXTRACTION_SCRIPT_MAX_CHARS);
        let messages = vec![
            ChatMessage::system(prompts::CANON_EXTRACTION_PROMPT),
            ChatMessage::user(excerpt),
        ];

        debug!("Requesting canon extraction");
        let reply = self
            .drivers
            .text_driver(*binding.provider())
            .send_chat(binding.model(), &messages)
            .await?;

        let canon = extraction::extract_canon_json(&reply)?;
        info!(
            characters = canon.characters.list.len(),
            locations = canon.locations.list.len(),
            "Extracted canon"
        );
        Ok(canon)
    }

    // ---------- chat ----------

    /// Run one chat turn for `(project_id, mode)`.
    ///
    /// Loads the stored canon, script, and engine configuration, composes
    /// the bounded prompt, calls the text adapter, and appends the turn to
    /// the full persisted log. On adapter failure the log is untouched.
    #[instrument(skip_all, fields(project = %project_id, mode = %mode, new_count = new_messages.len()))]
    pub async fn chat(
        &self,
        project_id: &str,
        mode: ChatMode,
        new_messages: Vec<ChatMessage>,
    ) -> FabulaResult<ChatOutcome> {
        if new_messages.is_empty() {
            return Err(StudioError::new(StudioErrorKind::EmptyTurn).into());
        }

        let engines = self
            .load_engines(project_id)
            .await?
            .ok_or_else(|| {
                StudioError::new(StudioErrorKind::EngineConfigNotFound(project_id.to_string()))
            })?;
        let canon = self
            .load_canon(project_id)
            .await?
            .ok_or_else(|| {
                StudioError::new(StudioErrorKind::CanonNotFound(project_id.to_string()))
            })?;
        let script = self.load_script(project_id).await?;

        let engine_id = engines.chat_engine(mode);
        let definition = self.catalog.resolve(engine_id)?;
        let binding = definition.require_binding(Capability::Text)?;

        let log = self.conversations.load(project_id, mode).await?;

        let composer = PromptComposer::new(&canon, script.as_ref());
        let outbound = composer.compose(&log, &new_messages)?;

        debug!(outbound = outbound.len(), "Sending chat turn");
        let reply = self
            .drivers
            .text_driver(*binding.provider())
            .send_chat(binding.model(), &outbound)
            .await?;

        let mut appended = new_messages;
        appended.push(ChatMessage::assistant(reply.clone()));
        let committed = self
            .conversations
            .commit(project_id, mode, &log, appended)
            .await?;

        Ok(ChatOutcome {
            reply,
            engine_id,
            history: committed.messages,
        })
    }

    /// The full stored history for `(project_id, mode)`.
    ///
    /// An absent log reads as an empty sequence.
    pub async fn list_history(
        &self,
        project_id: &str,
        mode: ChatMode,
    ) -> FabulaResult<Vec<ChatMessage>> {
        Ok(self.conversations.load(project_id, mode).await?.messages)
    }

    // ---------- images ----------

    /// Produce one representative key-art image for a project.
    ///
    /// Fallback chain: a PDF source is rasterized through the external
    /// collaborator first; on any failure there the error is logged and the
    /// AI pipeline runs instead. Both failing yields `None`, never a hard
    /// failure for the encompassing ingestion.
    #[instrument(skip_all, fields(project = %project_id, file_kind = %file_kind))]
    pub async fn generate_hero(
        &self,
        canon: &CanonDocument,
        project_id: &str,
        file_kind: FileKind,
        file_bytes: &[u8],
        image_engine: &str,
    ) -> Option<HeroRecord> {
        if file_kind == FileKind::Pdf {
            match self.pdf_hero(project_id, file_bytes).await {
                Ok(Some(record)) => return Some(record),
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "PDF hero pipeline failed; falling back to AI generation");
                }
            }
        }

        match self.ai_hero(canon, project_id, image_engine).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "AI hero generation failed; project proceeds without a hero");
                None
            }
        }
    }

    /// Rasterize page 1 of the uploaded PDF into the object store.
    ///
    /// Returns `Ok(None)` when no rasterizer is configured.
    async fn pdf_hero(
        &self,
        project_id: &str,
        file_bytes: &[u8],
    ) -> FabulaResult<Option<HeroRecord>> {
        let Some((rasterizer, fetcher)) = &self.rasterizer else {
            debug!("No rasterizer configured; skipping PDF hero");
            return Ok(None);
        };

        let ts = Utc::now().timestamp_millis();

        // The rasterization service needs the PDF at a public URL first.
        let pdf_url = self
            .objects
            .put(
                &keys::source_pdf_object(project_id, ts),
                file_bytes,
                "application/pdf",
            )
            .await?;

        let image_url = rasterizer.rasterize(&pdf_url, "1").await?;
        let image_bytes = fetcher.fetch(&image_url).await?;

        let url = self
            .objects
            .put(
                &keys::pdf_hero_object(project_id, ts),
                &image_bytes,
                "image/png",
            )
            .await?;

        info!(url = %url, "Stored PDF-derived hero image");
        Ok(Some(HeroRecord {
            url,
            source: ImageProvenance::Pdf,
            engine_id: None,
        }))
    }

    /// Synthesize a hero image from the canon's title, aesthetic, and
    /// palette.
    async fn ai_hero(
        &self,
        canon: &CanonDocument,
        project_id: &str,
        image_engine: &str,
    ) -> FabulaResult<HeroRecord> {
        let engine_id = self.resolve_image_engine(image_engine);
        let definition = self.catalog.resolve(engine_id)?;
        let binding = definition.require_binding(Capability::Image)?;

        let prompt = prompts::hero_prompt(canon);
        let image = self
            .drivers
            .image_driver(*binding.provider())
            .generate_image(binding.model(), &prompt, ImageSize::Square1024)
            .await?;

        let ts = Utc::now().timestamp_millis();
        let url = self
            .objects
            .put(
                &keys::ai_hero_object(project_id, ts),
                &image.data,
                &image.mime_type,
            )
            .await?;

        info!(url = %url, engine = %engine_id, "Stored AI-generated hero image");
        Ok(HeroRecord {
            url,
            source: ImageProvenance::Ai,
            engine_id: Some(engine_id.as_str().to_string()),
        })
    }

    /// Generate and persist an illustrative image for a canon entity.
    ///
    /// Characters get portrait framing, locations an establishing shot;
    /// requests are a fixed 1024x1024.
    #[instrument(skip_all, fields(project = %project_id, kind = %kind, entity = %entity_id))]
    pub async fn generate_entity_image(
        &self,
        project_id: &str,
        kind: EntityKind,
        entity_id: &str,
        name: &str,
        description: &str,
        image_engine: &str,
    ) -> FabulaResult<ImageRecord> {
        let engine_id = self.resolve_image_engine(image_engine);
        let definition = self.catalog.resolve(engine_id)?;
        let binding = definition.require_binding(Capability::Image)?;

        let prompt = match kind {
            EntityKind::Character => prompts::character_prompt(name, description),
            EntityKind::Location => prompts::location_prompt(name, description),
        };

        let image = self
            .drivers
            .image_driver(*binding.provider())
            .generate_image(binding.model(), &prompt, ImageSize::Square1024)
            .await?;

        let now = Utc::now();
        let url = self
            .objects
            .put(
                &keys::entity_object(project_id, kind, entity_id, now.timestamp_millis()),
                &image.data,
                &image.mime_type,
            )
            .await?;

        let record = ImageRecord {
            url: url.clone(),
            engine_id: engine_id.as_str().to_string(),
            project_id: project_id.to_string(),
            entity_id: entity_id.to_string(),
            created_at: now,
            source: ImageProvenance::Ai,
        };

        records::write(
            self.records.as_ref(),
            &keys::entity_image(project_id, kind, entity_id),
            &record,
        )
        .await?;
        self.records
            .hash_set(
                &keys::entity_image_map(project_id, kind),
                HashMap::from([(entity_id.to_string(), url)]),
            )
            .await?;

        info!(url = %record.url, "Stored entity image");
        Ok(record)
    }

    /// Resolve a caller-supplied image engine identifier leniently, logging
    /// any substitution.
    fn resolve_image_engine(&self, raw: &str) -> EngineId {
        let (engine_id, fallback) = self.catalog.resolve_lenient(raw, Capability::Image);
        if let Some(event) = fallback {
            warn!(
                requested = %event.requested,
                resolved = %event.resolved,
                "Unknown image engine id; substituting default"
            );
        }
        engine_id
    }

    // ---------- ingestion ----------

    /// Ingest a narrative script: extract text, build the canon, attempt a
    /// hero image, and persist every project record.
    ///
    /// A missing hero is an acceptable end state; everything else failing
    /// fails the ingestion.
    #[instrument(skip_all, fields(name = %project_name, filename = %filename))]
    pub async fn ingest(
        &self,
        project_name: &str,
        filename: &str,
        file_bytes: &[u8],
        engines: PartialEngineConfig,
    ) -> FabulaResult<IngestOutcome> {
        let extracted = self.extractor.extract(file_bytes, filename).await?;

        let project_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let word_count = extracted.text.split_whitespace().count();

        let config = engines.ensure(self.catalog.default_for(Capability::Text));

        let canon = self
            .extract_canon(&extracted.text, config.canon_engine_id)
            .await?;

        let hero = self
            .generate_hero(
                &canon,
                &project_id,
                extracted.file_kind,
                file_bytes,
                config.image_engine_id.as_str(),
            )
            .await;

        let script = ScriptRecord {
            filename: filename.to_string(),
            text: extracted.text,
            created_at: now,
        };
        let meta = ProjectMeta {
            id: project_id.clone(),
            name: if project_name.trim().is_empty() {
                filename.to_string()
            } else {
                project_name.trim().to_string()
            },
            created_at: now,
        };

        records::write(self.records.as_ref(), &keys::canon(&project_id), &canon).await?;
        records::write(self.records.as_ref(), &keys::script(&project_id), &script).await?;
        records::write(self.records.as_ref(), &keys::engines(&project_id), &config).await?;

        let mut projects = self.list_projects().await?;
        projects.push(meta.clone());
        records::write(self.records.as_ref(), &keys::projects(), &projects).await?;

        if let Some(hero) = &hero {
            records::write(self.records.as_ref(), &keys::hero_image(&project_id), hero).await?;
        }

        let summary = IngestSummary {
            word_count,
            characters: canon.characters.list.len(),
            locations: canon.locations.list.len(),
        };

        info!(
            project = %project_id,
            words = summary.word_count,
            characters = summary.characters,
            locations = summary.locations,
            hero = hero.is_some(),
            "Ingested project"
        );

        Ok(IngestOutcome {
            project_id,
            project_name: meta.name,
            summary,
            canon,
            hero,
            engines: config,
            script,
        })
    }

    // ---------- project records ----------

    /// Fill unset engine slots from the global slot and persist the result.
    pub async fn save_engines(
        &self,
        project_id: &str,
        partial: PartialEngineConfig,
    ) -> FabulaResult<ProjectEngineConfig> {
        let config = partial.ensure(self.catalog.default_for(Capability::Text));
        records::write(self.records.as_ref(), &keys::engines(project_id), &config).await?;
        Ok(config)
    }

    /// The stored engine configuration for a project, if any.
    pub async fn load_engines(
        &self,
        project_id: &str,
    ) -> FabulaResult<Option<ProjectEngineConfig>> {
        Ok(records::read(self.records.as_ref(), &keys::engines(project_id)).await?)
    }

    /// The stored canon for a project, if any.
    pub async fn load_canon(&self, project_id: &str) -> FabulaResult<Option<CanonDocument>> {
        Ok(records::read(self.records.as_ref(), &keys::canon(project_id)).await?)
    }

    /// Replace a project's canon snapshot wholesale (re-extraction).
    pub async fn save_canon(
        &self,
        project_id: &str,
        canon: &CanonDocument,
    ) -> FabulaResult<()> {
        records::write(self.records.as_ref(), &keys::canon(project_id), canon).await?;
        Ok(())
    }

    /// The stored script record for a project, if any.
    pub async fn load_script(&self, project_id: &str) -> FabulaResult<Option<ScriptRecord>> {
        Ok(records::read(self.records.as_ref(), &keys::script(project_id)).await?)
    }

    /// The stored hero record for a project, if any.
    pub async fn load_hero(&self, project_id: &str) -> FabulaResult<Option<HeroRecord>> {
        Ok(records::read(self.records.as_ref(), &keys::hero_image(project_id)).await?)
    }

    /// All registered projects, in ingestion order.
    pub async fn list_projects(&self) -> FabulaResult<Vec<ProjectMeta>> {
        Ok(
            records::read::<Vec<ProjectMeta>>(self.records.as_ref(), &keys::projects())
                .await?
                .unwrap_or_default(),
        )
    }

    /// Delete every record belonging to a project.
    #[instrument(skip_all, fields(project = %project_id))]
    pub async fn delete_project(&self, project_id: &str) -> FabulaResult<()> {
        for kind in [EntityKind::Character, EntityKind::Location] {
            let map_key = keys::entity_image_map(project_id, kind);
            for entity_id in self.records.hash_get(&map_key).await?.into_keys() {
                self.records
                    .del(&keys::entity_image(project_id, kind, &entity_id))
                    .await?;
            }
            self.records.del(&map_key).await?;
        }

        self.records.del(&keys::canon(project_id)).await?;
        self.records.del(&keys::script(project_id)).await?;
        self.records.del(&keys::engines(project_id)).await?;
        self.records.del(&keys::hero_image(project_id)).await?;
        self.records
            .del(&keys::chat(project_id, ChatMode::Canon))
            .await?;
        self.records
            .del(&keys::chat(project_id, ChatMode::Copilot))
            .await?;

        let projects: Vec<ProjectMeta> = self
            .list_projects()
            .await?
            .into_iter()
            .filter(|p| p.id != project_id)
            .collect();
        records::write(self.records.as_ref(), &keys::projects(), &projects).await?;

        info!("Deleted project records");
        Ok(())
    }
}

/// The first `max` characters of `text`, cut at a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}
