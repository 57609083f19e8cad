//! Key schemes for the record store and the object store.
//!
//! Record keys are hierarchical strings scoped by project id and data kind.
//! Object keys are timestamp-suffixed so a put never overwrites a live
//! object.

use fabula_core::{ChatMode, EntityKind};

/// Record key of the project registry.
pub(crate) fn projects() -> String {
    "projects".to_string()
}

/// Record key of a project's canon document.
pub(crate) fn canon(project_id: &str) -> String {
    format!("project:{project_id}:canon")
}

/// Record key of a project's script record (soft canon).
pub(crate) fn script(project_id: &str) -> String {
    format!("project:{project_id}:script")
}

/// Record key of a project's engine configuration.
pub(crate) fn engines(project_id: &str) -> String {
    format!("project:{project_id}:engines")
}

/// Record key of a project's conversation log for `mode`.
pub(crate) fn chat(project_id: &str, mode: ChatMode) -> String {
    format!("project:{project_id}:chat:{}", mode.as_str())
}

/// Record key of a project's hero image record.
pub(crate) fn hero_image(project_id: &str) -> String {
    format!("project:{project_id}:images:hero")
}

/// Record key of one entity's image record.
pub(crate) fn entity_image(project_id: &str, kind: EntityKind, entity_id: &str) -> String {
    format!("project:{project_id}:images:{}:{entity_id}", kind.as_str())
}

/// Record key of the per-project entity-id to url hash map.
pub(crate) fn entity_image_map(project_id: &str, kind: EntityKind) -> String {
    format!("project:{project_id}:images:{}", kind.plural())
}

/// Object key for the uploaded source PDF.
pub(crate) fn source_pdf_object(project_id: &str, ts_millis: i64) -> String {
    format!("projects/{project_id}/source/pdf-{ts_millis}.pdf")
}

/// Object key for a hero image rasterized from the source document.
pub(crate) fn pdf_hero_object(project_id: &str, ts_millis: i64) -> String {
    format!("projects/{project_id}/hero/pdf-hero-{ts_millis}.png")
}

/// Object key for an AI-generated hero image.
pub(crate) fn ai_hero_object(project_id: &str, ts_millis: i64) -> String {
    format!("projects/{project_id}/hero/ai-hero-{ts_millis}.png")
}

/// Object key for an entity image.
pub(crate) fn entity_object(
    project_id: &str,
    kind: EntityKind,
    entity_id: &str,
    ts_millis: i64,
) -> String {
    format!(
        "projects/{project_id}/{}/{entity_id}-{ts_millis}.png",
        kind.plural()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keys_are_scoped_by_project_and_kind() {
        assert_eq!(canon("p1"), "project:p1:canon");
        assert_eq!(chat("p1", ChatMode::Canon), "project:p1:chat:canon");
        assert_eq!(chat("p1", ChatMode::Copilot), "project:p1:chat:copilot");
        assert_eq!(
            entity_image("p1", EntityKind::Character, "ash"),
            "project:p1:images:character:ash"
        );
        assert_eq!(
            entity_image_map("p1", EntityKind::Location),
            "project:p1:images:locations"
        );
    }

    #[test]
    fn object_keys_carry_timestamps() {
        assert_eq!(
            ai_hero_object("p1", 42),
            "projects/p1/hero/ai-hero-42.png"
        );
        assert_eq!(
            entity_object("p1", EntityKind::Character, "ash", 42),
            "projects/p1/characters/ash-42.png"
        );
    }
}
