//! The structured canon document ("IP bible") for a narrative project.
//!
//! The canon is produced once per project by structured extraction, stored as
//! a single immutable snapshot, and read (never mutated in place) by later
//! chat turns. Regeneration replaces the whole snapshot.
//!
//! Field names serialize in the camelCase wire shape the extraction prompt
//! specifies, so a parsed model response and a stored snapshot are the same
//! JSON. Every field carries a serde default so a partially filled response
//! still deserializes; shape invariants are checked separately by
//! [`CanonDocument::validate`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plot summary for the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotData {
    /// Project title
    #[serde(default)]
    pub title: String,
    /// One-sentence logline
    #[serde(default)]
    pub logline: String,
    /// Short synopsis covering setup, conflict, and resolution
    #[serde(default)]
    pub synopsis: String,
}

/// Compact character entry for list views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCard {
    /// Stable identifier, referenced by the detail map
    #[serde(default)]
    pub id: String,
    /// Character name
    #[serde(default)]
    pub name: String,
    /// Occupation or station
    #[serde(default)]
    pub occupation: String,
    /// Narrative role (protagonist, antagonist, ...)
    #[serde(default)]
    pub role: String,
    /// Short bio
    #[serde(default)]
    pub bio: String,
}

/// A relationship between two characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Name of the related character
    #[serde(default)]
    pub name: String,
    /// Nature of the relationship
    #[serde(default)]
    pub relation: String,
    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Full character entry for detail views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetail {
    /// Stable identifier matching the list entry
    #[serde(default)]
    pub id: String,
    /// Character name
    #[serde(default)]
    pub name: String,
    /// Occupation or station
    #[serde(default)]
    pub occupation: String,
    /// Narrative role
    #[serde(default)]
    pub role: String,
    /// Short bio, mirroring the card
    #[serde(default)]
    pub short_bio: String,
    /// Extended biography
    #[serde(default)]
    pub long_bio: String,
    /// Visual description for image generation
    #[serde(default)]
    pub visual_notes: String,
    /// What the character wants
    #[serde(default)]
    pub goals: String,
    /// What holds the character back
    #[serde(default)]
    pub flaws: String,
    /// Relationships to other characters
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// Scenes this character anchors
    #[serde(default)]
    pub key_scenes: Vec<String>,
}

/// Characters as both an ordered list and an id-keyed detail map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSet {
    /// Ordered list of compact entries
    #[serde(default)]
    pub list: Vec<CharacterCard>,
    /// Detail map keyed by entry id
    #[serde(default)]
    pub by_id: HashMap<String, CharacterDetail>,
}

/// Compact location entry for list views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCard {
    /// Stable identifier, referenced by the detail map
    #[serde(default)]
    pub id: String,
    /// Location name
    #[serde(default)]
    pub name: String,
    /// World or realm the location belongs to
    #[serde(default)]
    pub world: String,
    /// Region within the world
    #[serde(default)]
    pub region: String,
    /// Kind of place (city, ship, forest, ...)
    #[serde(default)]
    pub place_type: String,
    /// Short note
    #[serde(default)]
    pub note: String,
}

/// Full location entry for detail views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetail {
    /// Stable identifier matching the list entry
    #[serde(default)]
    pub id: String,
    /// Location name
    #[serde(default)]
    pub name: String,
    /// World or realm the location belongs to
    #[serde(default)]
    pub world: String,
    /// Region within the world
    #[serde(default)]
    pub region: String,
    /// Kind of place
    #[serde(default)]
    pub place_type: String,
    /// One-line mood description
    #[serde(default)]
    pub mood_line: String,
    /// Longer prose description
    #[serde(default)]
    pub description: String,
    /// What the location does for the story
    #[serde(default)]
    pub function_in_story: String,
    /// Recurring time of day or weather, if any
    #[serde(default)]
    pub recurring_time_or_weather: String,
    /// Scenes set here
    #[serde(default)]
    pub key_scenes: Vec<String>,
}

/// Locations as both an ordered list and an id-keyed detail map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSet {
    /// Ordered list of compact entries
    #[serde(default)]
    pub list: Vec<LocationCard>,
    /// Detail map keyed by entry id
    #[serde(default)]
    pub by_id: HashMap<String, LocationDetail>,
}

/// Visual identity of the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtStyleData {
    /// Overall visual aesthetic: influences, camera behavior, texture
    #[serde(default)]
    pub aesthetic: String,
    /// Mood and color palette
    #[serde(default)]
    pub palette: String,
}

/// The rules the story world runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRulesData {
    /// How reality works: physics, magic systems, time
    #[serde(default)]
    pub physics_magic: String,
    /// Level and style of technology
    #[serde(default)]
    pub technology: String,
    /// Social rules, power structures, taboos
    #[serde(default)]
    pub society: String,
}

/// The complete canon document for a project.
///
/// # Examples
///
/// ```
/// use fabula_core::CanonDocument;
///
/// let canon: CanonDocument = serde_json::from_str(
///     r#"{"plot":{"title":"Tide Road"},"artStyle":{"aesthetic":"painterly"}}"#,
/// ).unwrap();
/// assert_eq!(canon.plot.title, "Tide Road");
/// assert!(canon.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonDocument {
    /// Plot summary
    #[serde(default)]
    pub plot: PlotData,
    /// Characters (list + detail map)
    #[serde(default)]
    pub characters: CharacterSet,
    /// Locations (list + detail map)
    #[serde(default)]
    pub locations: LocationSet,
    /// Visual identity
    #[serde(default)]
    pub art_style: ArtStyleData,
    /// World rules
    #[serde(default)]
    pub world_rules: WorldRulesData,
}

impl CanonDocument {
    /// Check the id correspondence invariant.
    ///
    /// Every id in `characters.list` must have an entry in
    /// `characters.by_id` and vice versa, same for locations. The document
    /// must not carry one side without the other.
    pub fn validate(&self) -> Result<(), String> {
        let mut violations = Vec::new();

        for card in &self.characters.list {
            if !self.characters.by_id.contains_key(&card.id) {
                violations.push(format!("character {:?} listed but missing from byId", card.id));
            }
        }
        for id in self.characters.by_id.keys() {
            if !self.characters.list.iter().any(|c| &c.id == id) {
                violations.push(format!("character {:?} in byId but missing from list", id));
            }
        }

        for card in &self.locations.list {
            if !self.locations.by_id.contains_key(&card.id) {
                violations.push(format!("location {:?} listed but missing from byId", card.id));
            }
        }
        for id in self.locations.by_id.keys() {
            if !self.locations.list.iter().any(|l| &l.id == id) {
                violations.push(format!("location {:?} in byId but missing from list", id));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon_with_character(list_id: &str, detail_id: &str) -> CanonDocument {
        let mut canon = CanonDocument::default();
        canon.characters.list.push(CharacterCard {
            id: list_id.to_string(),
            name: "Ash".to_string(),
            ..Default::default()
        });
        canon.characters.by_id.insert(
            detail_id.to_string(),
            CharacterDetail {
                id: detail_id.to_string(),
                name: "Ash".to_string(),
                ..Default::default()
            },
        );
        canon
    }

    #[test]
    fn validate_accepts_matching_ids() {
        let canon = canon_with_character("ash", "ash");
        assert!(canon.validate().is_ok());
    }

    #[test]
    fn validate_rejects_listed_without_detail() {
        let canon = canon_with_character("ash", "ember");
        let err = canon.validate().unwrap_err();
        assert!(err.contains("missing from byId"));
        assert!(err.contains("missing from list"));
    }

    #[test]
    fn deserializes_wire_field_names() {
        let json = r#"{
            "plot": {"title": "T", "logline": "L", "synopsis": "S"},
            "characters": {
                "list": [{"id": "a", "name": "A", "occupation": "", "role": "", "bio": ""}],
                "byId": {"a": {"id": "a", "name": "A", "shortBio": "sb", "keyScenes": ["s1"]}}
            },
            "artStyle": {"aesthetic": "ae", "palette": "pa"},
            "worldRules": {"physicsMagic": "pm", "technology": "te", "society": "so"}
        }"#;
        let canon: CanonDocument = serde_json::from_str(json).unwrap();
        assert_eq!(canon.characters.by_id["a"].short_bio, "sb");
        assert_eq!(canon.world_rules.physics_magic, "pm");
        assert_eq!(canon.art_style.palette, "pa");
        assert!(canon.validate().is_ok());
    }
}
