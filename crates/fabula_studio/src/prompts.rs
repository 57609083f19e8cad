//! Prompt templates for canon extraction, chat personas, and image
//! generation.

use fabula_core::{CanonDocument, ScriptRecord};
use fabula_error::JsonError;

/// System instruction for canon extraction.
///
/// Spells out the exact JSON shape and forbids fencing and commentary. The
/// extraction layer still cleans fences defensively (models do not always
/// comply).
pub(crate) const CANON_EXTRACTION_PROMPT: &str = r##"You are the canon engine for a piece of narrative IP.
You receive a script (film, TV, animation, etc.) and must output ONE JSON object in this exact shape:

{
  "plot": {
    "title": string,
    "logline": string,
    "synopsis": string
  },
  "characters": {
    "list": [
      {
        "id": string,
        "name": string,
        "occupation": string,
        "role": string,
        "bio": string
      }
    ],
    "byId": {
      [id: string]: {
        "id": string,
        "name": string,
        "occupation": string,
        "role": string,
        "shortBio": string,
        "longBio": string,
        "visualNotes": string,
        "goals": string,
        "flaws": string,
        "relationships": { "name": string, "relation": string, "note"?: string }[],
        "keyScenes": string[]
      }
    }
  },
  "locations": {
    "list": [
      {
        "id": string,
        "name": string,
        "world": string,
        "region": string,
        "placeType": string,
        "note": string
      }
    ],
    "byId": {
      [id: string]: {
        "id": string,
        "name": string,
        "world": string,
        "region": string,
        "placeType": string,
        "moodLine": string,
        "description": string,
        "functionInStory": string,
        "recurringTimeOrWeather": string,
        "keyScenes": string[]
      }
    }
  },
  "artStyle": {
    "aesthetic": string,
    "palette": string
  },
  "worldRules": {
    "physicsMagic": string,
    "technology": string,
    "society": string
  }
}

Rules:
- Output ONLY raw JSON. No backticks, no ```json fences, no commentary.
- Every id in a "list" must have a matching entry in the sibling "byId" map, and vice versa.
- Be concise but specific. No placeholder text like "demo" or "TBD".
- In artStyle.palette, if you mention colors, include real hex codes like "#0a1018", "#ffd16f".
- If something is not explicit in the script, infer the most reasonable option and state it as fact."##;

/// The canon authority system message for chat turns.
///
/// Serializes the full canon verbatim as the single source of truth and
/// instructs the model never to reveal which underlying provider or model
/// is answering.
pub(crate) fn canon_system_prompt(canon: &CanonDocument) -> Result<String, JsonError> {
    let canon_json = serde_json::to_string_pretty(canon)
        .map_err(|e| JsonError::new(format!("failed to serialize canon: {}", e)))?;

    Ok(format!(
        r#"You are the Canon Exec, an expert narrative IP executive and AI showrunner.

You run inside a studio app that can sit on different underlying models.
You MUST NOT mention specific model names or versions when describing yourself.
If the user asks what you are, answer in generic terms such as:
"I'm the Canon Exec - an AI showrunner for this project, with the hard canon as my source of truth."

You have access to the HARD CANON for a project. The canon includes:
- Plot (title, logline, synopsis)
- Characters (list + byId, with bios, goals, flaws, relationships, key scenes)
- Locations (list + byId, with descriptions, mood, function in story)
- ArtStyle (aesthetic, palette)
- WorldRules (physics/magic, technology, society)

The full canon JSON is below. Treat it as the SINGLE SOURCE OF TRUTH for this IP:

{canon_json}

Guidelines:
- Stay consistent with the canon. Never contradict what is specified.
- If the user asks for something outside the canon, extrapolate but keep the tone, style, and logic coherent.
- If something is truly unspecified, you may invent details, but they must feel aligned with the existing canon.
- Answer as a creative development executive: clear, concise, helpful, not overly verbose."#
    ))
}

/// The soft-canon system message: script metadata plus a bounded excerpt.
///
/// `excerpt` has already been truncated by the composer; this template only
/// frames it and subordinates it to the hard canon.
pub(crate) fn script_context_prompt(script: &ScriptRecord, excerpt: &str) -> String {
    format!(
        r#"You also have access to the SOFT CANON: the original script text the canon was derived from.
Use it only as supporting context; the hard canon is the final authority if there is a conflict.

Script filename: {filename}
Created at: {created_at}

SCRIPT EXCERPT (for reference):
{excerpt}"#,
        filename = script.filename,
        created_at = script.created_at.to_rfc3339(),
    )
}

/// Key-art prompt synthesized from the canon's title, aesthetic, and
/// palette.
pub(crate) fn hero_prompt(canon: &CanonDocument) -> String {
    let title = if canon.plot.title.trim().is_empty() {
        "Untitled Project"
    } else {
        canon.plot.title.trim()
    };
    let aesthetic = if canon.art_style.aesthetic.trim().is_empty() {
        "cinematic, illustrated, story-driven"
    } else {
        canon.art_style.aesthetic.trim()
    };
    let palette = if canon.art_style.palette.trim().is_empty() {
        "cohesive, visually striking, no text"
    } else {
        canon.art_style.palette.trim()
    };

    format!(
        "Key art for a narrative IP called \"{title}\".\n\
         Style: {aesthetic}.\n\
         Mood / palette: {palette}.\n\
         Do NOT include any text, logos, or UI. Just the visual world / characters."
    )
}

/// Portrait-framed prompt for a character image.
pub(crate) fn character_prompt(name: &str, description: &str) -> String {
    let safe_name = if name.trim().is_empty() {
        "a character"
    } else {
        name.trim()
    };
    let mut parts = vec![format!("Cinematic character portrait of {safe_name}.")];
    let safe_desc = description.trim();
    if !safe_desc.is_empty() {
        parts.push(format!("Details: {safe_desc}."));
    }
    parts.push("Framed as a key art / trading card concept, no text or logos, no UI.".to_string());
    parts.join(" ")
}

/// Establishing-shot prompt for a location image.
pub(crate) fn location_prompt(name: &str, description: &str) -> String {
    let safe_name = if name.trim().is_empty() {
        "a key story location"
    } else {
        name.trim()
    };
    let mut parts = vec![format!("Cinematic establishing shot of {safe_name}.")];
    let safe_desc = description.trim();
    if !safe_desc.is_empty() {
        parts.push(format!("Mood / details: {safe_desc}."));
    }
    parts.push("Wide shot, strong sense of place, no text or logos, no UI.".to_string());
    parts.join(" ")
}
