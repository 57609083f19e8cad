//! Conversational modes.

use serde::{Deserialize, Serialize};

/// The two conversational postures a project supports.
///
/// Each mode has its own independent, never-merged conversation log.
///
/// # Examples
///
/// ```
/// use fabula_core::ChatMode;
///
/// assert_eq!(ChatMode::Canon.as_str(), "canon");
/// assert_eq!(format!("{}", ChatMode::Copilot), "copilot");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatMode {
    /// Strict canon-grounded answering; the canon is the single source of truth
    Canon,
    /// Looser creative copilot assistance using canon plus script context
    Copilot,
}

impl ChatMode {
    /// Stable string form used in record keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Canon => "canon",
            ChatMode::Copilot => "copilot",
        }
    }
}

impl Default for ChatMode {
    fn default() -> Self {
        ChatMode::Copilot
    }
}
