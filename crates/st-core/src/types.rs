use std::fmt;

use serde::Serialize;
use st_translator::LanguageCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Idle,
    InFlight,
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrchestratorState {
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
    pub input_text: String,
    pub result_text: String,
    pub status: Status,
    /// Source language reported by the backend for the shown result
    pub detected_language: Option<LanguageCode>,
    pub pronunciation: Option<String>,
}

#[derive(Debug, Clone)]
pub enum OrchestratorEvent {
    StateChanged(OrchestratorState),
    /// Transient user-visible message, e.g. a failed translation
    Notice(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSlot {
    Source,
    Target,
}

impl fmt::Display for LanguageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSlot::Source => f.write_str("source language"),
            LanguageSlot::Target => f.write_str("target language"),
        }
    }
}

/// Presentation surfaces driving an orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Persistent main screen, translate on explicit action
    Main,
    /// Ephemeral overlay opened with shared text
    ShareOverlay,
}
