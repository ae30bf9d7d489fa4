pub mod error;
pub mod language;
pub mod orchestrator;
pub mod preferences;
pub mod share;
pub mod types;

pub use error::CoreError;
pub use language::{Language, LanguageRegistry};
pub use orchestrator::{Completion, Orchestrator, OrchestratorOptions, PendingTranslation, Services};
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceRecord, PreferenceStore,
};
pub use share::SharedText;
pub use types::{LanguageSlot, OrchestratorEvent, OrchestratorState, Status, Surface};

#[cfg(test)]
mod tests;
