use crate::types::LanguageSlot;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid selection: '{code}' cannot be used as {slot}")]
    InvalidSelection { code: String, slot: LanguageSlot },

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}
