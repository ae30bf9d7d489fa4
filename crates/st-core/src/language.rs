use st_translator::AUTO_DETECT;

use crate::error::CoreError;
use crate::types::LanguageSlot;

/// Menu order. The first entry is the auto-detect pseudo language.
const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    (AUTO_DETECT, "Detect language"),
    ("en", "English"),
    ("zh-TW", "Chinese (Traditional)"),
    ("zh-CN", "Chinese (Simplified)"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("fr", "French"),
    ("de", "German"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub display_name: &'static str,
}

impl Language {
    pub fn is_auto_detect(&self) -> bool {
        self.code == AUTO_DETECT
    }
}

/// Ordered code -> display name mapping backing the language menus
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    entries: Vec<Language>,
}

impl LanguageRegistry {
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_LANGUAGES.iter().copied())
    }

    /// Build from `(code, display name)` pairs. Later duplicates are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        let mut languages: Vec<Language> = Vec::new();
        for (code, display_name) in entries {
            if languages.iter().any(|l| l.code == code) {
                tracing::warn!("duplicate language code '{code}' ignored");
                continue;
            }
            languages.push(Language { code, display_name });
        }

        Self { entries: languages }
    }

    pub fn list_languages(&self) -> &[Language] {
        &self.entries
    }

    /// Entries for the source menu, auto-detect included
    pub fn source_languages(&self) -> impl Iterator<Item = &Language> {
        self.entries.iter()
    }

    /// Entries for the target menu
    pub fn target_languages(&self) -> impl Iterator<Item = &Language> {
        self.entries.iter().filter(|l| !l.is_auto_detect())
    }

    pub fn languages_for(&self, slot: LanguageSlot) -> Vec<&Language> {
        match slot {
            LanguageSlot::Source => self.source_languages().collect(),
            LanguageSlot::Target => self.target_languages().collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|l| l.code == code)
    }

    pub fn display_name_for(&self, code: &str) -> Result<&'static str, CoreError> {
        self.entries
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.display_name)
            .ok_or_else(|| CoreError::UnknownLanguage(code.to_string()))
    }

    /// Display name with the menu label fallback for unknown codes
    pub fn display_name_or<'a>(&self, code: &str, fallback: &'a str) -> &'a str {
        match self.display_name_for(code) {
            Ok(name) => name,
            Err(_) => fallback,
        }
    }

    /// Check that `code` may occupy `slot`
    pub fn validate(&self, code: &str, slot: LanguageSlot) -> Result<(), CoreError> {
        if slot == LanguageSlot::Target && code == AUTO_DETECT {
            return Err(CoreError::InvalidSelection {
                code: code.to_string(),
                slot,
            });
        }

        if !self.contains(code) {
            return Err(CoreError::UnknownLanguage(code.to_string()));
        }

        Ok(())
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_insertion_order() {
        let registry = LanguageRegistry::builtin();
        let codes: Vec<_> = registry.list_languages().iter().map(|l| l.code).collect();

        assert_eq!(&codes[..4], &["auto", "en", "zh-TW", "zh-CN"]);
        assert_eq!(codes.len(), BUILTIN_LANGUAGES.len());
    }

    #[test]
    fn target_menu_never_offers_auto() {
        let registry = LanguageRegistry::builtin();

        assert!(registry.source_languages().any(|l| l.code == "auto"));
        assert!(registry.target_languages().all(|l| l.code != "auto"));
        assert_eq!(
            registry.languages_for(LanguageSlot::Target).len(),
            registry.list_languages().len() - 1
        );
    }

    #[test]
    fn unknown_code_lookup_fails() {
        let registry = LanguageRegistry::builtin();

        assert_eq!(registry.display_name_for("ja").unwrap(), "Japanese");
        assert!(matches!(
            registry.display_name_for("xx"),
            Err(CoreError::UnknownLanguage(code)) if code == "xx"
        ));
        assert_eq!(registry.display_name_or("xx", "Detect language"), "Detect language");
    }

    #[test]
    fn validate_rejects_auto_as_target_only() {
        let registry = LanguageRegistry::builtin();

        assert!(registry.validate("auto", LanguageSlot::Source).is_ok());
        assert!(matches!(
            registry.validate("auto", LanguageSlot::Target),
            Err(CoreError::InvalidSelection { .. })
        ));
        assert!(matches!(
            registry.validate("klingon", LanguageSlot::Source),
            Err(CoreError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn duplicate_codes_keep_first_entry() {
        let registry = LanguageRegistry::from_entries([("en", "English"), ("en", "Anglais")]);

        assert_eq!(registry.list_languages().len(), 1);
        assert_eq!(registry.display_name_for("en").unwrap(), "English");
    }
}
