use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use st_config::preferences::PreferencesConfig;
use st_translator::LanguageCode;

pub const DEFAULT_SOURCE: &str = "en";
pub const DEFAULT_TARGET: &str = "zh-TW";

/// Settings namespace, kept apart from any other app data
const PREFS_FILE: &str = "st_translate_prefs.json";

fn default_source() -> LanguageCode {
    DEFAULT_SOURCE.to_string()
}

fn default_target() -> LanguageCode {
    DEFAULT_TARGET.to_string()
}

/// Last used language pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(rename = "source_lang_code", default = "default_source")]
    pub source_language: LanguageCode,
    #[serde(rename = "target_lang_code", default = "default_target")]
    pub target_language: LanguageCode,
}

impl Default for PreferenceRecord {
    fn default() -> Self {
        Self {
            source_language: default_source(),
            target_language: default_target(),
        }
    }
}

/// Persists the language pair across sessions.
///
/// A `save` must be visible to the next `load` on the same store. Codes are
/// stored as given, validation happens in the orchestrator.
pub trait PreferenceStore: Send + Sync {
    /// Last saved record, or the defaults when nothing was saved
    fn load(&self) -> PreferenceRecord;

    fn save(&self, record: &PreferenceRecord) -> Result<(), PreferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// JSON file store. Writes go through a temp file and a rename.
pub struct FilePreferenceStore {
    path: PathBuf,
    // serializes access from several screens, last write wins
    io: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    /// Store in the platform config directory
    pub fn in_config_dir() -> Result<Self, PreferenceError> {
        let dirs = directories::ProjectDirs::from("org", "sttranslate", "st-translate")
            .ok_or(PreferenceError::NoConfigDir)?;

        Ok(Self::new(dirs.config_dir().join(PREFS_FILE)))
    }

    pub fn from_config(config: &PreferencesConfig) -> Result<Self, PreferenceError> {
        match &config.path {
            Some(path) => Ok(Self::new(path.clone())),
            None => Self::in_config_dir(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<PreferenceRecord>, PreferenceError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> PreferenceRecord {
        let _guard = lock(&self.io);

        match self.read() {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("no preferences at {}, using defaults", self.path.display());
                PreferenceRecord::default()
            }
            Err(e) => {
                tracing::warn!(
                    "failed to read preferences at {}: {e}, using defaults",
                    self.path.display()
                );
                PreferenceRecord::default()
            }
        }
    }

    fn save(&self, record: &PreferenceRecord) -> Result<(), PreferenceError> {
        let _guard = lock(&self.io);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(record)?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            "saved preferences {} -> {}",
            record.source_language,
            record.target_language
        );
        Ok(())
    }
}

/// Process-local store, nothing survives a restart
#[derive(Default)]
pub struct MemoryPreferenceStore {
    record: Mutex<Option<PreferenceRecord>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: PreferenceRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> PreferenceRecord {
        lock(&self.record).clone().unwrap_or_default()
    }

    fn save(&self, record: &PreferenceRecord) -> Result<(), PreferenceError> {
        *lock(&self.record) = Some(record.clone());
        Ok(())
    }
}
