use serde::{Deserialize, Serialize};

use self::orchestrator::OrchestratorConfig;
use self::preferences::PreferencesConfig;
use self::translator::TranslatorConfig;

pub mod orchestrator;
pub mod preferences;
pub mod translator;

pub use self::orchestrator::StaleResultPolicy;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub preferences: PreferencesConfig,
    pub orchestrator: OrchestratorConfig,
}

impl Config {
    /// Defaults overridden by `ST_*` environment variables
    pub fn new() -> Self {
        Config {
            translator: TranslatorConfig::new(),
            preferences: PreferencesConfig::new(),
            orchestrator: OrchestratorConfig::new(),
        }
    }
}
