use std::sync::Arc;
use std::time::Duration;

use st_config::Config;
use st_core::{FilePreferenceStore, LanguageRegistry, Services};
use st_translator::{SimplyTranslateClient, Translator};

pub struct AppState {
    pub config: Config,
    pub services: Services,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = SimplyTranslateClient::with_user_agent(
            &config.translator.base_url,
            Duration::from_secs(config.translator.timeout_seconds),
            &config.translator.user_agent,
        )?;
        let metadata = translator.metadata();
        tracing::info!(
            "Translator: {} at {} (engine {})",
            metadata.name,
            translator.endpoint(),
            config.translator.engine
        );

        let preferences = FilePreferenceStore::from_config(&config.preferences)?;
        tracing::info!("Preferences: {}", preferences.path().display());

        let services = Services {
            registry: Arc::new(LanguageRegistry::builtin()),
            translator: Arc::new(translator),
            preferences: Arc::new(preferences),
        };

        Ok(Self { config, services })
    }
}
